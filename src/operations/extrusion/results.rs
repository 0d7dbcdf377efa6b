use crate::config::ExtrusionConfig;
use crate::geometry::{
    ChunkCollection, ContourPoint, ExtrudedPoint, IntersectionPoint, LinePointUv,
    SegmentwiseList,
};
use crate::math::polygon_2d::signed_area_2d;
use crate::math::Point2;
use crate::texture::connected_segments::ConnectedSegmentsResults;

/// Everything produced by one extrusion run.
///
/// `contours[i]` was flattened from `chunk_collections[i]`; contours are
/// ordered by decreasing absolute area, so the outer boundary comes first.
#[derive(Debug, Clone, Default)]
pub struct LineExtrusionResults {
    pub original: SegmentwiseList<LinePointUv>,
    pub contours: Vec<Vec<ContourPoint>>,
    /// Contours after UV alteration, or copies of `contours` when the chosen
    /// triangulation does not use altered UVs.
    pub altered_contours: Vec<Vec<ContourPoint>>,
    pub removed_contours: Vec<Vec<ContourPoint>>,
    pub chunk_collections: Vec<ChunkCollection>,
    pub removed_chunk_collections: Vec<ChunkCollection>,
    /// Sorted by parameter, including the synthetic first and last entries.
    pub intersection_points: Vec<IntersectionPoint>,
    pub initial_traversal: SegmentwiseList<ExtrudedPoint>,
    pub extrusion_amount: f64,
    pub connected_segments: ConnectedSegmentsResults,
}

/// Unsorted output of the extrusion steps.
pub(crate) struct ExtrusionParts {
    pub original: SegmentwiseList<LinePointUv>,
    pub contours: Vec<Vec<ContourPoint>>,
    pub removed_contours: Vec<Vec<ContourPoint>>,
    pub chunk_collections: Vec<ChunkCollection>,
    pub removed_chunk_collections: Vec<ChunkCollection>,
    pub intersection_points: Vec<IntersectionPoint>,
    pub initial_traversal: SegmentwiseList<ExtrudedPoint>,
}

impl LineExtrusionResults {
    /// Result for input too short to extrude.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(parts: ExtrusionParts, config: &ExtrusionConfig) -> Self {
        let (contours, chunk_collections) =
            sort_by_area(parts.contours, parts.chunk_collections);
        let altered_contours = alter(&contours, config);
        let connected_segments =
            ConnectedSegmentsResults::from_contours(&altered_contours, &config.precision);
        Self {
            original: parts.original,
            contours,
            altered_contours,
            removed_contours: parts.removed_contours,
            chunk_collections,
            removed_chunk_collections: parts.removed_chunk_collections,
            intersection_points: parts.intersection_points,
            initial_traversal: parts.initial_traversal,
            extrusion_amount: config.extrusion_amount,
            connected_segments,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }
}

fn contour_area(contour: &[ContourPoint]) -> f64 {
    let positions: Vec<Point2> = contour.iter().map(|p| p.position).collect();
    signed_area_2d(&positions).abs()
}

fn sort_by_area(
    contours: Vec<Vec<ContourPoint>>,
    collections: Vec<ChunkCollection>,
) -> (Vec<Vec<ContourPoint>>, Vec<ChunkCollection>) {
    let mut paired: Vec<(f64, Vec<ContourPoint>, ChunkCollection)> = contours
        .into_iter()
        .zip(collections)
        .map(|(c, k)| (contour_area(&c), c, k))
        .collect();
    paired.sort_by(|a, b| b.0.total_cmp(&a.0));
    paired.into_iter().map(|(_, c, k)| (c, k)).unzip()
}

fn alter(contours: &[Vec<ContourPoint>], config: &ExtrusionConfig) -> Vec<Vec<ContourPoint>> {
    let count = contours.len();
    if !config.alters_uvs_for(count) {
        return contours.to_vec();
    }
    let alteration = config.uv_alteration_for(count);
    contours
        .iter()
        .map(|c| alteration.apply(c, config.extrusion_amount, &config.precision))
        .collect()
}
