mod multi_contour;
mod single_contour;

pub use multi_contour::MultipleContourTriangulation;
pub use single_contour::SingleContourTriangulation;

use crate::config::ExtrusionConfig;
use crate::error::Result;
use crate::math::vector_2d::cross;
use crate::math::{Point2, Point3, Vector2, Vector3};
use crate::operations::extrusion::LineExtrusionResults;

/// A triangle mesh in the `z = 0` plane.
///
/// Triangles wind clockwise in the xy-plane whatever the sign of the
/// extrusion amount; normals point along `-z`.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates.
    pub uvs: Vec<Vector2>,
    /// Secondary per-vertex channel: (coverage pair index, closest original
    /// segment index). Only filled by the connected-segments strip.
    pub index_uvs: Vec<Vector2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Builds a mesh from planar positions, turning counter-clockwise
    /// triangles clockwise.
    pub(crate) fn from_planar(
        positions: &[Point2],
        uvs: Vec<Vector2>,
        indices: Vec<[u32; 3]>,
    ) -> Self {
        let indices = indices
            .into_iter()
            .map(|[a, b, c]| {
                let [pa, pb, pc] = [a, b, c].map(|i| positions[i as usize]);
                if cross(&(pb - pa), &(pc - pa)) > 0.0 {
                    [a, c, b]
                } else {
                    [a, b, c]
                }
            })
            .collect();
        Self {
            vertices: positions.iter().map(|p| Point3::new(p.x, p.y, 0.0)).collect(),
            normals: vec![-Vector3::z(); positions.len()],
            uvs,
            index_uvs: Vec::new(),
            indices,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Sum of the unsigned triangle areas.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.indices
            .iter()
            .map(|t| {
                let [a, b, c] = t.map(|i| self.vertices[i as usize]);
                0.5 * ((b - a).cross(&(c - a))).norm()
            })
            .sum()
    }
}

/// Triangulates the contours of an extrusion.
///
/// No contours give an empty mesh, one contour uses the configured
/// single-contour strategy and several use the multi-contour strategy.
///
/// # Errors
///
/// Returns `TessellationError::Failed` if the chosen strategy's
/// preconditions do not hold for these results.
pub fn triangulate(
    results: &LineExtrusionResults,
    config: &ExtrusionConfig,
) -> Result<TriangleMesh> {
    match results.contours.len() {
        0 => Ok(TriangleMesh::default()),
        1 => config.single_contour_triangulation.triangulate(results),
        _ => config
            .multiple_contour_triangulation
            .triangulate(results, &config.precision),
    }
}
