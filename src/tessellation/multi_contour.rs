use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, FixedUndirectedEdgeHandle, InnerTag};
use spade::{
    AngleLimit, ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2,
    RefinementParameters, Triangulation,
};
use tracing::{debug, error, warn};

use super::TriangleMesh;
use crate::config::Precision;
use crate::error::{Result, TessellationError};
use crate::geometry::{ContourPoint, SegmentwiseList};
use crate::math::{Point2, Vector2};
use crate::operations::extrusion::LineExtrusionResults;
use crate::texture::curvature_uv::{self, AlterationFractions};
use crate::texture::{blend, weighted};

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// How several contours (an outer boundary and holes) are triangulated and
/// textured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultipleContourTriangulation {
    /// Geometry only; every UV is zero.
    #[default]
    NoUvs,
    /// UVs blended between the original line and the UV-altered contours.
    OriginalAndExtrudedAltered,
    /// UVs blended between the original line and the chunk outlines, split
    /// by angle at intersections.
    AnglewiseWeighted,
    /// UVs bent by the original line's curvature.
    OriginalLineCurvature,
    /// UVs weighted over the original line segments.
    WeightedFromOriginalSegments,
}

impl MultipleContourTriangulation {
    /// Whether the contours' UVs are altered before triangulation.
    #[must_use]
    pub fn has_uv_alteration(&self) -> bool {
        matches!(self, Self::OriginalAndExtrudedAltered)
    }

    /// Triangulates the region inside `results.contours[0]` and outside the
    /// remaining contours.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::Failed` if there is no outer contour with
    /// at least 3 distinct points or a point cannot be inserted.
    pub fn triangulate(
        &self,
        results: &LineExtrusionResults,
        precision: &Precision,
    ) -> Result<TriangleMesh> {
        let (positions, indices) = triangulate_region(&results.contours, precision)?;
        let uvs = self.uvs(&positions, results);
        Ok(TriangleMesh::from_planar(&positions, uvs, indices))
    }

    fn uvs(&self, positions: &[Point2], results: &LineExtrusionResults) -> Vec<Vector2> {
        let line = &results.original;
        let amount = results.extrusion_amount;
        match self {
            Self::NoUvs => vec![Vector2::zeros(); positions.len()],
            Self::OriginalAndExtrudedAltered => {
                let altered: Vec<SegmentwiseList<ContourPoint>> = results
                    .altered_contours
                    .iter()
                    .map(|c| SegmentwiseList::new(c.clone()))
                    .collect();
                positions
                    .iter()
                    .map(|p| {
                        blend::original_and_extruded_altered(
                            p,
                            line,
                            &altered,
                            &results.removed_contours,
                            amount,
                        )
                    })
                    .collect()
            }
            Self::AnglewiseWeighted => positions
                .iter()
                .map(|p| blend::anglewise_weighted(p, line, &results.chunk_collections, amount))
                .collect(),
            Self::OriginalLineCurvature => {
                let fractions = AlterationFractions::from_line(line);
                positions
                    .iter()
                    .map(|p| curvature_uv::point_uv(p, line, &fractions, amount))
                    .collect()
            }
            Self::WeightedFromOriginalSegments => positions
                .iter()
                .map(|p| weighted::point_uv(p, line, amount))
                .collect(),
        }
    }
}

/// Contour without its repeated closing point.
fn ring(contour: &[ContourPoint]) -> Vec<SpadePoint2<f64>> {
    let closed = contour.len() > 1 && contour.first() == contour.last();
    let end = if closed { contour.len() - 1 } else { contour.len() };
    contour[..end]
        .iter()
        .map(|p| SpadePoint2::new(p.position.x, p.position.y))
        .collect()
}

/// Constrained, refined triangulation of the region bounded by `contours`.
///
/// Returns the vertex positions and triangles wound clockwise.
#[allow(clippy::cast_possible_truncation)]
fn triangulate_region(
    contours: &[Vec<ContourPoint>],
    precision: &Precision,
) -> Result<(Vec<Point2>, Vec<[u32; 3]>)> {
    let Some((outer, holes)) = contours.split_first() else {
        error!("no contours to triangulate");
        return Err(TessellationError::Failed("no contours to triangulate".into()).into());
    };
    let outer = ring(outer);
    if outer.len() < 3 {
        error!(points = outer.len(), "outer contour is degenerate");
        return Err(
            TessellationError::Failed("outer contour needs at least 3 points".into()).into(),
        );
    }

    let mut cdt = Cdt::new();
    insert_constraint_loop(&mut cdt, &outer)?;
    for hole in holes {
        let hole = ring(hole);
        if hole.len() < 3 {
            warn!(points = hole.len(), "skipping degenerate hole contour");
            continue;
        }
        insert_constraint_loop(&mut cdt, &hole)?;
    }

    let refinement = RefinementParameters::<f64>::new()
        .exclude_outer_faces(true)
        .with_angle_limit(AngleLimit::from_deg(precision.min_triangle_angle_deg))
        .with_max_additional_vertices(cdt.num_vertices() * 10);
    let refined = cdt.refine(refinement);
    if !refined.refinement_complete {
        debug!(vertices = cdt.num_vertices(), "refinement stopped at the vertex limit");
    }

    let ribbon = ribbon_faces(&cdt);
    let mut positions = Vec::new();
    let mut indices = Vec::new();
    let mut vertex_map: HashMap<usize, u32> = HashMap::new();

    for face_handle in cdt.inner_faces() {
        if !ribbon.contains(&face_handle.fix().index()) {
            continue;
        }
        let mut tri_indices = [0u32; 3];
        for (i, vh) in face_handle.vertices().iter().enumerate() {
            let idx = vh.fix().index();
            tri_indices[i] = *vertex_map.entry(idx).or_insert_with(|| {
                let pos = vh.position();
                positions.push(Point2::new(pos.x, pos.y));
                (positions.len() - 1) as u32
            });
        }
        indices.push([tri_indices[0], tri_indices[2], tri_indices[1]]);
    }

    Ok((positions, indices))
}

/// Inserts a closed loop of points and constrains its edges.
///
/// Edges that would cross an existing constraint are skipped with a warning.
fn insert_constraint_loop(cdt: &mut Cdt, points: &[SpadePoint2<f64>]) -> Result<()> {
    let mut handles = Vec::with_capacity(points.len());
    for &pt in points {
        let h = cdt
            .insert(pt)
            .map_err(|e: InsertionError| TessellationError::Failed(format!("CDT insert: {e}")))?;
        handles.push(h);
    }

    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from == to {
            continue;
        }
        if cdt.can_add_constraint(from, to) {
            cdt.add_constraint(from, to);
        } else {
            warn!(from = from.index(), to = to.index(), "skipping crossing constraint edge");
        }
    }

    Ok(())
}

/// Faces of the ribbon: those separated from the unbounded face by an odd
/// number of contour edges.
///
/// Hull faces are seeded with the crossing count of their hull edge, so a face
/// just inside the outer contour counts 1 and a face inside a hole counts 2.
/// Refinement splits contour edges, and the split pieces stay constraints.
fn ribbon_faces(cdt: &Cdt) -> HashSet<usize> {
    let crosses_contour = |edge: FixedUndirectedEdgeHandle| u32::from(cdt.is_constraint_edge(edge));
    let mut crossings: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<InnerTag>, u32)> = VecDeque::new();

    let unbounded = cdt.outer_face().fix();
    for edge in cdt.directed_edges().filter(|e| e.face().fix() == unbounded) {
        let Some(hull_face) = edge.rev().face().as_inner() else {
            continue;
        };
        let count = crosses_contour(edge.as_undirected().fix());
        if let Entry::Vacant(slot) = crossings.entry(hull_face.fix().index()) {
            slot.insert(count);
            queue.push_back((hull_face.fix(), count));
        }
    }

    while let Some((face, count)) = queue.pop_front() {
        for edge in cdt.face(face).adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let neighbor_count = count + crosses_contour(edge.as_undirected().fix());
            if let Entry::Vacant(slot) = crossings.entry(neighbor.fix().index()) {
                slot.insert(neighbor_count);
                queue.push_back((neighbor.fix(), neighbor_count));
            }
        }
    }

    crossings
        .into_iter()
        .filter(|&(_, count)| count % 2 == 1)
        .map(|(face, _)| face)
        .collect()
}
