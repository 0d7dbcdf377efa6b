use tracing::error;

use super::TriangleMesh;
use crate::error::{Result, TessellationError};
use crate::geometry::{ContourPoint, LinePointUv};
use crate::math::{Point2, Vector2};
use crate::operations::extrusion::LineExtrusionResults;
use crate::texture::curvature_uv::{self, AlterationFractions};
use crate::texture::weighted;

/// How a single extruded contour is triangulated and textured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SingleContourTriangulation {
    /// Quad strip joining contour points of equal `u` on both sides of the
    /// line, with UVs taken from the altered contour.
    #[default]
    ConnectedSegments,
    /// Triangles between the original line and the contour; UVs of the line
    /// points and the altered contour as they are.
    BetweenOriginalAndExtruded,
    /// Line-to-contour triangles with UVs bent by the line's curvature.
    OriginalLineCurvature,
    /// Line-to-contour triangles with UVs weighted over the line segments.
    WeightedFromOriginalSegments,
}

impl SingleContourTriangulation {
    /// Whether the contour's UVs are altered before triangulation.
    #[must_use]
    pub fn has_uv_alteration(&self) -> bool {
        matches!(self, Self::ConnectedSegments | Self::BetweenOriginalAndExtruded)
    }

    /// Triangulates the first contour of `results`.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::Failed` if there is no contour, or for
    /// [`Self::ConnectedSegments`] if the contour has no coverage or its
    /// sides have unequal or zero length.
    pub fn triangulate(&self, results: &LineExtrusionResults) -> Result<TriangleMesh> {
        match self {
            Self::ConnectedSegments => connected_segments(results),
            Self::BetweenOriginalAndExtruded => line_to_extruded(results, |line, contour, _| {
                line.iter().map(|p| p.uv).chain(contour.iter().map(|p| p.uv)).collect()
            }),
            Self::OriginalLineCurvature => line_to_extruded(results, |_, _, positions| {
                let fractions = AlterationFractions::from_line(&results.original);
                positions
                    .iter()
                    .map(|p| {
                        curvature_uv::point_uv(
                            p,
                            &results.original,
                            &fractions,
                            results.extrusion_amount,
                        )
                    })
                    .collect()
            }),
            Self::WeightedFromOriginalSegments => line_to_extruded(results, |_, _, positions| {
                positions
                    .iter()
                    .map(|p| weighted::point_uv(p, &results.original, results.extrusion_amount))
                    .collect()
            }),
        }
    }
}

fn failed(message: &str) -> crate::error::ExtrusionError {
    error!("{message}");
    TessellationError::Failed(message.to_owned()).into()
}

/// Quad strip over the coverage pairs, capped by the first and last points.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn connected_segments(results: &LineExtrusionResults) -> Result<TriangleMesh> {
    let Some(coverage) = results.connected_segments.coverage.as_ref() else {
        return Err(failed("single contour connected segments results are not calculated"));
    };
    let increasing = &coverage.increasing;
    let decreasing = &coverage.decreasing;
    if increasing.len() != decreasing.len() || increasing.is_empty() {
        return Err(failed("not enough connected extruded points to create mesh"));
    }
    let n = increasing.len();
    let reach = results.extrusion_amount.abs();
    let segment_of = |p: &ContourPoint| {
        results
            .original
            .closest_point(&p.position, reach)
            .map_or(0.0, |c| c.segment_index as f64)
    };

    let mut points = Vec::with_capacity(2 * n + 2);
    let mut index_uvs = Vec::with_capacity(2 * n + 2);
    points.push(coverage.first_point);
    index_uvs.push(Vector2::new(-1.0, segment_of(&coverage.first_point)));
    for (i, (inc, dec)) in increasing.iter().zip(decreasing).enumerate() {
        points.push(*inc);
        index_uvs.push(Vector2::new(i as f64, segment_of(inc)));
        points.push(*dec);
        index_uvs.push(Vector2::new(i as f64, segment_of(dec)));
    }
    points.push(coverage.last_point);
    index_uvs.push(Vector2::new(n as f64, segment_of(&coverage.last_point)));

    let n = n as u32;
    let mut indices = Vec::with_capacity(2 * n as usize);
    indices.push([0, 1, 2]);
    for j in 0..n - 1 {
        indices.push([2 * j + 2, 2 * j + 1, 2 * j + 3]);
        indices.push([2 * j + 3, 2 * j + 4, 2 * j + 2]);
    }
    indices.push([2 * n, 2 * n - 1, 2 * n + 1]);

    let positions: Vec<Point2> = points.iter().map(|p| p.position).collect();
    let uvs = points.iter().map(|p| p.uv).collect();
    let mut mesh = TriangleMesh::from_planar(&positions, uvs, indices);
    mesh.index_uvs = index_uvs;
    Ok(mesh)
}

/// Triangles between the original line (first vertices) and the altered
/// contour (following vertices).
fn line_to_extruded<F>(results: &LineExtrusionResults, uvs_for: F) -> Result<TriangleMesh>
where
    F: Fn(&[LinePointUv], &[ContourPoint], &[Point2]) -> Vec<Vector2>,
{
    let Some(contour) = results.altered_contours.first() else {
        return Err(failed("no contour to triangulate"));
    };
    let line = results.original.points();
    if line.is_empty() {
        return Err(failed("original line is empty"));
    }
    let line_positions: Vec<Point2> = line.iter().map(|p| p.position).collect();
    let contour_positions: Vec<Point2> = contour.iter().map(|p| p.position).collect();
    let indices = line_to_extruded_indices(&line_positions, &contour_positions);

    let positions: Vec<Point2> = line_positions.iter().chain(&contour_positions).copied().collect();
    let uvs = uvs_for(line, contour, &positions);
    Ok(TriangleMesh::from_planar(&positions, uvs, indices))
}

fn closest_index(point: &Point2, candidates: impl Iterator<Item = (usize, Point2)>) -> usize {
    let mut best = (0, f64::INFINITY);
    for (i, p) in candidates {
        let d = (p - point).norm();
        if d < best.1 {
            best = (i, d);
        }
    }
    best.0
}

/// Walks the contour step by step, joining each step to the line points
/// nearest its ends.
///
/// A step whose ends share a nearest line point becomes a fan triangle, one
/// whose ends are nearest to neighbouring line points a quad, and a longer
/// jump is walked one line point at a time.
#[allow(clippy::cast_possible_truncation)]
fn line_to_extruded_indices(line: &[Point2], contour: &[Point2]) -> Vec<[u32; 3]> {
    let n = line.len();
    let nearest_on_line = |p: &Point2| closest_index(p, line.iter().copied().enumerate());
    let e = |i: usize| (n + i) as u32;
    let o = |i: usize| i as u32;

    let mut indices = Vec::new();
    for current in 1..contour.len() {
        let previous = current - 1;
        let mut po = nearest_on_line(&contour[previous]);
        let co = nearest_on_line(&contour[current]);
        match po.abs_diff(co) {
            0 => indices.push([o(co), e(previous), e(current)]),
            1 => {
                indices.push([e(previous), e(current), o(po)]);
                indices.push([o(co), o(po), e(current)]);
            }
            _ => {
                let step_ends = [previous, current];
                let nearest_end = |p: &Point2| {
                    closest_index(p, step_ends.iter().map(|&k| (k, contour[k])))
                };
                while po != co {
                    let next = if co > po { po + 1 } else { po - 1 };
                    let from = nearest_end(&line[po]);
                    if from == nearest_end(&line[next]) {
                        indices.push([o(po), e(from), o(next)]);
                    } else {
                        indices.push([e(previous), e(current), o(po)]);
                        indices.push([o(next), o(po), e(current)]);
                    }
                    po = next;
                }
            }
        }
    }
    indices
}
