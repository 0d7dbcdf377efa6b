//! UVs blended between the original line and the extruded outline.

use tracing::trace;

use super::LineProximity;
use crate::geometry::{
    ChunkBetweenIntersections, ChunkCollection, ContourPoint, LinePointUv, SegmentwiseList,
};
use crate::math::distance_2d::closest_on_segment;
use crate::math::intersect_2d::segment_segment_intersect;
use crate::math::vector_2d::{left_normal, normalized_or_zero, sign_non_zero};
use crate::math::{Point2, Vector2};

/// Blends the UV of the closest original line point and the closest extruded
/// point by how far `point` is from the line, relative to `|amount|`.
#[must_use]
pub fn between_original_and_extruded(
    point: &Point2,
    original: &LinePointUv,
    original_direction: &Vector2,
    extruded: &ContourPoint,
    abs_amount: f64,
) -> Vector2 {
    let to_original = point - original.position;
    let normal = left_normal(original_direction);
    let original_fraction = (to_original.norm() / abs_amount).clamp(0.0, 1.0);
    let v_from_original = 0.5 + 0.5 * original_fraction * sign_non_zero(to_original.dot(&normal));
    let u_from_original = original.uv.x;

    let to_extruded = point - extruded.position;
    let extruded_fraction = 1.0 - (to_extruded.norm() / abs_amount).clamp(0.0, 1.0);
    let v_from_extruded =
        extruded.uv.y * extruded_fraction + original.uv.y * (1.0 - extruded_fraction);
    let u_from_extruded = extruded.uv.x;

    let u = u_from_original * (1.0 - original_fraction) + u_from_extruded * original_fraction;
    let v = v_from_original * (1.0 - original_fraction) + v_from_extruded * original_fraction;
    Vector2::new(u, v)
}

/// Closest point over several closed contours, with interpolated UV.
#[must_use]
pub fn closest_on_contours(
    point: &Point2,
    contours: &[SegmentwiseList<ContourPoint>],
    reach: f64,
) -> Option<ContourPoint> {
    let mut best: Option<(f64, ContourPoint)> = None;
    for contour in contours {
        let Some(closest) = contour.closest_point(point, reach) else {
            continue;
        };
        if best.is_none_or(|(d, _)| closest.distance_squared < d) {
            let i = closest.segment_index;
            let pts = contour.points();
            best = Some((
                closest.distance_squared,
                pts[i].average_with(&pts[i + 1], closest.fraction),
            ));
        }
    }
    best.map(|(_, p)| p)
}

/// First crossing of the segment `from -> to` with a removed contour,
/// measured along the segment.
#[must_use]
pub fn removed_crossing(
    from: &Point2,
    to: &Point2,
    removed: &[Vec<ContourPoint>],
) -> Option<ContourPoint> {
    let mut best: Option<(f64, ContourPoint)> = None;
    for contour in removed {
        for pair in contour.windows(2) {
            let Some(hit) =
                segment_segment_intersect(from, to, &pair[0].position, &pair[1].position)
            else {
                continue;
            };
            if best.is_none_or(|(f, _)| hit.fraction_1 < f) {
                best = Some((hit.fraction_1, pair[0].average_with(&pair[1], hit.fraction_2)));
            }
        }
    }
    best.map(|(_, p)| p)
}

/// Blend toward the closest point of the UV-altered contours.
///
/// When the way from that point to `point` crosses a removed contour the
/// plain blend is still used; the region behind a removed chunk has no
/// better-defined UV.
#[must_use]
pub fn original_and_extruded_altered(
    point: &Point2,
    line: &SegmentwiseList<LinePointUv>,
    altered_contours: &[SegmentwiseList<ContourPoint>],
    removed_contours: &[Vec<ContourPoint>],
    amount: f64,
) -> Vector2 {
    let abs_amount = amount.abs();
    let (Some(original), Some(extruded)) = (
        LineProximity::find(point, line, abs_amount),
        closest_on_contours(point, altered_contours, abs_amount),
    ) else {
        return Vector2::new(0.0, 0.5);
    };
    if removed_crossing(&extruded.position, point, removed_contours).is_some() {
        trace!(x = point.x, y = point.y, "blend crosses a removed contour");
    }
    between_original_and_extruded(
        point,
        &original.line_point,
        &normalized_or_zero(&original.closest.segment_difference),
        &extruded,
        abs_amount,
    )
}

/// Blend toward the closest point of the chunk outlines, splitting the UV
/// jump at an intersection by angle.
///
/// Besides each chunk's interior polyline, the segments joining the chunk's
/// intersections to its first and last interior points are searched. When
/// the closest point is an intersection, its UV is interpolated between the
/// two chunks meeting there by how far `point` lies angularly from each
/// chunk's end normal.
#[must_use]
pub fn anglewise_weighted(
    point: &Point2,
    line: &SegmentwiseList<LinePointUv>,
    collections: &[ChunkCollection],
    amount: f64,
) -> Vector2 {
    let abs_amount = amount.abs();
    let (Some(original), Some(extruded)) = (
        LineProximity::find(point, line, abs_amount),
        closest_on_chunks(point, collections, abs_amount),
    ) else {
        return Vector2::new(0.0, 0.5);
    };
    between_original_and_extruded(
        point,
        &original.line_point,
        &normalized_or_zero(&original.closest.segment_difference),
        &extruded,
        abs_amount,
    )
}

#[derive(Clone, Copy)]
enum ChunkEnd {
    Start,
    End,
}

/// Closest point over every chunk of every collection.
#[must_use]
pub fn closest_on_chunks(
    point: &Point2,
    collections: &[ChunkCollection],
    reach: f64,
) -> Option<ContourPoint> {
    let mut best: Option<(f64, ContourPoint)> = None;
    for collection in collections {
        let chunks = &collection.chunks;
        for (k, chunk) in chunks.iter().enumerate() {
            if let Some(closest) = chunk.points.closest_point(point, reach) {
                if best.is_none_or(|(d, _)| closest.distance_squared < d) {
                    let i = closest.segment_index;
                    let pts = chunk.points.points();
                    let a = ContourPoint::from(pts[i]);
                    let b = ContourPoint::from(pts[i + 1]);
                    best = Some((closest.distance_squared, a.average_with(&b, closest.fraction)));
                }
            }
            for end in [ChunkEnd::Start, ChunkEnd::End] {
                if let Some(candidate) = closest_on_chunk_end(point, chunks, k, end) {
                    if best.is_none_or(|(d, _)| candidate.0 < d) {
                        best = Some(candidate);
                    }
                }
            }
        }
    }
    best.map(|(_, p)| p)
}

/// Closest point on the segment between a chunk's intersection and its
/// neighbouring interior point.
fn closest_on_chunk_end(
    point: &Point2,
    chunks: &[ChunkBetweenIntersections],
    k: usize,
    end: ChunkEnd,
) -> Option<(f64, ContourPoint)> {
    let chunk = &chunks[k];
    let n = chunks.len();
    // Segments run from the interior point toward the intersection.
    let (inner, intersection) = match end {
        ChunkEnd::Start => (chunk.point_after_start(), ContourPoint::from(chunk.start)),
        ChunkEnd::End => (chunk.point_before_end(), ContourPoint::from(chunk.end)),
    };
    let (fraction, distance_squared) =
        closest_on_segment(&inner.position, &intersection.position, point);
    let mut closest = inner.average_with(&intersection, fraction);
    if fraction < 1.0 {
        return Some((distance_squared, closest));
    }

    let own_normal = left_normal(&normalized_or_zero(&(intersection.position - inner.position)));
    let to_point = closest.position - point;
    match end {
        ChunkEnd::Start => {
            let previous = &chunks[(k + n - 1) % n];
            let previous_end = ContourPoint::from(previous.end);
            let previous_normal = left_normal(&normalized_or_zero(
                &(previous_end.position - previous.point_before_end().position),
            ));
            let fraction = angle_fraction(&previous_normal, &own_normal, &to_point);
            closest.uv = previous_end.average_with(&intersection, fraction).uv;
        }
        ChunkEnd::End => {
            let next = &chunks[(k + 1) % n];
            let next_start = ContourPoint::from(next.start);
            let next_normal = left_normal(&normalized_or_zero(
                &(next.point_after_start().position - next_start.position),
            ));
            let fraction = angle_fraction(&next_normal, &own_normal, &to_point);
            closest.uv = intersection.average_with(&next_start, fraction).uv;
        }
    }
    Some((distance_squared, closest))
}

/// Fraction toward the `next` side of a corner, from the angles between
/// `delta` and the two side normals. 0.5 when `delta` is zero.
fn angle_fraction(previous_normal: &Vector2, next_normal: &Vector2, delta: &Vector2) -> f64 {
    let direction = normalized_or_zero(delta);
    if direction == Vector2::zeros() {
        return 0.5;
    }
    let mut dot_previous = direction.dot(previous_normal);
    let mut dot_next = direction.dot(next_normal);
    let s = sign_non_zero(dot_previous * dot_next);
    dot_previous *= s;
    dot_next *= s;
    let angle_previous = dot_previous.clamp(-1.0, 1.0).acos();
    let angle_next = dot_next.clamp(-1.0, 1.0).acos();
    let total = angle_previous + angle_next;
    if total > 0.0 {
        angle_next / total
    } else {
        0.5
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{ExtrudedPoint, IntersectionPoint};

    const TOL: f64 = 1e-12;

    fn lp(x: f64, u: f64) -> LinePointUv {
        LinePointUv::new(x, Point2::new(x, 0.0), Vector2::new(u, 0.5))
    }

    fn cp(x: f64, y: f64, u: f64, v: f64) -> ContourPoint {
        ContourPoint::new(Point2::new(x, y), Vector2::new(u, v))
    }

    // ── blend formula ──

    #[test]
    fn on_the_line_takes_original_uv() {
        let uv = between_original_and_extruded(
            &Point2::new(1.0, 0.0),
            &lp(1.0, 1.0),
            &Vector2::new(1.0, 0.0),
            &cp(1.2, 0.1, 7.0, 1.0),
            0.1,
        );
        assert!((uv.x - 1.0).abs() < TOL);
        assert!((uv.y - 0.5).abs() < TOL);
    }

    #[test]
    fn at_extrusion_distance_takes_extruded_uv() {
        let uv = between_original_and_extruded(
            &Point2::new(1.0, 0.1),
            &lp(1.0, 1.0),
            &Vector2::new(1.0, 0.0),
            &cp(1.0, 0.1, 1.3, 1.0),
            0.1,
        );
        assert!((uv.x - 1.3).abs() < TOL);
        assert!((uv.y - 1.0).abs() < TOL);
    }

    #[test]
    fn halfway_right_side() {
        let uv = between_original_and_extruded(
            &Point2::new(1.0, -0.05),
            &lp(1.0, 1.0),
            &Vector2::new(1.0, 0.0),
            &cp(1.0, -0.1, 2.0, 0.0),
            0.1,
        );
        assert!((uv.x - 1.5).abs() < TOL);
        // v from line 0.25, from extruded 0.25, blended half-half.
        assert!((uv.y - 0.25).abs() < TOL);
    }

    // ── searches ──

    #[test]
    fn closest_over_several_contours() {
        let a = SegmentwiseList::new(vec![cp(0.0, 0.0, 0.0, 0.0), cp(1.0, 0.0, 1.0, 0.0)]);
        let b = SegmentwiseList::new(vec![cp(0.0, 1.0, 5.0, 1.0), cp(1.0, 1.0, 6.0, 1.0)]);
        let p = closest_on_contours(&Point2::new(0.5, 0.9), &[a, b], 1.0).unwrap();
        assert!((p.uv.x - 5.5).abs() < TOL);
    }

    #[test]
    fn first_removed_crossing_along_segment() {
        let removed = vec![
            vec![cp(2.0, -1.0, 20.0, 0.0), cp(2.0, 1.0, 20.0, 0.0)],
            vec![cp(1.0, -1.0, 10.0, 0.0), cp(1.0, 1.0, 12.0, 0.0)],
        ];
        let hit =
            removed_crossing(&Point2::new(0.0, 0.0), &Point2::new(3.0, 0.0), &removed).unwrap();
        assert!((hit.position.x - 1.0).abs() < TOL);
        assert!((hit.uv.x - 11.0).abs() < TOL);
        assert!(
            removed_crossing(&Point2::new(0.0, 0.0), &Point2::new(0.5, 0.0), &removed).is_none()
        );
    }

    #[test]
    fn angle_fraction_is_symmetric_on_bisector() {
        let f = angle_fraction(
            &Vector2::new(0.0, 1.0),
            &Vector2::new(1.0, 0.0),
            &Vector2::new(1.0, 1.0),
        );
        assert!((f - 0.5).abs() < 1e-12);
        let near_next_normal = angle_fraction(
            &Vector2::new(0.0, 1.0),
            &Vector2::new(1.0, 0.0),
            &Vector2::new(1.0, 0.1),
        );
        assert!(near_next_normal < 0.5);
        let fraction =
            angle_fraction(&Vector2::new(0.0, 1.0), &Vector2::new(1.0, 0.0), &Vector2::zeros());
        assert!((fraction - 0.5).abs() < TOL);
    }

    fn ext(x: f64, y: f64, u: f64) -> ExtrudedPoint {
        ExtrudedPoint {
            parameter: u,
            position: Point2::new(x, y),
            uv: Vector2::new(u, 1.0),
            segment_index: 0,
            segment_index_2: 0,
        }
    }

    #[test]
    fn closest_on_chunk_interiors() {
        let chunk = ChunkBetweenIntersections::new(
            IntersectionPoint::from_extruded(&ext(0.0, 0.1, 0.0)),
            IntersectionPoint::from_extruded(&ext(3.0, 0.1, 3.0)),
            SegmentwiseList::new(vec![ext(1.0, 0.1, 1.0), ext(2.0, 0.1, 2.0)]),
        );
        let collections = vec![ChunkCollection::new(vec![chunk])];
        let p = closest_on_chunks(&Point2::new(1.5, 0.0), &collections, 1.0).unwrap();
        assert!((p.uv.x - 1.5).abs() < TOL);
        let near_start = closest_on_chunks(&Point2::new(0.5, 0.0), &collections, 1.0).unwrap();
        assert!((near_start.uv.x - 0.5).abs() < TOL);
    }

    #[test]
    fn anglewise_on_straight_ribbon_matches_arclength() {
        let line =
            SegmentwiseList::new(vec![lp(0.0, 0.0), lp(1.0, 1.0), lp(2.0, 2.0), lp(3.0, 3.0)]);
        let chunk = ChunkBetweenIntersections::new(
            IntersectionPoint::from_extruded(&ext(0.0, 0.1, 0.0)),
            IntersectionPoint::from_extruded(&ext(3.0, 0.1, 3.0)),
            SegmentwiseList::new(vec![ext(1.0, 0.1, 1.0), ext(2.0, 0.1, 2.0)]),
        );
        let chunks = [ChunkCollection::new(vec![chunk])];
        let uv = anglewise_weighted(&Point2::new(1.5, 0.05), &line, &chunks, 0.1);
        assert!((uv.x - 1.5).abs() < 1e-9);
        assert!((uv.y - 0.75).abs() < 1e-9);
    }
}
