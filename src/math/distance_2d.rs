use super::vector_2d::cross;
use super::Point2;

/// Unclamped projection fraction of `point` onto the line through `a` and `b`.
///
/// Returns 0 for a degenerate segment.
#[must_use]
pub fn projection_fraction(a: &Point2, b: &Point2, point: &Point2) -> f64 {
    let d = b - a;
    let len_sq = d.norm_squared();
    if len_sq <= 0.0 {
        return 0.0;
    }
    (point - a).dot(&d) / len_sq
}

/// Closest point on segment `a`-`b` to `point`.
///
/// Returns the clamped fraction along the segment and the squared distance.
#[must_use]
pub fn closest_on_segment(a: &Point2, b: &Point2, point: &Point2) -> (f64, f64) {
    let t = projection_fraction(a, b, point).clamp(0.0, 1.0);
    let closest = a + (b - a) * t;
    (t, (point - closest).norm_squared())
}

/// Minimum distance from `point` to segment `a`-`b`.
#[must_use]
pub fn point_to_segment_dist(a: &Point2, b: &Point2, point: &Point2) -> f64 {
    closest_on_segment(a, b, point).1.sqrt()
}

/// Whether `point` is strictly closer than `sqrt(dist_sq)` to segment `a`-`b`.
#[must_use]
pub fn is_within_distance(a: &Point2, b: &Point2, point: &Point2, dist_sq: f64) -> bool {
    closest_on_segment(a, b, point).1 < dist_sq
}

/// Smallest endpoint-to-segment distance between two segments.
///
/// Crossing segments are not detected; callers test intersections separately.
#[must_use]
pub fn segment_to_segment_dist(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> f64 {
    point_to_segment_dist(b0, b1, a0)
        .min(point_to_segment_dist(b0, b1, a1))
        .min(point_to_segment_dist(a0, a1, b0))
        .min(point_to_segment_dist(a0, a1, b1))
}

/// Whether `point` lies on the right of the directed segment `a`-`b`.
///
/// Points on the line count as right.
#[must_use]
pub fn is_on_right_side(a: &Point2, b: &Point2, point: &Point2) -> bool {
    cross(&(point - a), &(b - a)) >= 0.0
}
