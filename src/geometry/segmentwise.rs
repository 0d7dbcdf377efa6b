use super::point::Positioned;
use crate::math::distance_2d::closest_on_segment;
use crate::math::polygon_2d::max_segment_length;
use crate::math::{Point2, Vector2};

/// An ordered point list together with its longest segment length.
///
/// The maximum segment length bounds how far any polyline vertex can be from
/// its neighbour, which lets searches skip segments that cannot be close.
#[derive(Debug, Clone)]
pub struct SegmentwiseList<T> {
    points: Vec<T>,
    max_segment_length: f64,
}

/// Result of a closest-point search over a [`SegmentwiseList`].
#[derive(Debug, Clone, Copy)]
pub struct ClosestOnPolyline {
    /// Closest position on the polyline.
    pub position: Point2,
    /// Clamped fraction along segment `segment_index`.
    pub fraction: f64,
    /// Segment direction (end minus start).
    pub segment_difference: Vector2,
    pub segment_index: usize,
    pub distance_squared: f64,
}

impl<T> Default for SegmentwiseList<T> {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            max_segment_length: 0.0,
        }
    }
}

impl<T: Positioned> SegmentwiseList<T> {
    #[must_use]
    pub fn new(points: Vec<T>) -> Self {
        let max_segment_length = max_segment_length(points.iter().map(Positioned::position));
        Self {
            points,
            max_segment_length,
        }
    }

    #[must_use]
    pub fn points(&self) -> &[T] {
        &self.points
    }

    #[must_use]
    pub fn into_points(self) -> Vec<T> {
        self.points
    }

    #[must_use]
    pub fn max_segment_length(&self) -> f64 {
        self.max_segment_length
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of segments, 0 for fewer than 2 points.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Start and end position of segment `index`.
    #[must_use]
    pub fn segment(&self, index: usize) -> (Point2, Point2) {
        (
            self.points[index].position(),
            self.points[index + 1].position(),
        )
    }

    /// Finds the closest point on the polyline to `point`.
    ///
    /// Segments farther than `reach` are skipped in strides bounded by the
    /// maximum segment length, so the exact closest point is only guaranteed
    /// within `reach`. Returns `None` for fewer than 2 points.
    #[must_use]
    pub fn closest_point(&self, point: &Point2, reach: f64) -> Option<ClosestOnPolyline> {
        if self.points.len() < 2 {
            return None;
        }
        let mut best: Option<ClosestOnPolyline> = None;
        let mut i = 0;
        while i < self.points.len() - 1 {
            let (a, b) = self.segment(i);
            let (fraction, distance_squared) = closest_on_segment(&a, &b, point);
            if best.is_none_or(|c| distance_squared < c.distance_squared) {
                best = Some(ClosestOnPolyline {
                    position: a + (b - a) * fraction,
                    fraction,
                    segment_difference: b - a,
                    segment_index: i,
                    distance_squared,
                });
            }
            let gap = (distance_squared.sqrt() - reach).max(0.0);
            i = i.saturating_add(adaptive_step(gap, self.max_segment_length));
        }
        best
    }
}

/// Number of segments that can be skipped when the current one is `gap`
/// farther than the distance of interest. Always at least 1.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn adaptive_step(gap: f64, max_segment_length: f64) -> usize {
    if max_segment_length <= 0.0 || !max_segment_length.is_finite() || !gap.is_finite() {
        return 1;
    }
    (gap / max_segment_length).max(1.0).floor() as usize
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::point::LinePoint;

    fn line(points: &[(f64, f64)]) -> SegmentwiseList<LinePoint> {
        #[allow(clippy::cast_precision_loss)]
        let pts = points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| LinePoint::new(i as f64, Point2::new(x, y)))
            .collect();
        SegmentwiseList::new(pts)
    }

    #[test]
    fn tracks_max_segment_length() {
        let l = line(&[(0.0, 0.0), (1.0, 0.0), (4.0, 0.0)]);
        assert!((l.max_segment_length() - 3.0).abs() < 1e-12);
        assert_eq!(l.segment_count(), 2);
    }

    #[test]
    fn closest_point_on_middle_segment() {
        let l = line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let c = l.closest_point(&Point2::new(1.5, 0.2), 0.5).unwrap();
        assert_eq!(c.segment_index, 1);
        assert!((c.fraction - 0.5).abs() < 1e-12);
        assert!((c.distance_squared - 0.04).abs() < 1e-12);
    }

    #[test]
    fn closest_point_needs_two_points() {
        let l = line(&[(0.0, 0.0)]);
        assert!(l.closest_point(&Point2::new(0.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn dense_then_sparse_sampling_finds_far_segment() {
        // Many tiny segments followed by a single long one: the skip stride is
        // bounded by the long segment, so the point next to it is still found.
        let mut pts: Vec<(f64, f64)> = (0..=100).map(|i| (f64::from(i) * 0.01, 0.0)).collect();
        pts.push((1.0, 10.0));
        let l = line(&pts);
        let c = l.closest_point(&Point2::new(1.05, 5.0), 0.1).unwrap();
        assert_eq!(c.segment_index, 100);
        assert!(c.distance_squared < 0.01);
    }

    #[test]
    fn step_is_at_least_one() {
        assert_eq!(adaptive_step(0.0, 1.0), 1);
        assert_eq!(adaptive_step(5.5, 1.0), 5);
        assert_eq!(adaptive_step(5.5, 0.0), 1);
        assert_eq!(adaptive_step(f64::NAN, 1.0), 1);
    }
}
