//! Texture coordinates for extruded contours and triangulated points.
//!
//! The point UV strategies are pure functions of the query position, the
//! original line and the extrusion results; the alterations rewrite the `u`
//! coordinates of whole contours.

pub mod alteration;
pub mod blend;
pub mod connected_segments;
pub mod curvature_uv;
pub mod weighted;

use crate::geometry::{ClosestOnPolyline, LinePointUv, SegmentwiseList};
use crate::math::vector_2d::{left_normal, normalized_or_zero, sign_non_zero};
use crate::math::Point2;

/// Where a point sits relative to the original line.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LineProximity {
    pub closest: ClosestOnPolyline,
    /// Original line point interpolated at the closest position.
    pub line_point: LinePointUv,
    /// Distance to the closest position, negative on the right of the line.
    ///
    /// Beyond either end of the line only the component along the end
    /// segment's normal is kept.
    pub signed_distance: f64,
}

impl LineProximity {
    pub(crate) fn find(
        point: &Point2,
        line: &SegmentwiseList<LinePointUv>,
        reach: f64,
    ) -> Option<Self> {
        let closest = line.closest_point(point, reach)?;
        let points = line.points();
        let i = closest.segment_index;
        let line_point = points[i].average_with(&points[i + 1], closest.fraction);

        let normal = left_normal(&normalized_or_zero(&closest.segment_difference));
        let diff = point - closest.position;
        let signed_distance = if Self::beyond_ends(&closest, line.segment_count()) {
            normal.dot(&diff)
        } else {
            diff.norm() * sign_non_zero(normal.dot(&diff))
        };
        Some(Self {
            closest,
            line_point,
            signed_distance,
        })
    }

    fn beyond_ends(closest: &ClosestOnPolyline, segment_count: usize) -> bool {
        let in_start_cap = closest.segment_index == 0 && closest.fraction <= 0.0;
        let in_end_cap = closest.segment_index + 1 == segment_count && closest.fraction >= 1.0;
        in_start_cap || in_end_cap
    }

    /// Whether the closest position is an endpoint of the whole line.
    pub(crate) fn is_in_end_cap(&self, segment_count: usize) -> bool {
        Self::beyond_ends(&self.closest, segment_count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector2;

    fn line() -> SegmentwiseList<LinePointUv> {
        SegmentwiseList::new(
            [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]
                .iter()
                .map(|&(x, y)| LinePointUv::new(x, Point2::new(x, y), Vector2::new(x, 0.5)))
                .collect(),
        )
    }

    #[test]
    fn signed_distance_by_side() {
        let l = line();
        let left = LineProximity::find(&Point2::new(0.5, 0.3), &l, 1.0).unwrap();
        assert!((left.signed_distance - 0.3).abs() < 1e-12);
        assert!((left.line_point.uv.x - 0.5).abs() < 1e-12);
        let right = LineProximity::find(&Point2::new(1.5, -0.2), &l, 1.0).unwrap();
        assert!((right.signed_distance + 0.2).abs() < 1e-12);
    }

    #[test]
    fn end_cap_keeps_normal_component() {
        let l = line();
        let p = LineProximity::find(&Point2::new(2.3, 0.4), &l, 1.0).unwrap();
        assert!(p.is_in_end_cap(l.segment_count()));
        assert!((p.signed_distance - 0.4).abs() < 1e-12);
    }
}
