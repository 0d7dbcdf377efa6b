use super::LineProximity;
use crate::geometry::{LinePointUv, SegmentwiseList};
use crate::math::distance_2d::is_on_right_side;
use crate::math::vector_2d::curvature_angle;
use crate::math::{Point2, Vector2};

/// Per-point rate at which `u` changes with distance from the original line,
/// separately for the left and right side.
///
/// Integrated from the point of least curvature outward, so the anchor keeps
/// its original `u` on both sides.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterationFractions {
    pub left: Vec<f64>,
    pub right: Vec<f64>,
}

impl AlterationFractions {
    #[must_use]
    pub fn from_line(line: &SegmentwiseList<LinePointUv>) -> Self {
        let points = line.points();
        let n = points.len();
        let angles = curvature_angles(points);
        let anchor = anchor_index(&angles);

        let mut left = vec![0.0; n];
        let mut right = vec![0.0; n];

        let (mut l, mut r) = (0.0, 0.0);
        for i in anchor + 1..n {
            l += step(-angles[i - 1], -angles[i]);
            r += step(angles[i - 1], angles[i]);
            left[i] = l;
            right[i] = r;
        }
        let (mut l, mut r) = (0.0, 0.0);
        for i in (0..anchor).rev() {
            l += step(-angles[i + 1], -angles[i]);
            r += step(angles[i + 1], angles[i]);
            left[i] = l;
            right[i] = r;
        }
        Self { left, right }
    }

    fn fraction(&self, index: usize, right_side: bool) -> f64 {
        let side = if right_side { &self.right } else { &self.left };
        side.get(index).copied().unwrap_or(0.0)
    }
}

fn step(previous: f64, next: f64) -> f64 {
    0.5 * (previous + next)
}

/// Turning angle at each interior point; the endpoints have none.
fn curvature_angles(points: &[LinePointUv]) -> Vec<f64> {
    let mut angles = vec![0.0; points.len()];
    for i in 1..points.len().saturating_sub(1) {
        angles[i] = curvature_angle(
            &points[i - 1].position,
            &points[i].position,
            &points[i + 1].position,
        );
    }
    angles
}

/// Interior point with the smallest absolute curvature. Next to either end
/// the end itself is used.
fn anchor_index(angles: &[f64]) -> usize {
    let n = angles.len();
    if n < 3 {
        return 0;
    }
    let mut best = 1;
    for i in 2..n - 1 {
        if angles[i].abs() < angles[best].abs() {
            best = i;
        }
    }
    if best == 1 {
        0
    } else if best == n - 2 {
        n - 1
    } else {
        best
    }
}

/// UV of `point` with `u` bent by the line's curvature.
///
/// `u` at a segment end is its original `u` plus the side's alteration
/// fraction times the distance from the line, interpolated along the closest
/// segment. Inside the end caps the end segment's `u` rate is extrapolated.
#[must_use]
pub fn point_uv(
    point: &Point2,
    line: &SegmentwiseList<LinePointUv>,
    fractions: &AlterationFractions,
    amount: f64,
) -> Vector2 {
    let abs_amount = amount.abs();
    let Some(proximity) = LineProximity::find(point, line, abs_amount) else {
        return Vector2::new(0.0, 0.5);
    };
    let closest = proximity.closest;
    let i = closest.segment_index;
    let points = line.points();
    let (start, end) = (&points[i], &points[i + 1]);
    let right_side = is_on_right_side(&start.position, &end.position, point);
    let distance = proximity.signed_distance.abs();

    let altered = |index: usize, original: &LinePointUv| {
        original.uv.x + fractions.fraction(index, right_side) * distance
    };
    let u_start = altered(i, start);
    let u_end = altered(i + 1, end);

    let u = if proximity.is_in_end_cap(line.segment_count()) {
        let endpoint_u = if i == 0 && closest.fraction <= 0.0 {
            u_start
        } else {
            u_end
        };
        let length = closest.segment_difference.norm();
        if length > 0.0 {
            let along = (point - closest.position).dot(&(closest.segment_difference / length));
            endpoint_u + along * (u_end - u_start) / length
        } else {
            endpoint_u
        }
    } else {
        u_start * (1.0 - closest.fraction) + u_end * closest.fraction
    };

    let v = 0.5 + 0.5 * proximity.signed_distance / abs_amount;
    Vector2::new(u, v)
}
