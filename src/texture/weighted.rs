use super::LineProximity;
use crate::geometry::{LinePointUv, SegmentwiseList};
use crate::math::vector_2d::{left_normal, sign_non_zero};
use crate::math::{Point2, Vector2};

/// UV of `point` from a weighted average of the `u` every original segment
/// would assign to it.
///
/// Each segment's linear `u` extrapolation is weighted by an exponential
/// kernel integrated along the segment (scale `|amount| / 4`) times an
/// exponential kernel on how far the point's perpendicular distance to that
/// segment is from its distance to the closest segment (scale `|amount| /
/// 10`). `v` follows the signed distance to the line: 0.5 on the line, 1 at
/// `|amount|` to the left and 0 at `|amount|` to the right.
#[must_use]
pub fn point_uv(point: &Point2, line: &SegmentwiseList<LinePointUv>, amount: f64) -> Vector2 {
    let abs_amount = amount.abs();
    let Some(proximity) = LineProximity::find(point, line, abs_amount) else {
        return Vector2::new(0.0, 0.5);
    };
    let closest_signed = proximity.signed_distance;

    let mut weight_total = 0.0;
    let mut u = 0.0;
    for pair in line.points().windows(2) {
        let (start, end) = (&pair[0], &pair[1]);
        let segment = end.position - start.position;
        let length = segment.norm();
        if length <= 0.0 {
            continue;
        }
        let direction = segment / length;
        let diff = point - start.position;
        let along = diff.dot(&direction);
        let perpendicular = diff - direction * along;
        let signed =
            perpendicular.norm() * sign_non_zero(perpendicular.dot(&left_normal(&direction)));

        let segment_u = start.uv.x + (along / length) * (end.uv.x - start.uv.x);
        let weight = along_segment_weight(along, length, abs_amount)
            * kernel((signed - closest_signed).abs(), abs_amount / 10.0);
        u += segment_u * weight;
        weight_total += weight;
    }
    if weight_total > 0.0 {
        u /= weight_total;
    }

    let v = 0.5 + 0.5 * closest_signed / abs_amount;
    Vector2::new(u, v)
}

/// Exponential kernel centred on the projection, integrated over the
/// segment `[0, length]`.
fn along_segment_weight(along: f64, length: f64, abs_amount: f64) -> f64 {
    let scale = abs_amount / 4.0;
    if along < 0.0 {
        integrated_kernel(length - along, scale) - integrated_kernel(-along, scale)
    } else if along > length {
        integrated_kernel(along, scale) - integrated_kernel(along - length, scale)
    } else {
        integrated_kernel(length - along, scale) + integrated_kernel(along, scale)
    }
}

fn kernel(distance: f64, scale: f64) -> f64 {
    (-distance / scale).exp()
}

fn integrated_kernel(distance: f64, scale: f64) -> f64 {
    scale * (1.0 - (-distance / scale).exp())
}
