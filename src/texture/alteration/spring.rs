use super::{is_closed, with_u};
use crate::config::Precision;
use crate::geometry::ContourPoint;

/// Relaxes `u` so each segment's `u` difference approaches its length.
///
/// Segment lengths keep the sign of the segment's original `u` difference.
/// Every iteration moves all points at once by `spring_gain` times the
/// discrete spring force; iteration stops after `spring_max_iterations` or
/// once no point moves by `spring_epsilon`. Neighbours wrap around the ends.
/// Contours of fewer than three points are returned unchanged.
pub(super) fn alter(contour: &[ContourPoint], precision: &Precision) -> Vec<ContourPoint> {
    if contour.len() <= 2 {
        return contour.to_vec();
    }
    let closed = is_closed(contour);
    let n = contour.len();
    let point_count = if closed { n - 1 } else { n };
    let mut us: Vec<f64> = contour.iter().map(|p| p.uv.x).collect();

    let signed_lengths: Vec<f64> = (0..point_count)
        .map(|i| {
            let next = (i + 1) % point_count;
            let length = (contour[next].position - contour[i].position).norm();
            if us[next] - us[i] >= 0.0 {
                length
            } else {
                -length
            }
        })
        .collect();

    let mut deltas = vec![0.0; point_count];
    for _ in 0..precision.spring_max_iterations {
        let mut largest: f64 = 0.0;
        for i in 0..point_count {
            let prev = (i + point_count - 1) % point_count;
            let next = (i + 1) % point_count;
            let force =
                us[prev] - 2.0 * us[i] + us[next] + signed_lengths[prev] - signed_lengths[i];
            deltas[i] = precision.spring_gain * force;
            largest = largest.max(deltas[i].abs());
        }
        for (u, d) in us.iter_mut().zip(&deltas) {
            *u += d;
        }
        if largest < precision.spring_epsilon {
            break;
        }
    }

    if closed {
        us[n - 1] = us[0];
    }
    with_u(contour, &us)
}
