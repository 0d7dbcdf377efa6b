use std::f64::consts::PI;

use crate::config::Precision;
use crate::geometry::{ExtrudedPoint, LinePointUv};
use crate::math::vector_2d::{
    angle_between_unit, average_direction, cross, left_normal, normalized_or_zero, sign,
};
use crate::math::Vector2;

/// A source point together with the segment leaving it.
#[derive(Debug, Clone, Copy)]
struct LineSegment {
    line_point: LinePointUv,
    tangent: Vector2,
    normal: Vector2,
    length: f64,
}

impl LineSegment {
    fn between(start: &LinePointUv, end: &LinePointUv) -> Self {
        let diff = end.position - start.position;
        let tangent = normalized_or_zero(&diff);
        Self {
            line_point: *start,
            tangent,
            normal: left_normal(&tangent),
            length: diff.norm(),
        }
    }
}

/// Builds the full extruded traversal around a line: start cap, left side,
/// end cap, right side, and a repeat of the first point closing the loop.
///
/// Parameters increase strictly along the traversal. Requires at least 2
/// source points; returns an empty list otherwise.
#[must_use]
pub fn build(points: &[LinePointUv], amount: f64, precision: &Precision) -> Vec<ExtrudedPoint> {
    if points.len() < 2 {
        return Vec::new();
    }
    let gap = precision.parameter_gap;
    let first = points[0];
    let last = points[points.len() - 1];

    let forward: Vec<LineSegment> = points
        .windows(2)
        .map(|w| LineSegment::between(&w[0], &w[1]))
        .collect();
    let reversed = reversed_segments(&forward, &last);

    // Step 1: start cap.
    let cap_forward = cap(&forward, amount, 0.0, false, precision);

    // Step 2: left side.
    let shift = last_parameter(&cap_forward) + gap;
    let mut side_forward = side(&forward, &last, amount, shift, false, precision);
    set_v(&mut side_forward, 1.0);

    // Step 3: end cap.
    let shift = last_parameter(&side_forward) + gap;
    let cap_backward = cap(&reversed, amount, shift, true, precision);

    // Step 4: right side, ending at the first source point.
    let shift = last_parameter(&cap_backward) + first.parameter + gap;
    let reversed_last = first.with_parameter(last.parameter);
    let mut side_backward = side(&reversed, &reversed_last, amount, shift, true, precision);
    set_v(&mut side_backward, 0.0);

    let closing_parameter = last_parameter(&side_backward) + gap;
    let mut all = Vec::with_capacity(
        cap_forward.len() + side_forward.len() + cap_backward.len() + side_backward.len() + 1,
    );
    let closing = cap_forward.first().map(|p| ExtrudedPoint {
        parameter: closing_parameter,
        ..*p
    });
    all.extend(cap_forward);
    all.extend(side_forward);
    all.extend(cap_backward);
    all.extend(side_backward);
    // Step 5: close the loop.
    all.extend(closing);
    all
}

/// Segments walked from the last point back to the first, with parameters
/// mirrored so they still increase.
fn reversed_segments(forward: &[LineSegment], last: &LinePointUv) -> Vec<LineSegment> {
    let Some(first) = forward.first() else {
        return Vec::new();
    };
    let mirror = first.line_point.parameter + last.parameter;
    let end = forward.len() - 1;
    (0..=end)
        .rev()
        .map(|i| {
            let origin = if i == end {
                *last
            } else {
                forward[i + 1].line_point
            };
            LineSegment {
                line_point: origin.with_parameter(mirror - origin.parameter),
                tangent: -forward[i].tangent,
                normal: -forward[i].normal,
                length: forward[i].length,
            }
        })
        .collect()
}

fn last_parameter(points: &[ExtrudedPoint]) -> f64 {
    points.last().map_or(0.0, |p| p.parameter)
}

fn set_v(points: &mut [ExtrudedPoint], v: f64) {
    for p in points {
        p.uv.y = v;
    }
}

/// Semicircular cap around the start of `segments`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn cap(
    segments: &[LineSegment],
    amount: f64,
    shift: f64,
    reversed: bool,
    precision: &Precision,
) -> Vec<ExtrudedPoint> {
    let Some(start) = segments.first() else {
        return Vec::new();
    };
    let normal = start.normal;
    let minus_tangent = -start.tangent;
    let flip = if reversed { -1.0 } else { 1.0 };
    let normal_uv = Vector2::new(0.0, flip);
    let tangent_uv = Vector2::new(-flip, 0.0);

    let half_circle = PI * amount.abs();
    let estimate = if start.length > 0.0 {
        (half_circle / start.length).ceil()
    } else {
        0.0
    };
    let min_points = precision.cap_min_points.max(1);
    let mut count = if estimate.is_finite() && estimate > 0.0 {
        estimate as usize
    } else {
        0
    };
    if count < min_points {
        count = min_points;
    } else if count % 2 == 0 {
        // Odd counts put a point at the cap tip.
        count += 1;
    }

    let index = if reversed { segments.len() } else { 0 };
    let base = start.line_point;
    (0..count)
        .map(|i| {
            let along = (i + 1) as f64 / (count + 1) as f64;
            let f = 1.0 - along;
            let (dir, dir_uv) = if f <= 0.5 {
                (
                    average_direction(&normal, &minus_tangent, f * 2.0),
                    average_direction(&normal_uv, &tangent_uv, f * 2.0),
                )
            } else {
                (
                    average_direction(&minus_tangent, &-normal, (f - 0.5) * 2.0),
                    average_direction(&tangent_uv, &-normal_uv, (f - 0.5) * 2.0),
                )
            };
            let delta_uv = Vector2::new(dir_uv.x * amount, dir_uv.y * 0.5);
            ExtrudedPoint {
                parameter: along + shift,
                position: base.position + dir * amount,
                uv: base.uv + delta_uv,
                segment_index: index,
                segment_index_2: index,
            }
        })
        .collect()
}

/// One side of the line: offsets of every vertex, with miters at concave
/// corners and fans at convex ones.
fn side(
    segments: &[LineSegment],
    last: &LinePointUv,
    amount: f64,
    shift: f64,
    reversed: bool,
    precision: &Precision,
) -> Vec<ExtrudedPoint> {
    let count = segments.len();
    let mut out = Vec::with_capacity(count + 1);
    if count == 0 {
        return out;
    }
    let parameter = |p: f64| shift + p;

    let first = &segments[0];
    out.push(ExtrudedPoint::offset(
        &first.line_point,
        parameter(first.line_point.parameter),
        &first.normal,
        amount,
        if reversed { count } else { 0 },
    ));

    for i in 1..count {
        let index = if reversed { count - i } else { i };
        let next = if i + 1 < count {
            segments[i + 1].line_point
        } else {
            *last
        };
        corner(
            &segments[i - 1],
            &segments[i],
            &next,
            index,
            amount,
            &parameter,
            precision,
            &mut out,
        );
    }

    let final_segment = &segments[count - 1];
    out.push(ExtrudedPoint::offset(
        last,
        parameter(last.parameter),
        &final_segment.normal,
        amount,
        if reversed { 0 } else { count },
    ));
    out
}

/// Signed position of the offset-line intersection along the previous
/// tangent, when the corner is concave on the extrusion side.
fn concave_fraction(previous: &Vector2, current: &Vector2, amount: f64) -> Option<f64> {
    let c = cross(current, previous);
    if c == 0.0 {
        return None;
    }
    let fraction = sign(amount) * (1.0 - previous.dot(current)) / c;
    (fraction <= 0.0).then_some(fraction)
}

#[allow(clippy::too_many_arguments)]
fn corner(
    previous: &LineSegment,
    current: &LineSegment,
    next: &LinePointUv,
    index: usize,
    amount: f64,
    parameter: &impl Fn(f64) -> f64,
    precision: &Precision,
    out: &mut Vec<ExtrudedPoint>,
) {
    let point = &current.line_point;
    let previous_index = index.saturating_sub(1);

    if let Some(fraction) = concave_fraction(&previous.tangent, &current.tangent, amount) {
        let along = (fraction * amount).abs();
        if along >= previous.length.min(current.length) {
            // The offset lines meet outside a segment; any points here end up
            // in chunks removed later unless one segment is long enough.
            if along < previous.length.max(current.length) {
                out.push(ExtrudedPoint::offset(
                    point,
                    parameter(point.parameter),
                    &previous.normal,
                    amount,
                    previous_index,
                ));
                out.push(ExtrudedPoint::offset(
                    point,
                    parameter(point.parameter),
                    &current.normal,
                    amount,
                    index,
                ));
            }
        } else {
            let position = point.position
                + left_normal(&previous.tangent) * amount
                + previous.tangent * (amount.abs() * fraction);
            out.push(ExtrudedPoint {
                parameter: parameter(point.parameter),
                position,
                uv: point.uv,
                segment_index: index,
                segment_index_2: previous_index,
            });
        }
        return;
    }

    fan(
        previous,
        current,
        next,
        index,
        amount,
        parameter,
        precision,
        out,
    );
}

#[allow(
    clippy::too_many_arguments,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn fan(
    previous: &LineSegment,
    current: &LineSegment,
    next: &LinePointUv,
    index: usize,
    amount: f64,
    parameter: &impl Fn(f64) -> f64,
    precision: &Precision,
    out: &mut Vec<ExtrudedPoint>,
) {
    let point = &current.line_point;
    let previous_index = index.saturating_sub(1);
    let abs_amount = amount.abs();

    let range_start = lerp(
        parameter(previous.line_point.parameter),
        parameter(point.parameter),
        0.6,
    );
    let range_end = lerp(parameter(point.parameter), parameter(next.parameter), 0.4);

    let diff = ((current.normal - previous.normal) * amount).norm();
    let comparison = previous.length.min(current.length).min(abs_amount);
    let angle = angle_between_unit(&previous.normal, &current.normal);

    let mut from_distance = if comparison > 0.0 {
        let n = (diff / comparison).ceil();
        if n.is_finite() {
            n as usize
        } else {
            0
        }
    } else {
        0
    };
    if from_distance <= 2 {
        from_distance += 1;
    }
    let from_angle = (angle / precision.fan_min_angle_deg.to_radians()).ceil() as usize;
    let count = from_distance.max(from_angle);

    let arc_length = angle * abs_amount;
    for i in 0..count {
        let f = if count == 1 {
            0.5
        } else {
            i as f64 / (count - 1) as f64
        };
        let tangent = average_direction(&previous.tangent, &current.tangent, f);
        let position = point.position + left_normal(&tangent) * amount;

        let in_previous_half = f < 0.5;
        let from_neighbour = if in_previous_half { f } else { 1.0 - f };
        let neighbour_length = if in_previous_half {
            previous.length
        } else {
            current.length
        };
        let half_length = 0.5 * neighbour_length;
        let reach = half_length + 0.5 * arc_length;
        let t = if reach > 0.0 {
            (half_length + from_neighbour * arc_length) / reach
        } else {
            1.0
        };
        let neighbour = if in_previous_half {
            previous.line_point
        } else {
            *next
        };
        let midpoint_uv = neighbour.average_with(point, 0.5).uv;
        let uv = midpoint_uv * (1.0 - t) + point.uv * t;

        out.push(ExtrudedPoint {
            parameter: lerp(range_start, range_end, f),
            position,
            uv,
            segment_index: index,
            segment_index_2: previous_index,
        });
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
