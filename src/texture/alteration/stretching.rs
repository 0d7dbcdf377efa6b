//! Arclength respacing of `u` between curvature landmarks.
//!
//! Landmark `u` values are taken from the contour's own curvature. Starting
//! at the point of least `u`, the contour is cut wherever a segment crosses a
//! landmark `u` or the centre line `v = 0.5`, and `u` is redistributed
//! linearly in arclength over each piece.

use super::{is_closed, with_u};
use crate::config::Precision;
use crate::geometry::ContourPoint;
use crate::math::vector_2d::{cross, curvature_angle, sign};

/// Source of the landmark `u` values.
#[derive(Debug, Clone, Copy)]
pub(super) enum Anchors {
    /// Middle of every segment where the turning direction flips.
    InflectionPoints,
    /// Arclength midpoints between successive prominent curvature maxima.
    LocalMaxima,
    /// Arclength midpoints of low-curvature runs between a high-curvature
    /// run falling off and the next one rising.
    RiseAndFall,
}

impl Anchors {
    fn u_values(self, points: &[ContourPoint], precision: &Precision) -> Vec<f64> {
        match self {
            Self::InflectionPoints => inflection_anchors(points),
            Self::LocalMaxima => {
                local_maxima_anchors(points, precision.local_maxima_delta_deg.to_radians())
            }
            Self::RiseAndFall => {
                rise_and_fall_anchors(points, precision.rise_and_fall_cutoff_deg.to_radians())
            }
        }
    }
}

/// Piece of the contour to respace, in unwrapped indices.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Piece {
    start: usize,
    end: usize,
}

pub(super) fn alter(
    contour: &[ContourPoint],
    anchors: Anchors,
    precision: &Precision,
) -> Vec<ContourPoint> {
    if contour.len() <= 1 {
        return contour.to_vec();
    }
    let anchor_us = anchors.u_values(contour, precision);
    let pieces = pieces(contour, &anchor_us);
    let mut us: Vec<f64> = contour.iter().map(|p| p.uv.x).collect();
    for piece in pieces {
        respace(contour, &mut us, piece);
    }
    if is_closed(contour) {
        let first = us[0];
        if let Some(last) = us.last_mut() {
            *last = first;
        }
    }
    with_u(contour, &us)
}

fn brackets(a: f64, b: f64, value: f64) -> bool {
    a.min(b) < value && a.max(b) >= value
}

/// Splits the contour, walked once around from its least-`u` point, at every
/// segment crossing an anchor `u` or `v = 0.5`.
///
/// The piece leading up to the first cut is dropped; the final piece wraps
/// around past the start and covers it.
fn pieces(points: &[ContourPoint], anchor_us: &[f64]) -> Vec<Piece> {
    if anchor_us.len() < 2 {
        return Vec::new();
    }
    let n = points.len();
    let start = points
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.uv.x.total_cmp(&b.1.uv.x))
        .map_or(0, |(i, _)| i);

    let mut out = Vec::new();
    let mut index = start;
    while index < start + n {
        let current = points[index % n].uv;
        let mut next = index + 1;
        loop {
            let candidate = points[next % n].uv;
            let crosses_anchor = anchor_us.iter().any(|&u| brackets(current.x, candidate.x, u));
            let crosses_centre = brackets(current.y, candidate.y, 0.5);
            if crosses_anchor || crosses_centre || index == start + n - 1 || next >= start + n {
                break;
            }
            next += 1;
        }
        out.push(Piece { start: index, end: next });
        index = next;
    }
    out.remove(0);
    out
}

#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn distance(points: &[ContourPoint], a: usize, b: isize) -> f64 {
    let n = points.len();
    let wrap = |i: isize| i.rem_euclid(n as isize) as usize;
    (points[wrap(b)].position - points[a % n].position).norm()
}

/// Reassigns `u` over a piece in proportion to arclength, counting half of
/// the segments that reach beyond either end.
#[allow(clippy::cast_possible_wrap)]
fn respace(points: &[ContourPoint], us: &mut [f64], piece: Piece) {
    let n = points.len();
    let (start, end) = (piece.start, piece.end);
    let begin_u = us[start % n];
    let end_u = us[end % n];

    let before_start = distance(points, start, start as isize - 1);
    let after_end = distance(points, end, end as isize + 1);
    let mut total = 0.5 * before_start + 0.5 * after_end;
    for i in start..end {
        total += distance(points, i, i as isize + 1);
    }
    if total <= 0.0 {
        return;
    }

    let mut so_far = 0.0;
    for index in start..=end {
        so_far += if index == start {
            0.5 * before_start
        } else if index == end {
            0.5 * after_end
        } else {
            distance(points, index, index as isize - 1)
        };
        us[index % n] = begin_u + (end_u - begin_u) * so_far / total;
    }
}

fn turn_sign(points: &[ContourPoint], i: usize) -> f64 {
    let a = points[i].position - points[i - 1].position;
    let b = points[i + 1].position - points[i].position;
    sign(cross(&a, &b))
}

fn angle_at(points: &[ContourPoint], i: usize) -> f64 {
    curvature_angle(
        &points[i - 1].position,
        &points[i].position,
        &points[i + 1].position,
    )
}

fn inflection_anchors(points: &[ContourPoint]) -> Vec<f64> {
    let n = points.len();
    if n <= 3 {
        return Vec::new();
    }
    (1..n - 2)
        .filter(|&i| turn_sign(points, i) * turn_sign(points, i + 1) < 0.0)
        .map(|i| 0.5 * (points[i].uv.x + points[i + 1].uv.x))
        .collect()
}

fn local_maxima_anchors(points: &[ContourPoint], delta: f64) -> Vec<f64> {
    let n = points.len();
    let mut maxima = Vec::new();
    if n >= 5 {
        let mut previous = angle_at(points, 1).abs();
        let mut current = angle_at(points, 2).abs();
        for i in 3..n - 2 {
            let next = angle_at(points, i).abs();
            if current > previous + delta && current > next + delta {
                maxima.push(i - 1);
            }
            previous = current;
            current = next;
        }
    }
    maxima
        .windows(2)
        .map(|w| midpoint_between(points, w[0], w[1]).uv.x)
        .collect()
}

fn rise_and_fall_anchors(points: &[ContourPoint], cutoff: f64) -> Vec<f64> {
    let n = points.len();
    let mut rising = Vec::new();
    let mut falling = Vec::new();
    if n >= 3 {
        let mut previous = angle_at(points, 1).abs();
        for i in 2..n.saturating_sub(2) {
            let current = angle_at(points, i).abs();
            if current >= cutoff && previous < cutoff {
                rising.push(i - 1);
            } else if previous >= cutoff && current < cutoff {
                falling.push(i - 1);
            }
            previous = current;
        }
    }

    let mut out = Vec::new();
    let (mut r, mut f) = (0, 0);
    while r < rising.len() && f < falling.len() {
        if rising[r] <= falling[f] {
            r += 1;
        } else {
            out.push(midpoint_between(points, falling[f], rising[r]).uv.x);
            r += 1;
            f += 1;
        }
    }
    out
}

/// Point halfway in arclength between two indices.
fn midpoint_between(points: &[ContourPoint], start: usize, end: usize) -> ContourPoint {
    let lengths: Vec<f64> = (start + 1..=end)
        .map(|j| (points[j].position - points[j - 1].position).norm())
        .collect();
    let target = 0.5 * lengths.iter().sum::<f64>();
    let mut partial = 0.0;
    for (k, length) in lengths.iter().enumerate() {
        partial += length;
        if partial > target {
            let j = start + 1 + k;
            let fraction = 1.0 - (partial - target) / length;
            return points[j - 1].average_with(&points[j], fraction);
        }
    }
    points[(start + end).div_ceil(2)]
}
