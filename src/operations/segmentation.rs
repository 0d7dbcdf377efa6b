//! Line sources and conversion of source points into textured line points.

use crate::geometry::{LinePoint, LinePointUv};
use crate::math::polygon_2d::polyline_length;
use crate::math::{Point2, Vector2};

/// Provider of the 2D points of the line to extrude.
pub trait LineSource {
    /// Points of the line, ordered along it, with parameters increasing.
    fn line_points(&self) -> Vec<LinePoint>;
}

/// A polyline used as is. Parameters run uniformly from 0 to 1 by index.
#[derive(Debug, Clone, Default)]
pub struct Polyline {
    pub points: Vec<Point2>,
}

impl Polyline {
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }
}

impl LineSource for Polyline {
    fn line_points(&self) -> Vec<LinePoint> {
        uniform_parameters(&self.points)
    }
}

/// A polyline resampled at (approximately) uniform arclength spacing.
#[derive(Debug, Clone)]
pub struct ResampledPolyline {
    pub points: Vec<Point2>,
    /// Target distance between consecutive samples.
    pub discretization_distance: f64,
}

impl ResampledPolyline {
    #[must_use]
    pub fn new(points: Vec<Point2>, discretization_distance: f64) -> Self {
        Self {
            points,
            discretization_distance,
        }
    }
}

impl LineSource for ResampledPolyline {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn line_points(&self) -> Vec<LinePoint> {
        let length = polyline_length(&self.points);
        if self.points.len() < 2
            || length <= 0.0
            || self.discretization_distance <= 0.0
            || !self.discretization_distance.is_finite()
        {
            return uniform_parameters(&self.points);
        }

        let count = (1.0 + (length / self.discretization_distance).round()).max(2.0) as usize;
        let spacing = length / (count - 1) as f64;

        let mut samples = Vec::with_capacity(count);
        samples.push(self.points[0]);
        let mut segment = 0;
        let mut segment_start = 0.0;
        for k in 1..count - 1 {
            let target = spacing * k as f64;
            // Advance to the segment containing the target arclength.
            while segment < self.points.len() - 2 {
                let len = (self.points[segment + 1] - self.points[segment]).norm();
                if segment_start + len >= target {
                    break;
                }
                segment_start += len;
                segment += 1;
            }
            let a = self.points[segment];
            let b = self.points[segment + 1];
            let len = (b - a).norm();
            let t = if len > 0.0 {
                ((target - segment_start) / len).clamp(0.0, 1.0)
            } else {
                0.0
            };
            samples.push(a + (b - a) * t);
        }
        samples.push(self.points[self.points.len() - 1]);

        uniform_parameters(&samples)
    }
}

#[allow(clippy::cast_precision_loss)]
fn uniform_parameters(points: &[Point2]) -> Vec<LinePoint> {
    let denom = points.len().saturating_sub(1).max(1) as f64;
    points
        .iter()
        .enumerate()
        .map(|(i, &p)| LinePoint::new(i as f64 / denom, p))
        .collect()
}

/// Attaches texture coordinates to line points: `u` is the cumulative
/// arclength, `v` is 0.5.
#[must_use]
pub fn line_points_uv(points: &[LinePoint]) -> Vec<LinePointUv> {
    let mut distance = 0.0;
    let mut previous: Option<Point2> = None;
    points
        .iter()
        .map(|p| {
            if let Some(q) = previous {
                distance += (p.position - q).norm();
            }
            previous = Some(p.position);
            LinePointUv::new(p.parameter, p.position, Vector2::new(distance, 0.5))
        })
        .collect()
}
