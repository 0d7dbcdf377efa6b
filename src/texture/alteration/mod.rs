//! Rewrites of the `u` coordinate along a finished contour.
//!
//! Offsetting a curved line compresses `u` on the inside of every bend and
//! stretches it on the outside. The alterations smooth or redistribute `u`
//! along the contour's own arclength; positions and `v` are left untouched.

mod convolution;
mod spring;
mod stretching;

use crate::config::Precision;
use crate::geometry::ContourPoint;

/// How the `u` coordinates of a contour are rewritten before triangulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UvAlteration {
    /// Keep the `u` of the offset construction.
    None,
    /// Gaussian smoothing of `u` over arclength, width `|amount|`.
    #[default]
    Convolution,
    /// Relax `u` toward spacing proportional to arclength.
    SpringApproximation,
    /// Respace `u` by arclength between curvature inflection points.
    CurvatureInflectionPoints,
    /// Respace `u` by arclength between points midway between curvature maxima.
    CurvatureLocalMaxima,
    /// Respace `u` by arclength between points midway between high-curvature runs.
    CurvatureRiseAndFall,
}

impl UvAlteration {
    /// Returns a copy of `contour` with rewritten `u` coordinates.
    ///
    /// A contour whose first and last points are equal is treated as closed;
    /// its last point keeps the first point's `u`.
    #[must_use]
    pub fn apply(
        &self,
        contour: &[ContourPoint],
        amount: f64,
        precision: &Precision,
    ) -> Vec<ContourPoint> {
        match self {
            Self::None => contour.to_vec(),
            Self::Convolution => convolution::alter(contour, amount, precision),
            Self::SpringApproximation => spring::alter(contour, precision),
            Self::CurvatureInflectionPoints => {
                stretching::alter(contour, stretching::Anchors::InflectionPoints, precision)
            }
            Self::CurvatureLocalMaxima => {
                stretching::alter(contour, stretching::Anchors::LocalMaxima, precision)
            }
            Self::CurvatureRiseAndFall => {
                stretching::alter(contour, stretching::Anchors::RiseAndFall, precision)
            }
        }
    }
}

fn is_closed(contour: &[ContourPoint]) -> bool {
    contour.len() > 1 && contour.first() == contour.last()
}

/// Cumulative arclength at each point, starting at 0.
fn arclengths(contour: &[ContourPoint]) -> Vec<f64> {
    let mut total = 0.0;
    let mut out = Vec::with_capacity(contour.len());
    for (i, p) in contour.iter().enumerate() {
        if i > 0 {
            total += (p.position - contour[i - 1].position).norm();
        }
        out.push(total);
    }
    out
}

/// Copies `contour` with `u` replaced by `us`.
fn with_u(contour: &[ContourPoint], us: &[f64]) -> Vec<ContourPoint> {
    contour
        .iter()
        .zip(us)
        .map(|(p, &u)| {
            let mut q = *p;
            q.uv.x = u;
            q
        })
        .collect()
}
