use std::f64::consts::{PI, SQRT_2};

use super::{arclengths, is_closed, with_u};
use crate::config::Precision;
use crate::geometry::ContourPoint;
use crate::math::erf::erf;

/// Convolves the piecewise-linear `u(s)` with a Gaussian over arclength `s`.
///
/// The kernel width is `convolution_width_fraction * |amount|`. On a closed
/// contour arclengths are wrapped to the nearer side of each point, and the
/// segment straddling the far side is skipped. Contours of fewer than three
/// points are returned unchanged.
pub(super) fn alter(
    contour: &[ContourPoint],
    amount: f64,
    precision: &Precision,
) -> Vec<ContourPoint> {
    let sigma = precision.convolution_width_fraction * amount.abs();
    if contour.len() <= 2 || sigma <= 0.0 || !sigma.is_finite() {
        return contour.to_vec();
    }
    let closed = is_closed(contour);
    let n = contour.len();
    let point_count = if closed { n - 1 } else { n };
    let us: Vec<f64> = contour.iter().map(|p| p.uv.x).collect();
    let arcs = arclengths(contour);

    let mut convolved = us.clone();
    for i in 0..point_count {
        convolved[i] = if closed {
            let wrapped = wrap_around(&arcs, arcs[i]);
            convolve_at(0.0, &us, &wrapped, sigma)
        } else {
            convolve_at(arcs[i], &us, &arcs, sigma)
        };
    }
    if closed {
        convolved[n - 1] = convolved[0];
    }
    with_u(contour, &convolved)
}

/// Arclengths relative to `origin`, shifted by whole periods into
/// `[-L/2, L/2]`.
fn wrap_around(arcs: &[f64], origin: f64) -> Vec<f64> {
    let period = arcs.last().copied().unwrap_or(0.0);
    let half = 0.5 * period;
    arcs.iter()
        .map(|&s| {
            let mut d = s - origin;
            if period > 0.0 {
                while d < -half {
                    d += period;
                }
                while d > half {
                    d -= period;
                }
            }
            d
        })
        .collect()
}

fn convolve_at(at: f64, us: &[f64], arcs: &[f64], sigma: f64) -> f64 {
    let mut sum = 0.0;
    for j in 0..us.len() - 1 {
        let (start, end) = (arcs[j], arcs[j + 1]);
        let length = end - start;
        if length <= 0.0 {
            continue;
        }
        let du = us[j + 1] - us[j];
        let factor = us[j] + du * (at - start) / length;
        sum += factor * kernel_integral(at, start, end, sigma)
            - du / length * linear_kernel_integral(at, start, end, sigma);
    }
    sum
}

/// Integral of `g(at - s)` over `s` in `[start, end]`.
fn kernel_integral(at: f64, start: f64, end: f64, sigma: f64) -> f64 {
    let scale = sigma * SQRT_2;
    0.5 * (erf((at - start) / scale) - erf((at - end) / scale))
}

/// Integral of `(at - s) g(at - s)` over `s` in `[start, end]`.
fn linear_kernel_integral(at: f64, start: f64, end: f64, sigma: f64) -> f64 {
    let two_sigma_sq = 2.0 * sigma * sigma;
    let gaussian = |d: f64| (-d.powi(2) / two_sigma_sq).exp();
    sigma / (2.0 * PI).sqrt() * (gaussian(at - end) - gaussian(at - start))
}
