/// Gauss error function.
///
/// Chebyshev fit of the complementary error function, fractional error
/// below 1.2e-7 everywhere.
#[must_use]
#[allow(clippy::unreadable_literal)]
pub fn erf(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -z * z - 1.26551223
        + t * (1.00002368
            + t * (0.37409196
                + t * (0.09678418
                    + t * (-0.18628806
                        + t * (0.27886807
                            + t * (-1.13520398
                                + t * (1.48851587 + t * (-0.82215223 + t * 0.17087277))))))));
    let erfc = t * poly.exp();
    if x >= 0.0 {
        1.0 - erfc
    } else {
        erfc - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        assert!(erf(0.0).abs() < 1e-7);
        assert!((erf(1.0) - 0.842_700_792_9).abs() < 1e-6);
        assert!((erf(2.0) - 0.995_322_265_0).abs() < 1e-6);
    }

    #[test]
    fn odd_symmetry() {
        for x in [0.1, 0.5, 1.3, 3.0] {
            assert!((erf(-x) + erf(x)).abs() < 1e-12, "x={x}");
        }
    }

    #[test]
    fn saturates() {
        assert!((erf(10.0) - 1.0).abs() < 1e-12);
        assert!((erf(-10.0) + 1.0).abs() < 1e-12);
    }
}
