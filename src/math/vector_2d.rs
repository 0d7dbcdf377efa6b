use std::f64::consts::{PI, TAU};

use super::{Point2, Vector2, TOLERANCE};

/// Z component of the 3D cross product of two XY vectors.
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: &Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Normalizes `v`, returning the zero vector when `v` is (nearly) zero.
#[must_use]
pub fn normalized_or_zero(v: &Vector2) -> Vector2 {
    let len = v.norm();
    if len > TOLERANCE {
        v / len
    } else {
        Vector2::zeros()
    }
}

/// `-1`, `0` or `1` depending on the sign of `value`.
///
/// Unlike [`f64::signum`], zero maps to zero.
#[must_use]
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// `1` for non-negative values, `-1` otherwise.
#[must_use]
pub fn sign_non_zero(value: f64) -> f64 {
    if value >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Rotates from direction `from` toward direction `to` by `fraction` of the
/// smaller angle between them. Returns a unit vector.
#[must_use]
pub fn average_direction(from: &Vector2, to: &Vector2, fraction: f64) -> Vector2 {
    let start = from.y.atan2(from.x);
    let end = to.y.atan2(to.x);
    let mut diff = end - start;
    if diff > PI {
        diff -= TAU;
    } else if diff < -PI {
        diff += TAU;
    }
    let angle = start + diff * fraction;
    Vector2::new(angle.cos(), angle.sin())
}

/// Unsigned angle between two unit vectors in radians.
#[must_use]
pub fn angle_between_unit(a: &Vector2, b: &Vector2) -> f64 {
    a.dot(b).clamp(-1.0, 1.0).acos()
}

/// Signed turning angle at `curr` between the segments `prev -> curr` and
/// `curr -> next`, in radians within `[-PI/2, PI/2]`. Positive turns left.
#[must_use]
pub fn curvature_angle(prev: &Point2, curr: &Point2, next: &Point2) -> f64 {
    let incoming = normalized_or_zero(&(curr - prev));
    let outgoing = normalized_or_zero(&(next - curr));
    cross(&incoming, &outgoing).clamp(-1.0, 1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn cross_of_axes() {
        let c = cross(&Vector2::new(1.0, 0.0), &Vector2::new(0.0, 1.0));
        assert!((c - 1.0).abs() < TOL);
    }

    #[test]
    fn normal_is_left_rotation() {
        let n = left_normal(&Vector2::new(1.0, 0.0));
        assert!((n - Vector2::new(0.0, 1.0)).norm() < TOL);
    }

    #[test]
    fn zero_vector_normalizes_to_zero() {
        assert_eq!(normalized_or_zero(&Vector2::zeros()), Vector2::zeros());
    }

    #[test]
    fn average_direction_halfway() {
        let d = average_direction(&Vector2::new(1.0, 0.0), &Vector2::new(0.0, 1.0), 0.5);
        let h = 0.5_f64.sqrt();
        assert!((d - Vector2::new(h, h)).norm() < TOL, "d={d:?}");
    }

    #[test]
    fn average_direction_wraps_across_pi() {
        // From 170° to -170° passes through 180°, not through 0°.
        let a = Vector2::new(170.0_f64.to_radians().cos(), 170.0_f64.to_radians().sin());
        let b = Vector2::new((-170.0_f64).to_radians().cos(), (-170.0_f64).to_radians().sin());
        let d = average_direction(&a, &b, 0.5);
        assert!((d - Vector2::new(-1.0, 0.0)).norm() < 1e-9, "d={d:?}");
    }

    #[test]
    fn sign_of_zero_is_zero() {
        assert!(sign(0.0).abs() < TOL);
        assert!((sign(-3.0) + 1.0).abs() < TOL);
    }

    #[test]
    fn curvature_angle_of_left_turn() {
        let a = curvature_angle(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(2.0, 1.0),
        );
        assert!((a - std::f64::consts::FRAC_PI_4).abs() < 1e-12, "a={a}");
        let straight = curvature_angle(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(2.0, 0.0),
        );
        assert!(straight.abs() < TOL);
    }

    #[test]
    fn sign_non_zero_of_zero_is_one() {
        assert!((sign_non_zero(0.0) - 1.0).abs() < TOL);
        assert!((sign_non_zero(-0.5) + 1.0).abs() < TOL);
    }
}
