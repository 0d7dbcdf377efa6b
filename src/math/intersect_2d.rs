use super::vector_2d::cross;
use super::Point2;

/// A single crossing between two bounded segments.
#[derive(Debug, Clone, Copy)]
pub struct SegmentHit {
    /// Intersection position.
    pub position: Point2,
    /// Fraction along the first segment.
    pub fraction_1: f64,
    /// Fraction along the second segment.
    pub fraction_2: f64,
}

/// Bounded segment-segment intersection in 2D.
///
/// Collinear overlapping segments report one hit at the midpoint of the
/// overlap (measured along the first segment). Parallel disjoint segments and
/// degenerate collinear segments report nothing.
#[must_use]
pub fn segment_segment_intersect(
    s1: &Point2,
    e1: &Point2,
    s2: &Point2,
    e2: &Point2,
) -> Option<SegmentHit> {
    let d1 = e1 - s1;
    let d2 = e2 - s2;
    let c = cross(&d1, &d2);
    let v = s2 - s1;
    let cv1 = cross(&v, &d1);

    if c == 0.0 {
        if cv1 != 0.0 {
            return None;
        }
        // Collinear.
        let m1 = d1.norm_squared();
        let m2 = d2.norm_squared();
        if m1 <= 0.0 || m2 <= 0.0 {
            return None;
        }
        let t0 = v.dot(&d1) / m1;
        let t1 = t0 + d1.dot(&d2) / m1;
        let (lo, hi) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
        if lo > 1.0 || hi < 0.0 {
            return None;
        }
        let f1 = 0.5 * (lo.clamp(0.0, 1.0) + hi.clamp(0.0, 1.0));
        let position = s1 + d1 * f1;
        let f2 = (position - s2).dot(&d2) / m2;
        return Some(SegmentHit {
            position,
            fraction_1: f1,
            fraction_2: f2,
        });
    }

    let f1 = cross(&v, &d2) / c;
    let f2 = cv1 / c;
    if (0.0..=1.0).contains(&f1) && (0.0..=1.0).contains(&f2) {
        Some(SegmentHit {
            position: s1 + d1 * f1,
            fraction_1: f1,
            fraction_2: f2,
        })
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn crossing_segments() {
        let hit = segment_segment_intersect(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0))
            .unwrap();
        assert!((hit.position - p(1.0, 1.0)).norm() < TOL);
        assert!((hit.fraction_1 - 0.5).abs() < TOL);
        assert!((hit.fraction_2 - 0.5).abs() < TOL);
    }

    #[test]
    fn touching_at_endpoint() {
        let hit = segment_segment_intersect(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, 0.0), &p(1.0, 1.0))
            .unwrap();
        assert!((hit.fraction_1 - 1.0).abs() < TOL);
        assert!(hit.fraction_2.abs() < TOL);
    }

    #[test]
    fn disjoint_segments() {
        assert!(
            segment_segment_intersect(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, -1.0), &p(2.0, 1.0))
                .is_none()
        );
    }

    #[test]
    fn parallel_segments() {
        assert!(
            segment_segment_intersect(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0), &p(1.0, 1.0))
                .is_none()
        );
    }

    #[test]
    fn collinear_overlap_reports_midpoint() {
        let hit = segment_segment_intersect(&p(0.0, 0.0), &p(4.0, 0.0), &p(2.0, 0.0), &p(6.0, 0.0))
            .unwrap();
        assert!((hit.position - p(3.0, 0.0)).norm() < TOL);
        assert!((hit.fraction_1 - 0.75).abs() < TOL);
        assert!((hit.fraction_2 - 0.25).abs() < TOL);
    }

    #[test]
    fn collinear_without_overlap() {
        assert!(
            segment_segment_intersect(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, 0.0), &p(3.0, 0.0))
                .is_none()
        );
    }
}
