use crate::config::Precision;
use crate::geometry::{ContourPoint, MonotonicChunk, SegmentwiseCoverage};

/// Monotonic decomposition of the final contours.
///
/// `increasing[i]` and `decreasing[i]` belong to the same contour. Contours
/// that do not split into two monotonic runs contribute to neither list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectedSegmentsResults {
    pub increasing: Vec<MonotonicChunk>,
    pub decreasing: Vec<MonotonicChunk>,
    /// Matched point pairs, present only for a single contour that splits
    /// into exactly one increasing and one decreasing run.
    pub coverage: Option<SegmentwiseCoverage>,
}

impl ConnectedSegmentsResults {
    #[must_use]
    pub fn from_contours(contours: &[Vec<ContourPoint>], precision: &Precision) -> Self {
        let mut increasing = Vec::new();
        let mut decreasing = Vec::new();
        for contour in contours {
            if let Some((inc, dec)) = monotonic_chunks(contour) {
                increasing.push(inc);
                decreasing.push(dec);
            }
        }
        let coverage = if contours.len() == 1 && increasing.len() == 1 && decreasing.len() == 1 {
            coverage(&increasing[0], &decreasing[0], precision)
        } else {
            None
        };
        Self {
            increasing,
            decreasing,
            coverage,
        }
    }
}

/// Splits a contour at its minimum and maximum `u` into two runs of
/// non-decreasing `u`.
///
/// The increasing run walks forward from the minimum to the maximum, the
/// decreasing run walks backward; both are stored in ascending `u` order.
/// A repeated closing point is ignored. Returns `None` if either walk
/// reverses direction in `u`.
#[must_use]
pub fn monotonic_chunks(contour: &[ContourPoint]) -> Option<(MonotonicChunk, MonotonicChunk)> {
    let periodic = contour.len() > 1 && contour.first() == contour.last();
    let m = if periodic { contour.len() - 1 } else { contour.len() };
    if m < 2 {
        return None;
    }
    let mut min_index = 0;
    let mut max_index = 0;
    for (i, p) in contour[..m].iter().enumerate() {
        if p.uv.x < contour[min_index].uv.x {
            min_index = i;
        }
        if p.uv.x > contour[max_index].uv.x {
            max_index = i;
        }
    }

    let max_shifted = if max_index < min_index { max_index + m } else { max_index };
    let increasing = collect_monotonic(
        (min_index + 1..=max_shifted).map(|k| contour[k % m]),
        contour[min_index],
    )?;

    let min_shifted = if min_index < max_index { min_index + m } else { min_index };
    let decreasing = collect_monotonic(
        (max_index..min_shifted).rev().map(|k| contour[k % m]),
        contour[min_shifted % m],
    )?;

    Some((
        MonotonicChunk::new(increasing, false),
        MonotonicChunk::new(decreasing, true),
    ))
}

fn collect_monotonic(
    rest: impl Iterator<Item = ContourPoint>,
    first: ContourPoint,
) -> Option<Vec<ContourPoint>> {
    let mut points = vec![first];
    let mut previous_u = first.uv.x;
    for p in rest {
        if p.uv.x < previous_u {
            return None;
        }
        previous_u = p.uv.x;
        points.push(p);
    }
    Some(points)
}

#[derive(Clone, Copy)]
enum Source {
    Increasing(usize),
    Decreasing(usize),
}

/// Pairs every interior point of one run with the point of equal `u` on the
/// other run. Returns `None` if either run is empty.
#[must_use]
pub fn coverage(
    increasing: &MonotonicChunk,
    decreasing: &MonotonicChunk,
    precision: &Precision,
) -> Option<SegmentwiseCoverage> {
    let inc = &increasing.points;
    let dec = &decreasing.points;
    let first_point = *inc.first()?;
    let last_point = *dec.last()?;

    let mut samples: Vec<(f64, Source)> = Vec::with_capacity(inc.len() + dec.len());
    samples.extend(
        inc.iter()
            .take(inc.len().saturating_sub(1))
            .enumerate()
            .map(|(i, p)| (p.uv.x, Source::Increasing(i))),
    );
    samples.extend(
        dec.iter()
            .enumerate()
            .skip(1)
            .map(|(i, p)| (p.uv.x, Source::Decreasing(i))),
    );
    samples.sort_by(|a, b| a.0.total_cmp(&b.0));
    // The extremes are the shared minimum and maximum points.
    let interior = if samples.len() > 2 {
        &samples[1..samples.len() - 1]
    } else {
        &samples[..0]
    };

    let mut inc_pairs = Vec::with_capacity(interior.len());
    let mut dec_pairs = Vec::with_capacity(interior.len());
    for &(u, source) in interior {
        let pair = match source {
            Source::Increasing(i) => decreasing.closest_point(u).map(|d| (inc[i], d)),
            Source::Decreasing(i) => increasing.closest_point(u).map(|p| (p, dec[i])),
        };
        if let Some((a, b)) = pair {
            inc_pairs.push(a);
            dec_pairs.push(b);
        }
    }

    let coincide = |a: &ContourPoint, b: &ContourPoint| {
        (a.position - b.position).norm() < precision.connected_distance_epsilon
            && (a.uv.x - b.uv.x).abs() < precision.connected_u_epsilon
    };
    for i in (1..inc_pairs.len()).rev() {
        if coincide(&inc_pairs[i], &inc_pairs[i - 1])
            && coincide(&dec_pairs[i], &dec_pairs[i - 1])
        {
            inc_pairs.remove(i);
            dec_pairs.remove(i);
        }
    }

    Some(SegmentwiseCoverage {
        first_point,
        last_point,
        increasing: inc_pairs,
        decreasing: dec_pairs,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{Point2, Vector2};

    const TOL: f64 = 1e-12;

    fn cp(x: f64, y: f64, u: f64) -> ContourPoint {
        ContourPoint::new(Point2::new(x, y), Vector2::new(u, 0.5))
    }

    /// Closed rectangle-like ribbon: bottom side with rising `u`, top side
    /// walked back with falling `u`.
    fn ribbon() -> Vec<ContourPoint> {
        let mut c = vec![
            cp(0.0, 0.0, 0.0),
            cp(1.0, -1.0, 1.0),
            cp(2.0, -1.0, 2.0),
            cp(3.0, -1.0, 3.0),
            cp(4.0, 0.0, 4.0),
            cp(3.0, 1.0, 3.0),
            cp(2.0, 1.0, 2.0),
            cp(1.0, 1.0, 1.0),
        ];
        c.push(c[0]);
        c
    }

    // ── monotonic split ──

    #[test]
    fn ribbon_splits_into_two_runs() {
        let (inc, dec) = monotonic_chunks(&ribbon()).unwrap();
        assert_eq!(inc.points.len(), 5);
        assert_eq!(dec.points.len(), 5);
        assert!(!inc.is_reversed);
        assert!(dec.is_reversed);
        assert!((inc.min_u).abs() < TOL && (inc.max_u - 4.0).abs() < TOL);
        assert!((dec.points[1].position.y - 1.0).abs() < TOL);
        assert!((dec.points[4].position.x - 4.0).abs() < TOL);
    }

    #[test]
    fn rotation_does_not_change_split() {
        let mut c = ribbon();
        c.pop();
        c.rotate_left(3);
        c.push(c[0]);
        let (inc, dec) = monotonic_chunks(&c).unwrap();
        assert_eq!(inc.points.len(), 5);
        assert_eq!(dec.points.len(), 5);
        assert!((inc.points[0].uv.x).abs() < TOL);
    }

    #[test]
    fn reversal_fails_split() {
        let mut c = ribbon();
        c[2].uv.x = 0.5;
        assert!(monotonic_chunks(&c).is_none());
    }

    // ── coverage ──

    #[test]
    fn coverage_pairs_equal_u() {
        let (inc, dec) = monotonic_chunks(&ribbon()).unwrap();
        let cov = coverage(&inc, &dec, &Precision::default()).unwrap();
        assert_eq!(cov.increasing.len(), cov.decreasing.len());
        // u = 1, 2, 3 appear on both sides; duplicates are pruned.
        assert_eq!(cov.increasing.len(), 3);
        for (a, b) in cov.increasing.iter().zip(&cov.decreasing) {
            assert!((a.uv.x - b.uv.x).abs() < TOL);
            assert!(a.position.y < 0.0 && b.position.y > 0.0);
        }
        assert!((cov.first_point.uv.x).abs() < TOL);
        assert!((cov.last_point.uv.x - 4.0).abs() < TOL);
    }

    #[test]
    fn coverage_interpolates_unmatched_u() {
        let mut c = ribbon();
        c[6].uv.x = 2.5;
        let (inc, dec) = monotonic_chunks(&c).unwrap();
        let cov = coverage(&inc, &dec, &Precision::default()).unwrap();
        let matched = cov
            .increasing
            .iter()
            .find(|p| (p.uv.x - 2.5).abs() < TOL)
            .unwrap();
        assert!((matched.position.x - 2.5).abs() < 1e-12);
    }

    #[test]
    fn results_only_cover_single_contour() {
        let p = Precision::default();
        let one = ConnectedSegmentsResults::from_contours(&[ribbon()], &p);
        assert!(one.coverage.is_some());
        let two = ConnectedSegmentsResults::from_contours(&[ribbon(), ribbon()], &p);
        assert_eq!(two.increasing.len(), 2);
        assert!(two.coverage.is_none());
    }
}
