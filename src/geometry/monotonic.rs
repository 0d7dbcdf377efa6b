use super::point::ContourPoint;

/// A contour run whose `u` coordinate never decreases along `points`.
///
/// `is_reversed` marks the run that was collected walking the contour
/// backwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MonotonicChunk {
    pub points: Vec<ContourPoint>,
    pub min_u: f64,
    pub max_u: f64,
    pub is_reversed: bool,
}

impl MonotonicChunk {
    #[must_use]
    pub fn new(points: Vec<ContourPoint>, is_reversed: bool) -> Self {
        let min_u = points.first().map_or(0.0, |p| p.uv.x);
        let max_u = points.last().map_or(0.0, |p| p.uv.x);
        Self {
            points,
            min_u,
            max_u,
            is_reversed,
        }
    }

    /// Interpolated point at texture coordinate `u`.
    ///
    /// Returns `None` outside `[min_u, max_u]` or for fewer than 2 points.
    #[must_use]
    pub fn closest_point(&self, u: f64) -> Option<ContourPoint> {
        if self.points.len() < 2 || u < self.min_u || u > self.max_u {
            return None;
        }
        // First index whose u is >= the query.
        let upper = self
            .points
            .partition_point(|p| p.uv.x < u)
            .clamp(1, self.points.len() - 1);
        let a = &self.points[upper - 1];
        let b = &self.points[upper];
        let du = b.uv.x - a.uv.x;
        let fraction = if du > 0.0 {
            ((u - a.uv.x) / du).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Some(a.average_with(b, fraction))
    }
}

/// Paired points of the increasing and decreasing runs covering one contour.
///
/// `increasing[i]` and `decreasing[i]` share their `u` coordinate; together
/// with `first_point` and `last_point` they form a quad strip.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentwiseCoverage {
    pub first_point: ContourPoint,
    pub last_point: ContourPoint,
    pub increasing: Vec<ContourPoint>,
    pub decreasing: Vec<ContourPoint>,
}
