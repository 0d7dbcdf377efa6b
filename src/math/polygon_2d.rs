use super::Point2;

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. A repeated closing
/// point contributes nothing.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Total length of an open polyline.
#[must_use]
pub fn polyline_length(points: &[Point2]) -> f64 {
    points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
}

/// Longest segment of an open polyline, 0 for fewer than 2 points.
#[must_use]
pub fn max_segment_length(points: impl IntoIterator<Item = Point2>) -> f64 {
    let mut max = 0.0_f64;
    let mut prev: Option<Point2> = None;
    for pt in points {
        if let Some(q) = prev {
            max = max.max((pt - q).norm());
        }
        prev = Some(pt);
    }
    max
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    fn square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn signed_area_ccw_square() {
        assert!((signed_area_2d(&square()) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_cw_square() {
        let mut pts = square();
        pts.reverse();
        assert!((signed_area_2d(&pts) + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn closing_point_does_not_change_area() {
        let mut pts = square();
        pts.push(pts[0]);
        assert!((signed_area_2d(&pts) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn max_segment_of_square_path() {
        let pts = vec![Point2::new(0.0, 0.0), Point2::new(3.0, 0.0), Point2::new(3.0, 1.0)];
        assert!((max_segment_length(pts.iter().copied()) - 3.0).abs() < TOLERANCE);
        assert!((polyline_length(&pts) - 4.0).abs() < TOLERANCE);
    }
}
