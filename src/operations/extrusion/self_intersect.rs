use crate::geometry::segmentwise::adaptive_step;
use crate::geometry::{ExtrudedPoint, IntersectionPoint, SegmentwiseList};
use crate::math::intersect_2d::segment_segment_intersect;

/// Self-intersections of the extruded traversal and the chunk boundaries
/// they induce.
#[derive(Debug, Clone, Default)]
pub struct Intersections {
    /// All intersection points sorted by parameter, framed by synthetic
    /// intersections at the first and last traversal points.
    pub points: Vec<IntersectionPoint>,
    /// Start and end of every chunk, in traversal order.
    pub chunk_endpoints: Vec<(IntersectionPoint, IntersectionPoint)>,
}

/// Finds all crossings between non-adjacent segments of the closed
/// traversal.
///
/// Each crossing yields two intersection points, one on each segment, sharing
/// the averaged crossing position.
#[must_use]
pub fn find_all(traversal: &SegmentwiseList<ExtrudedPoint>) -> Intersections {
    let points = traversal.points();
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Intersections::default();
    };

    let mut found = crossings(traversal);
    found.sort_by(|a, b| a.parameter.total_cmp(&b.parameter));

    let first = IntersectionPoint::from_extruded(first);
    let last = IntersectionPoint::from_extruded(last);

    let mut chunk_endpoints = Vec::with_capacity(found.len() + 1);
    let mut previous = first;
    for p in &found {
        chunk_endpoints.push((previous, *p));
        previous = *p;
    }
    chunk_endpoints.push((previous, last));

    let mut all = Vec::with_capacity(found.len() + 2);
    all.push(first);
    all.extend(found);
    all.push(last);

    Intersections {
        points: all,
        chunk_endpoints,
    }
}

fn crossings(traversal: &SegmentwiseList<ExtrudedPoint>) -> Vec<IntersectionPoint> {
    let points = traversal.points();
    let n = points.len();
    let max_len = traversal.max_segment_length();
    let mut found = Vec::new();
    if n < 4 {
        return found;
    }

    for i in 0..n - 1 {
        let a0 = &points[i];
        let a1 = &points[i + 1];
        let mut j = i + 2;
        while j < n - 1 {
            let b0 = &points[j];
            let b1 = &points[j + 1];
            // The first and last segments share the loop-closing point.
            let closes_loop = i == 0 && j + 1 == n - 1;
            if !closes_loop {
                if let Some(hit) = segment_segment_intersect(
                    &a0.position,
                    &a1.position,
                    &b0.position,
                    &b1.position,
                ) {
                    let own = (a0.segment_index, a1.segment_index_2);
                    let other = (b0.segment_index, b1.segment_index_2);
                    let mut on_first =
                        IntersectionPoint::new(&a0.lerp(a1, hit.fraction_1), own, other);
                    let mut on_second =
                        IntersectionPoint::new(&b0.lerp(b1, hit.fraction_2), other, own);
                    let shared =
                        on_first.position + (on_second.position - on_first.position) * 0.5;
                    on_first.position = shared;
                    on_second.position = shared;
                    found.push(on_first);
                    found.push(on_second);
                }
            }
            // A segment can only reach segment `i` if its start lies within
            // two segment lengths of `a0`.
            let gap = ((b0.position - a0.position).norm() - 2.0 * max_len).max(0.0);
            j = j.saturating_add(adaptive_step(gap, max_len));
        }
    }
    found
}
