use crate::geometry::segmentwise::adaptive_step;
use crate::geometry::{
    ChunkBetweenIntersections, ExtrudedPoint, IntersectionPoint, LinePointUv, SegmentwiseList,
};
use crate::math::distance_2d::{is_within_distance, point_to_segment_dist, segment_to_segment_dist};

/// Moves chunks that fold back closer than `|amount|` to the source line out
/// of `chunks`.
///
/// Returns the removed chunks in their original order.
pub fn apply(
    chunks: &mut Vec<ChunkBetweenIntersections>,
    line: &SegmentwiseList<LinePointUv>,
    amount: f64,
    intersections: &[IntersectionPoint],
) -> Vec<ChunkBetweenIntersections> {
    let mut removed = Vec::new();
    for i in (0..chunks.len()).rev() {
        if is_too_close(&chunks[i], line, amount, intersections) {
            removed.push(chunks.remove(i));
        }
    }
    removed.reverse();
    removed
}

fn is_too_close(
    chunk: &ChunkBetweenIntersections,
    line: &SegmentwiseList<LinePointUv>,
    amount: f64,
    intersections: &[IntersectionPoint],
) -> bool {
    if line.segment_count() == 0 {
        return false;
    }
    match furthest_from_intersections(chunk.points.points(), intersections) {
        Some(point) => point_is_too_close(&point, line, amount),
        None => endpoint_segment_is_too_close(&chunk.start, &chunk.end, line, amount),
    }
}

/// Interior point whose parameter is farthest from every intersection.
fn furthest_from_intersections(
    points: &[ExtrudedPoint],
    intersections: &[IntersectionPoint],
) -> Option<ExtrudedPoint> {
    let smallest_gap = |p: &ExtrudedPoint| {
        intersections
            .iter()
            .map(|ip| (p.parameter - ip.parameter).abs())
            .fold(f64::INFINITY, f64::min)
    };
    let mut best: Option<(f64, ExtrudedPoint)> = None;
    for p in points {
        let gap = smallest_gap(p);
        if best.is_none_or(|(g, _)| gap > g) {
            best = Some((gap, *p));
        }
    }
    best.map(|(_, p)| p)
}

fn clamp_segment(index: usize, segment_count: usize) -> usize {
    index.min(segment_count.saturating_sub(1))
}

/// Whether `point` is within `|amount|` of any source segment other than the
/// two it was generated from.
fn point_is_too_close(
    point: &ExtrudedPoint,
    line: &SegmentwiseList<LinePointUv>,
    amount: f64,
) -> bool {
    let segment_count = line.segment_count();
    let own = clamp_segment(point.segment_index, segment_count);
    let own_2 = clamp_segment(point.segment_index_2, segment_count);
    let abs_amount = amount.abs();
    let amount_sq = amount * amount;
    let position = point.position;

    let mut i = 0;
    while i < segment_count {
        let (a, b) = line.segment(i);
        if i != own && i != own_2 && is_within_distance(&a, &b, &position, amount_sq) {
            return true;
        }
        let gap = (a - position).norm() - abs_amount;
        i = i.saturating_add(adaptive_step(gap, line.max_segment_length()));
    }
    false
}

/// Closeness test for a chunk that is a single segment between two
/// intersections.
///
/// Against the segments the intersections were generated from, the segment
/// must come closer than the intersections themselves.
fn endpoint_segment_is_too_close(
    start: &IntersectionPoint,
    end: &IntersectionPoint,
    line: &SegmentwiseList<LinePointUv>,
    amount: f64,
) -> bool {
    let segment_count = line.segment_count();
    let clamp = |i: usize| clamp_segment(i, segment_count);
    let indices = [
        clamp(start.first_segment_index),
        clamp(start.first_segment_index_2),
        clamp(start.second_segment_index),
        clamp(start.second_segment_index_2),
        clamp(end.first_segment_index),
        clamp(end.first_segment_index_2),
        clamp(end.second_segment_index),
        clamp(end.second_segment_index_2),
    ];
    let distances: Vec<f64> = indices
        .iter()
        .enumerate()
        .map(|(k, &s)| {
            let (a, b) = line.segment(s);
            let from = if k < 4 { start.position } else { end.position };
            point_to_segment_dist(&a, &b, &from)
        })
        .collect();

    // An intersection whose own and crossed segments coincide sits on a
    // single source segment; that segment never counts.
    let start_is_self = indices[0] == indices[2] && indices[1] == indices[3];
    let end_is_self = indices[4] == indices[6] && indices[5] == indices[7];

    let abs_amount = amount.abs();
    let mut i = 0;
    while i < segment_count {
        let (a, b) = line.segment(i);
        let distance = segment_to_segment_dist(&start.position, &end.position, &a, &b);

        let mut comparison = f64::INFINITY;
        let mut provenance = false;
        for (k, &s) in indices.iter().enumerate() {
            if s == i {
                comparison = comparison.min(distances[k]);
                provenance = true;
            }
        }
        if !provenance {
            comparison = abs_amount;
        }

        let mut closer = distance < comparison;
        if provenance
            && (((i == indices[0] || i == indices[1]) && start_is_self)
                || ((i == indices[4] || i == indices[5]) && end_is_self))
        {
            closer = false;
        }
        if closer {
            return true;
        }
        i = i.saturating_add(adaptive_step(distance - abs_amount, line.max_segment_length()));
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Point2, Vector2};

    fn line(points: &[(f64, f64)]) -> SegmentwiseList<LinePointUv> {
        SegmentwiseList::new(
            points
                .iter()
                .map(|&(x, y)| LinePointUv::new(0.0, Point2::new(x, y), Vector2::new(x, 0.5)))
                .collect(),
        )
    }

    fn ext(parameter: f64, x: f64, y: f64, a: usize, b: usize) -> ExtrudedPoint {
        ExtrudedPoint {
            parameter,
            position: Point2::new(x, y),
            uv: Vector2::zeros(),
            segment_index: a,
            segment_index_2: b,
        }
    }

    #[test]
    fn point_near_foreign_segment_is_too_close() {
        let l = line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        // Generated from segment 0 but sitting right over segment 2.
        let p = ext(0.0, 2.5, 0.05, 0, 0);
        assert!(point_is_too_close(&p, &l, 0.1));
        let q = ext(0.0, 2.5, 0.05, 2, 2);
        assert!(!point_is_too_close(&q, &l, 0.1));
    }

    #[test]
    fn point_at_extrusion_distance_is_kept() {
        let l = line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let p = ext(0.0, 1.5, 0.1, 1, 1);
        assert!(!point_is_too_close(&p, &l, 0.1));
    }

    #[test]
    fn removal_moves_chunks_and_keeps_order() {
        let l = line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let chunk = |parameter: f64, x: f64, y: f64, idx: usize| {
            let s = IntersectionPoint::from_extruded(&ext(parameter - 0.5, x, y, idx, idx));
            let e = IntersectionPoint::from_extruded(&ext(parameter + 0.5, x, y, idx, idx));
            ChunkBetweenIntersections::new(
                s,
                e,
                SegmentwiseList::new(vec![ext(parameter, x, y, idx, idx)]),
            )
        };
        let mut chunks = vec![
            chunk(1.0, 0.5, 0.1, 0),
            chunk(3.0, 2.5, 0.01, 0),
            chunk(5.0, 1.5, 0.1, 1),
            chunk(7.0, 0.5, 0.02, 2),
        ];
        let intersections: Vec<IntersectionPoint> = chunks.iter().map(|c| c.start).collect();
        let removed = apply(&mut chunks, &l, 0.1, &intersections);
        assert_eq!(chunks.len(), 2);
        assert_eq!(removed.len(), 2);
        assert!(removed[0].start.parameter < removed[1].start.parameter);
        assert!((chunks[0].start.parameter - 0.5).abs() < 1e-12);
    }

    #[test]
    fn furthest_point_maximizes_parameter_gap() {
        let pts = vec![
            ext(1.0, 0.0, 0.0, 0, 0),
            ext(2.0, 0.0, 0.0, 0, 0),
            ext(2.9, 0.0, 0.0, 0, 0),
        ];
        let ips = vec![
            IntersectionPoint::from_extruded(&ext(0.0, 0.0, 0.0, 0, 0)),
            IntersectionPoint::from_extruded(&ext(3.0, 0.0, 0.0, 0, 0)),
        ];
        let p = furthest_from_intersections(&pts, &ips).unwrap_or(pts[0]);
        assert!((p.parameter - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_chunk_segment_crossing_far_line_is_kept() {
        let l = line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let s = IntersectionPoint::from_extruded(&ext(0.0, 0.5, 0.5, 0, 0));
        let e = IntersectionPoint::from_extruded(&ext(1.0, 1.5, 0.5, 1, 1));
        assert!(!endpoint_segment_is_too_close(&s, &e, &l, 0.1));
    }

    #[test]
    fn empty_chunk_segment_over_line_is_removed() {
        let l = line(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)]);
        // Endpoints generated from segment 0 and 3, but the chunk lies over 1 and 2.
        let s = IntersectionPoint::new(&ext(0.0, 1.2, 0.02, 0, 0), (0, 0), (3, 3));
        let e = IntersectionPoint::new(&ext(1.0, 2.8, 0.02, 3, 3), (3, 3), (0, 0));
        assert!(endpoint_segment_is_too_close(&s, &e, &l, 0.1));
    }
}
