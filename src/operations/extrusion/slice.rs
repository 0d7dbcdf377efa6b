use crate::geometry::{
    ChunkBetweenIntersections, ExtrudedPoint, IntersectionPoint, SegmentwiseList,
};

/// Splits the traversal into chunks between consecutive intersections.
///
/// Traversal points whose parameter lies strictly between a chunk's endpoint
/// parameters become that chunk's interior points. Points are consumed in
/// order with a single running index.
#[must_use]
pub fn build(
    traversal: &SegmentwiseList<ExtrudedPoint>,
    chunk_endpoints: &[(IntersectionPoint, IntersectionPoint)],
) -> Vec<ChunkBetweenIntersections> {
    let points = traversal.points();
    let mut index = 0;
    chunk_endpoints
        .iter()
        .map(|(start, end)| {
            let mut interior = Vec::new();
            while let Some(p) = points.get(index) {
                if p.parameter >= end.parameter {
                    break;
                }
                if p.parameter > start.parameter {
                    interior.push(*p);
                }
                index += 1;
            }
            ChunkBetweenIntersections::new(*start, *end, SegmentwiseList::new(interior))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Point2, Vector2};

    fn ext(parameter: f64) -> ExtrudedPoint {
        ExtrudedPoint {
            parameter,
            position: Point2::new(parameter, 0.0),
            uv: Vector2::zeros(),
            segment_index: 0,
            segment_index_2: 0,
        }
    }

    fn ip(parameter: f64) -> IntersectionPoint {
        IntersectionPoint::from_extruded(&ext(parameter))
    }

    #[test]
    fn interior_points_are_strictly_between() {
        let traversal = SegmentwiseList::new((0..=6).map(|i| ext(f64::from(i))).collect());
        let endpoints = vec![(ip(0.0), ip(2.5)), (ip(2.5), ip(4.5)), (ip(4.5), ip(6.0))];
        let chunks = build(&traversal, &endpoints);
        assert_eq!(chunks.len(), 3);
        let params = |c: &ChunkBetweenIntersections| {
            c.points.points().iter().map(|p| p.parameter).collect::<Vec<_>>()
        };
        assert_eq!(params(&chunks[0]), vec![1.0, 2.0]);
        assert_eq!(params(&chunks[1]), vec![3.0, 4.0]);
        assert_eq!(params(&chunks[2]), vec![5.0]);
    }

    #[test]
    fn chunk_without_interior_points() {
        let traversal = SegmentwiseList::new(vec![ext(0.0), ext(1.0), ext(2.0)]);
        let endpoints = vec![(ip(0.0), ip(1.2)), (ip(1.2), ip(1.4)), (ip(1.4), ip(2.0))];
        let chunks = build(&traversal, &endpoints);
        assert_eq!(chunks[1].points.len(), 0);
        assert_eq!(chunks[2].points.len(), 0);
        assert_eq!(chunks[0].points.len(), 1);
    }
}
