use crate::geometry::{ChunkBetweenIntersections, ChunkCollection, ContourPoint};

/// How the UV of the point where two chunks join is chosen.
///
/// Positions are identical on both sides of a join; only the UV differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContourConnector {
    /// Keep the UV of the chunk starting at the join.
    KeepStart,
    /// Keep the UV of the chunk ending at the join.
    KeepEnd,
    /// Average both UVs equally.
    #[default]
    AverageEqually,
    /// Average both UVs, weighted by the length of the adjoining segments.
    AverageArcdistance,
}

impl ContourConnector {
    /// Flattens each chunk collection into a closed contour.
    ///
    /// A collection of `k` chunks with `m` interior points in total yields
    /// `m + k + 1` contour points.
    #[must_use]
    pub fn connect(&self, collections: &[ChunkCollection]) -> Vec<Vec<ContourPoint>> {
        collections.iter().map(|c| self.connect_one(c)).collect()
    }

    fn connect_one(&self, collection: &ChunkCollection) -> Vec<ContourPoint> {
        let mut contour =
            Vec::with_capacity(collection.interior_point_count() + collection.chunks.len() + 1);
        let mut previous: Option<&ChunkBetweenIntersections> = None;
        for chunk in &collection.chunks {
            let start = match previous {
                Some(prev) => self.join(prev, chunk),
                None => chunk.start.into(),
            };
            contour.push(start);
            contour.extend(chunk.points.points().iter().map(|p| ContourPoint::from(*p)));
            previous = Some(chunk);
        }
        if let Some(last) = previous {
            contour.push(last.end.into());
        }
        contour
    }

    fn join(
        &self,
        previous: &ChunkBetweenIntersections,
        current: &ChunkBetweenIntersections,
    ) -> ContourPoint {
        let start = ContourPoint::from(current.start);
        let previous_end = ContourPoint::from(previous.end);
        match self {
            Self::KeepStart => start,
            Self::KeepEnd => previous_end,
            Self::AverageEqually => start.average_with(&previous_end, 0.5),
            Self::AverageArcdistance => {
                let after = (current.point_after_start().position - start.position).norm();
                let before = (previous_end.position - previous.point_before_end().position).norm();
                let total = after + before;
                let fraction = if total > 0.0 { after / total } else { 0.5 };
                start.average_with(&previous_end, fraction)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ExtrudedPoint, IntersectionPoint, SegmentwiseList};
    use crate::math::{Point2, Vector2};

    const TOL: f64 = 1e-12;

    fn ext(x: f64, y: f64, u: f64) -> ExtrudedPoint {
        ExtrudedPoint {
            parameter: x,
            position: Point2::new(x, y),
            uv: Vector2::new(u, 0.5),
            segment_index: 0,
            segment_index_2: 0,
        }
    }

    /// Two chunks joined at (2, 0): the first ends there with u = 10, the
    /// second starts there with u = 20.
    fn collection() -> ChunkCollection {
        let a = ChunkBetweenIntersections::new(
            IntersectionPoint::from_extruded(&ext(0.0, 0.0, 0.0)),
            IntersectionPoint::from_extruded(&ext(2.0, 0.0, 10.0)),
            SegmentwiseList::new(vec![ext(1.0, 0.0, 1.0)]),
        );
        let b = ChunkBetweenIntersections::new(
            IntersectionPoint::from_extruded(&ext(2.0, 0.0, 20.0)),
            IntersectionPoint::from_extruded(&ext(0.0, 0.0, 30.0)),
            SegmentwiseList::new(vec![ext(5.0, 0.0, 2.0), ext(4.0, 1.0, 3.0)]),
        );
        ChunkCollection::new(vec![a, b])
    }

    fn join_u(connector: ContourConnector) -> f64 {
        let contours = connector.connect(&[collection()]);
        contours[0][2].uv.x
    }

    #[test]
    fn point_count_and_untouched_points() {
        for connector in [
            ContourConnector::KeepStart,
            ContourConnector::KeepEnd,
            ContourConnector::AverageEqually,
            ContourConnector::AverageArcdistance,
        ] {
            let contours = connector.connect(&[collection()]);
            assert_eq!(contours.len(), 1);
            let c = &contours[0];
            // 3 interior points + 2 chunks + 1.
            assert_eq!(c.len(), 6);
            assert!((c[0].uv.x).abs() < TOL);
            assert!((c[1].uv.x - 1.0).abs() < TOL);
            assert!((c[3].uv.x - 2.0).abs() < TOL);
            assert!((c[4].uv.x - 3.0).abs() < TOL);
            assert!((c[5].uv.x - 30.0).abs() < TOL);
            assert_eq!(c[2].position, Point2::new(2.0, 0.0));
        }
    }

    #[test]
    fn join_uvs() {
        assert!((join_u(ContourConnector::KeepStart) - 20.0).abs() < TOL);
        assert!((join_u(ContourConnector::KeepEnd) - 10.0).abs() < TOL);
        assert!((join_u(ContourConnector::AverageEqually) - 15.0).abs() < TOL);
        // after-start distance 3, before-end distance 1: fraction 0.75 toward the end.
        assert!((join_u(ContourConnector::AverageArcdistance) - 12.5).abs() < TOL);
    }

    #[test]
    fn empty_input() {
        assert!(ContourConnector::default().connect(&[]).is_empty());
    }
}
