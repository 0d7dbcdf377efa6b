use super::point::{ContourPoint, ExtrudedPoint, IntersectionPoint};
use super::segmentwise::SegmentwiseList;

/// A run of the extruded outline between two consecutive self-intersections.
///
/// Interior point parameters lie strictly between `start.parameter` and
/// `end.parameter`.
#[derive(Debug, Clone)]
pub struct ChunkBetweenIntersections {
    pub start: IntersectionPoint,
    pub end: IntersectionPoint,
    pub points: SegmentwiseList<ExtrudedPoint>,
}

impl ChunkBetweenIntersections {
    #[must_use]
    pub fn new(
        start: IntersectionPoint,
        end: IntersectionPoint,
        points: SegmentwiseList<ExtrudedPoint>,
    ) -> Self {
        Self { start, end, points }
    }

    /// First interior point, or `end` when there is none.
    #[must_use]
    pub fn point_after_start(&self) -> ContourPoint {
        self.points
            .points()
            .first()
            .map_or_else(|| self.end.into(), |p| (*p).into())
    }

    /// Last interior point, or `start` when there is none.
    #[must_use]
    pub fn point_before_end(&self) -> ContourPoint {
        self.points
            .points()
            .last()
            .map_or_else(|| self.start.into(), |p| (*p).into())
    }
}

/// Chunks chained end-to-start into one closed loop.
#[derive(Debug, Clone, Default)]
pub struct ChunkCollection {
    pub chunks: Vec<ChunkBetweenIntersections>,
}

impl ChunkCollection {
    #[must_use]
    pub fn new(chunks: Vec<ChunkBetweenIntersections>) -> Self {
        Self { chunks }
    }

    /// Number of interior points over all chunks.
    #[must_use]
    pub fn interior_point_count(&self) -> usize {
        self.chunks.iter().map(|c| c.points.len()).sum()
    }
}
