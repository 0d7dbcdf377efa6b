pub mod chunk;
pub mod monotonic;
pub mod point;
pub mod segmentwise;

pub use chunk::{ChunkBetweenIntersections, ChunkCollection};
pub use monotonic::{MonotonicChunk, SegmentwiseCoverage};
pub use point::{
    ContourPoint, ExtrudedPoint, IntersectionPoint, LinePoint, LinePointUv, Positioned, Textured,
};
pub use segmentwise::{ClosestOnPolyline, SegmentwiseList};
