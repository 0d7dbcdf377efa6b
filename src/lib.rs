//! Extrusion of open 2D polylines into flat, UV-mapped ribbon meshes.
//!
//! [`ExtrudeLine`] runs the whole pipeline: the line is offset on both sides,
//! self-intersections are resolved, parts folding back onto the line are
//! removed, and the remaining contours are triangulated with texture
//! coordinates.

pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod tessellation;
pub mod texture;

pub use config::{ExtrusionConfig, Precision};
pub use error::{ExtrusionError, Result};
pub use operations::extrusion::{ContourConnector, LineExtrusion, LineExtrusionResults};
pub use operations::pipeline::{ExtrudeLine, ExtrudedLine};
pub use operations::segmentation::{LineSource, Polyline, ResampledPolyline};
pub use tessellation::{MultipleContourTriangulation, SingleContourTriangulation, TriangleMesh};
pub use texture::alteration::UvAlteration;
