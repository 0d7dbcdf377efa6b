pub mod extrusion;
pub mod pipeline;
pub mod segmentation;
