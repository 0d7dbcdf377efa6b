use thiserror::Error;

/// Top-level error type for line extrusion.
#[derive(Debug, Error)]
pub enum ExtrusionError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to the input geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("line point {index} has a non-finite {component}")]
    NonFinite {
        index: usize,
        component: &'static str,
    },
}

/// Errors related to extrusion operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`ExtrusionError`].
pub type Result<T> = std::result::Result<T, ExtrusionError>;
