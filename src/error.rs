use thiserror::Error;

/// Top-level error type for the geokern kernel.
#[derive(Debug, Error)]
pub enum GeokernError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
}

/// Errors raised by malformed input geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors signaling that an algorithm left its expected numerical envelope.
///
/// These point at an upstream bug or corrupted data rather than at a
/// degenerate but valid configuration.
#[derive(Debug, Error)]
pub enum ConsistencyError {
    #[error("{algorithm} did not converge within {iterations} iterations")]
    IterationCapReached {
        algorithm: &'static str,
        iterations: usize,
    },
}

/// Convenience type alias for results using [`GeokernError`].
pub type Result<T> = std::result::Result<T, GeokernError>;
