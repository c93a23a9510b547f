use thiserror::Error;

/// Error types for spline construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplineError {
    /// A spline needs at least two control points
    #[error("spline needs at least 2 control points, got {count}")]
    TooFewPoints { count: usize },

    /// Control point times must strictly increase
    #[error("control point {index} does not come after the previous one in time")]
    NonMonotonic { index: usize },
}

/// Result type using SplineError
pub type Result<T> = std::result::Result<T, SplineError>;
