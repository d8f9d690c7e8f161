use thiserror::Error;

/// Main error type for rankmetrics
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    /// Caller-supplied arguments that cannot be evaluated
    /// (k out of range, mismatched shapes, zero-positive instance, ...)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Input for which AUC is mathematically undefined or malformed
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Convenient Result type using MetricsError
pub type Result<T> = std::result::Result<T, MetricsError>;
