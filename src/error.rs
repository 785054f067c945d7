//! Error types for tropocorr.
//!
//! All failures are raised at the point of detection: grid construction,
//! query entry, configuration validation or raster I/O. No operation returns
//! a partially filled result.

use thiserror::Error;

/// The main error type for tropocorr operations.
#[derive(Error, Debug)]
pub enum TropoError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Array or axis dimensions disagree
    #[error("Shape mismatch: {message}")]
    ShapeMismatch { message: String },

    /// An axis whose last value lies below its first value
    #[error("Axis {axis} is not sorted: first = {first}, last = {last}")]
    UnsortedAxis { axis: String, first: f64, last: f64 },

    /// An axis that cannot span an interpolation cell
    #[error("Axis {axis} is degenerate: {message}")]
    DegenerateAxis { axis: String, message: String },

    /// Layer selector outside a layered grid
    #[error("Layer index {index} out of range for grid with {layers} layers")]
    LayerIndex { index: usize, layers: usize },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// NaN or infinite values where finite data is required
    #[error("Non-finite data: {message}")]
    NonFinite { message: String },
}

/// Convenience type alias for Results with TropoError
pub type Result<T> = std::result::Result<T, TropoError>;

impl TropoError {
    pub(crate) fn shape(message: impl Into<String>) -> Self {
        TropoError::ShapeMismatch {
            message: message.into(),
        }
    }

    pub(crate) fn parameter(param: &str, message: impl Into<String>) -> Self {
        TropoError::InvalidParameter {
            param: param.to_string(),
            message: message.into(),
        }
    }
}
