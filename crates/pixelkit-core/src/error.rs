//! Error types for image operations.

use thiserror::Error;

/// Errors reported by engine operations.
///
/// Every error is fatal to the single operation that raised it. No partial
/// result is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// The image has the wrong number of channels for this operation.
    #[error("Invalid channel count: expected {expected}, got {actual}")]
    InvalidChannelCount { expected: String, actual: usize },

    /// Mismatched heights/widths, an empty image, or a malformed kernel.
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// An operator value is out of range or not numeric.
    #[error("Invalid operator value: {0}")]
    InvalidOperatorValue(String),

    /// Level adjustment control points are not strictly increasing.
    #[error("Invalid ordering: expected black < mid < white, got {black}, {mid}, {white}")]
    InvalidOrdering { black: i32, mid: i32, white: i32 },

    /// The set of inputs cannot be combined by this operation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl OperationError {
    pub(crate) fn channels(expected: impl Into<String>, actual: usize) -> Self {
        OperationError::InvalidChannelCount {
            expected: expected.into(),
            actual,
        }
    }
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, OperationError>;
