//! Error types for staging operations

/// Result type for staging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the staging layer
///
/// Failures are confined to the device-memory operations (allocation,
/// transfer, map/unmap); they propagate to the caller, never retried.
/// Shape mismatches between iterator categories are compile-time errors
/// and have no runtime representation here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Backend memory operation failed
    #[error("backend error: {0}")]
    Backend(#[from] strider_backends::BackendError),

    /// Host slice length does not match the device buffer length
    #[error("buffer size mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Cursor or index position outside the addressed range
    #[error("position out of range: {position} >= {len}")]
    OutOfRange { position: usize, len: usize },
}
