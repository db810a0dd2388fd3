//! Error types for backend operations

/// Result type for backend operations
pub type Result<T> = std::result::Result<T, BackendError>;

/// Errors that can occur during backend memory operations
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Invalid buffer handle
    #[error("invalid buffer handle: {0}")]
    InvalidBufferHandle(u64),

    /// Buffer access out of bounds
    #[error("buffer access out of bounds: offset {offset} + size {size} > buffer size {buffer_size}")]
    BufferOutOfBounds {
        offset: usize,
        size: usize,
        buffer_size: usize,
    },

    /// Buffer allocation failed
    #[error("buffer allocation failed: requested {requested} bytes")]
    AllocationFailed { requested: usize },

    /// A map request was issued against a buffer that already has an open window
    #[error("buffer {0} already has an open mapped window")]
    BufferAlreadyMapped(u64),

    /// An unmap request was issued against a buffer with no open window
    #[error("buffer {0} has no open mapped window")]
    BufferNotMapped(u64),

    /// A buffer cannot be freed while a mapped window is open against it
    #[error("buffer {0} cannot be freed while mapped")]
    FreeWhileMapped(u64),

    /// Unsupported operation
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl BackendError {
    /// Create an unsupported operation error
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedOperation(msg.into())
    }
}
