//! Executor: the execution-control collaborator
//!
//! The `Executor` wraps a `strider-backends::Backend` and is the single
//! object through which this layer reaches the device: buffer creation
//! (the "context" role) and map/unmap requests (the "queue" role) are both
//! issued against it. The staging layer never mutates it beyond issuing
//! requests; it is supplied by the caller, shared read-mostly, and all
//! operations are synchronous on the caller's thread.

use crate::error::Result;
use parking_lot::RwLock;
use std::sync::Arc;
use strider_backends::{Backend, CpuBackend};

/// Shared handle to the active backend
pub type SharedBackend = Arc<RwLock<Box<dyn Backend + Send + Sync>>>;

/// Execution control for the staging layer
///
/// Owns the shared backend handle that device-resident containers capture
/// at construction time. One executor corresponds to one device queue;
/// every allocation and map request in this layer goes through it.
///
/// # Example
///
/// ```text
/// use strider_core::{DeviceVector, Executor};
///
/// let exec = Executor::new()?;
/// let dv = DeviceVector::from_host(&exec, &[1.0f32, 2.0, 3.0])?;
/// assert_eq!(dv.to_vec()?, vec![1.0, 2.0, 3.0]);
/// ```
pub struct Executor {
    backend: SharedBackend,
}

impl Executor {
    /// Create a new executor with the CPU reference backend
    #[tracing::instrument]
    pub fn new() -> Result<Self> {
        Ok(Self::with_backend(Box::new(CpuBackend::new())))
    }

    /// Create an executor around a caller-provided backend
    pub fn with_backend(backend: Box<dyn Backend + Send + Sync>) -> Self {
        tracing::debug!("executor_created");
        Self {
            backend: Arc::new(RwLock::new(backend)),
        }
    }

    /// Get a shared reference to the backend
    pub fn backend(&self) -> SharedBackend {
        Arc::clone(&self.backend)
    }

    /// Cumulative number of device buffer allocations issued so far
    pub fn allocation_count(&self) -> u64 {
        self.backend.read().allocation_count()
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new().expect("Failed to create default executor")
    }
}
