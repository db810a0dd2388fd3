//! Backend trait for device memory management
//!
//! This trait defines the interface the staging layer depends on. Backends
//! own accelerator-resident buffers and service host transfer and map/unmap
//! requests against them.

use super::types::{AliasMode, BufferHandle, MapIntent, MappedRange};
use crate::error::Result;

/// Backend trait for device memory management
///
/// Backends implement this trait to provide buffer storage on different
/// hardware targets. The reference [`CpuBackend`](crate::CpuBackend) keeps
/// buffers in host memory, which makes map requests trivially immediate;
/// accelerator backends are expected to block a map request until any
/// outstanding device-side work on the buffer has completed.
///
/// # Memory Model
///
/// 1. **Buffers** — linear device memory, created either zero-filled
///    ([`Backend::allocate_buffer`], alias mode `DeviceFill`) or from host
///    memory ([`Backend::create_buffer_from_host`], alias mode `HostCopy`).
/// 2. **Mapped windows** — at most one host-visible window may be open per
///    buffer at a time. Device-side access to a buffer while a window is
///    open against it is undefined; the backend only tracks the open/closed
///    state, it does not police kernel submissions.
///
/// # Usage
///
/// ```rust
/// use strider_backends::{Backend, CpuBackend, MapIntent};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut backend = CpuBackend::new();
///
/// let data = [1.0f32, 2.0, 3.0, 4.0];
/// let buffer = backend.create_buffer_from_host(bytemuck::cast_slice(&data))?;
/// assert_eq!(backend.buffer_size(buffer)?, 16);
///
/// // Open a host-visible window, then release it.
/// let window = backend.map_buffer(buffer, MapIntent::Write)?;
/// assert_eq!(window.len, 16);
/// backend.unmap_buffer(buffer)?;
///
/// backend.free_buffer(buffer)?;
/// # Ok(())
/// # }
/// ```
pub trait Backend {
    // ============================================================================================
    // Buffer Management
    // ============================================================================================

    /// Allocate a zero-filled buffer of the given size in bytes
    ///
    /// Zero-size requests are valid and produce a usable handle with an
    /// empty extent.
    fn allocate_buffer(&mut self, size: usize) -> Result<BufferHandle>;

    /// Create a buffer initialized from host memory
    ///
    /// The buffer's size is `data.len()` bytes and its alias mode is
    /// [`AliasMode::HostCopy`]. An empty slice produces a zero-size buffer.
    fn create_buffer_from_host(&mut self, data: &[u8]) -> Result<BufferHandle>;

    /// Free a previously allocated buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is invalid or if a mapped window is
    /// still open against the buffer.
    fn free_buffer(&mut self, handle: BufferHandle) -> Result<()>;

    /// Copy data from host to buffer
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is invalid or the data size exceeds
    /// the buffer size.
    fn copy_to_buffer(&mut self, handle: BufferHandle, data: &[u8]) -> Result<()>;

    /// Copy data from buffer to host
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is invalid or the destination size
    /// exceeds the buffer size.
    fn copy_from_buffer(&self, handle: BufferHandle, data: &mut [u8]) -> Result<()>;

    /// Get buffer size in bytes
    fn buffer_size(&self, handle: BufferHandle) -> Result<usize>;

    /// Get the alias mode the buffer was created with
    fn buffer_alias_mode(&self, handle: BufferHandle) -> Result<AliasMode>;

    // ============================================================================================
    // Mapped Windows
    // ============================================================================================

    /// Open a host-visible window onto a buffer
    ///
    /// Blocks until the buffer is safe to access from the host, then returns
    /// a bounds-carrying host pointer covering the whole buffer. The window
    /// stays open until [`Backend::unmap_buffer`] is called on the same
    /// handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is invalid or a window is already
    /// open against the buffer.
    fn map_buffer(&mut self, handle: BufferHandle, intent: MapIntent) -> Result<MappedRange>;

    /// Close the open window on a buffer, restoring exclusive device ownership
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is invalid or no window is open.
    fn unmap_buffer(&mut self, handle: BufferHandle) -> Result<()>;

    // ============================================================================================
    // Introspection
    // ============================================================================================

    /// Total number of buffer allocations performed by this backend
    ///
    /// Cumulative over the backend's lifetime; freeing a buffer does not
    /// decrement it. Used to verify that staging paths which must not
    /// allocate really do not.
    fn allocation_count(&self) -> u64;
}
