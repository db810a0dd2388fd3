//! CPU reference backend
//!
//! Keeps "device" buffers in host memory. Map requests are trivially
//! immediate since there is no command queue to drain; the blocking
//! contract of [`Backend::map_buffer`] is satisfied vacuously.

mod memory;

pub use memory::MemoryManager;

use crate::backend::{AliasMode, Backend, BufferHandle, MapIntent, MappedRange};
use crate::error::Result;

/// CPU reference backend
///
/// Always available; used as the default backend and as the host-fallback
/// target when no accelerator is attached.
pub struct CpuBackend {
    memory: MemoryManager,
}

impl CpuBackend {
    /// Create a new CPU backend
    pub fn new() -> Self {
        Self {
            memory: MemoryManager::new(),
        }
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for CpuBackend {
    fn allocate_buffer(&mut self, size: usize) -> Result<BufferHandle> {
        self.memory.allocate_buffer(size)
    }

    fn create_buffer_from_host(&mut self, data: &[u8]) -> Result<BufferHandle> {
        self.memory.create_buffer_from_host(data)
    }

    fn free_buffer(&mut self, handle: BufferHandle) -> Result<()> {
        self.memory.free_buffer(handle)
    }

    fn copy_to_buffer(&mut self, handle: BufferHandle, data: &[u8]) -> Result<()> {
        self.memory.copy_to_buffer(handle, data)
    }

    fn copy_from_buffer(&self, handle: BufferHandle, data: &mut [u8]) -> Result<()> {
        self.memory.copy_from_buffer(handle, data)
    }

    fn buffer_size(&self, handle: BufferHandle) -> Result<usize> {
        self.memory.buffer_size(handle)
    }

    fn buffer_alias_mode(&self, handle: BufferHandle) -> Result<AliasMode> {
        self.memory.buffer_alias_mode(handle)
    }

    fn map_buffer(&mut self, handle: BufferHandle, intent: MapIntent) -> Result<MappedRange> {
        self.memory.map_buffer(handle, intent)
    }

    fn unmap_buffer(&mut self, handle: BufferHandle) -> Result<()> {
        self.memory.unmap_buffer(handle)
    }

    fn allocation_count(&self) -> u64 {
        self.memory.allocation_count()
    }
}
