//! Memory manager for the CPU backend
//!
//! Manages buffers and their mapped-window state for the CPU backend.
//! Buffer storage is backed by `u64` words so that every host pointer
//! handed out through a mapped window is 8-byte aligned; windows are
//! reinterpreted as typed slices one layer up, and scalar `Pod` types
//! require at most that alignment.

use crate::backend::{AliasMode, BufferHandle, MapIntent, MappedRange};
use crate::error::{BackendError, Result};
use std::collections::HashMap;

/// Byte storage with 8-byte alignment
struct AlignedStorage {
    words: Vec<u64>,
    len: usize,
}

impl AlignedStorage {
    fn zeroed(len: usize) -> Self {
        Self {
            words: vec![0u64; len.div_ceil(8)],
            len,
        }
    }

    fn from_bytes(data: &[u8]) -> Self {
        let mut storage = Self::zeroed(data.len());
        storage.as_mut_slice().copy_from_slice(data);
        storage
    }

    fn len(&self) -> usize {
        self.len
    }

    fn as_slice(&self) -> &[u8] {
        &bytemuck::cast_slice(&self.words)[..self.len]
    }

    fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut bytemuck::cast_slice_mut(&mut self.words)[..self.len]
    }

    /// Base pointer of the storage. Dangling but well-aligned for zero-size
    /// buffers, matching what empty slices expect.
    fn as_mut_ptr(&mut self) -> *mut u8 {
        self.words.as_mut_ptr() as *mut u8
    }
}

/// One allocated buffer and its window state
struct BufferSlot {
    storage: AlignedStorage,
    alias_mode: AliasMode,
    mapped: bool,
}

/// Memory manager for the CPU backend
///
/// Tracks buffer storage, per-buffer mapped-window state, and a cumulative
/// allocation counter. Handles are never reused within a manager's lifetime.
pub struct MemoryManager {
    /// Buffer storage, keyed by handle ID
    buffers: HashMap<u64, BufferSlot>,

    /// Next buffer handle ID
    next_buffer_id: u64,

    /// Cumulative allocation count
    allocations: u64,
}

impl MemoryManager {
    /// Create a new memory manager
    pub fn new() -> Self {
        Self {
            buffers: HashMap::new(),
            next_buffer_id: 1,
            allocations: 0,
        }
    }

    fn insert(&mut self, storage: AlignedStorage, alias_mode: AliasMode) -> BufferHandle {
        let id = self.next_buffer_id;
        self.next_buffer_id += 1;
        self.allocations += 1;

        self.buffers.insert(
            id,
            BufferSlot {
                storage,
                alias_mode,
                mapped: false,
            },
        );

        BufferHandle::new(id)
    }

    fn slot(&self, handle: BufferHandle) -> Result<&BufferSlot> {
        self.buffers
            .get(&handle.id())
            .ok_or(BackendError::InvalidBufferHandle(handle.id()))
    }

    fn slot_mut(&mut self, handle: BufferHandle) -> Result<&mut BufferSlot> {
        self.buffers
            .get_mut(&handle.id())
            .ok_or(BackendError::InvalidBufferHandle(handle.id()))
    }

    /// Allocate a zero-filled buffer
    pub fn allocate_buffer(&mut self, size: usize) -> Result<BufferHandle> {
        Ok(self.insert(AlignedStorage::zeroed(size), AliasMode::DeviceFill))
    }

    /// Create a buffer initialized from host memory
    pub fn create_buffer_from_host(&mut self, data: &[u8]) -> Result<BufferHandle> {
        Ok(self.insert(AlignedStorage::from_bytes(data), AliasMode::HostCopy))
    }

    /// Free a buffer
    pub fn free_buffer(&mut self, handle: BufferHandle) -> Result<()> {
        if self.slot(handle)?.mapped {
            return Err(BackendError::FreeWhileMapped(handle.id()));
        }
        self.buffers.remove(&handle.id());
        Ok(())
    }

    /// Copy data to a buffer
    pub fn copy_to_buffer(&mut self, handle: BufferHandle, data: &[u8]) -> Result<()> {
        let slot = self.slot_mut(handle)?;

        if data.len() > slot.storage.len() {
            return Err(BackendError::BufferOutOfBounds {
                offset: 0,
                size: data.len(),
                buffer_size: slot.storage.len(),
            });
        }

        slot.storage.as_mut_slice()[..data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Copy data from a buffer
    pub fn copy_from_buffer(&self, handle: BufferHandle, data: &mut [u8]) -> Result<()> {
        let slot = self.slot(handle)?;

        if data.len() > slot.storage.len() {
            return Err(BackendError::BufferOutOfBounds {
                offset: 0,
                size: data.len(),
                buffer_size: slot.storage.len(),
            });
        }

        data.copy_from_slice(&slot.storage.as_slice()[..data.len()]);
        Ok(())
    }

    /// Get buffer size in bytes
    pub fn buffer_size(&self, handle: BufferHandle) -> Result<usize> {
        Ok(self.slot(handle)?.storage.len())
    }

    /// Get the alias mode the buffer was created with
    pub fn buffer_alias_mode(&self, handle: BufferHandle) -> Result<AliasMode> {
        Ok(self.slot(handle)?.alias_mode)
    }

    /// Open a host-visible window onto a buffer
    ///
    /// On the CPU backend the buffer already lives in host memory, so the
    /// request completes immediately; only the single-window invariant is
    /// enforced here.
    pub fn map_buffer(&mut self, handle: BufferHandle, intent: MapIntent) -> Result<MappedRange> {
        let slot = self.slot_mut(handle)?;

        if slot.mapped {
            return Err(BackendError::BufferAlreadyMapped(handle.id()));
        }
        slot.mapped = true;

        let range = MappedRange::new(slot.storage.as_mut_ptr(), slot.storage.len());
        tracing::debug!(
            handle = %handle,
            bytes = range.len,
            intent = %intent,
            "buffer_mapped"
        );
        Ok(range)
    }

    /// Close the open window on a buffer
    pub fn unmap_buffer(&mut self, handle: BufferHandle) -> Result<()> {
        let slot = self.slot_mut(handle)?;

        if !slot.mapped {
            return Err(BackendError::BufferNotMapped(handle.id()));
        }
        slot.mapped = false;

        tracing::debug!(handle = %handle, "buffer_unmapped");
        Ok(())
    }

    /// Cumulative number of buffer allocations
    pub fn allocation_count(&self) -> u64 {
        self.allocations
    }
}

impl Default for MemoryManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_allocation() {
        let mut manager = MemoryManager::new();

        let buffer = manager.allocate_buffer(1024).unwrap();
        assert_eq!(manager.buffer_size(buffer).unwrap(), 1024);
        assert_eq!(manager.buffer_alias_mode(buffer).unwrap(), AliasMode::DeviceFill);
        assert_eq!(manager.allocation_count(), 1);

        manager.free_buffer(buffer).unwrap();

        // Should fail after free
        assert!(manager.buffer_size(buffer).is_err());
        // Counter is cumulative
        assert_eq!(manager.allocation_count(), 1);
    }

    #[test]
    fn test_buffer_from_host() {
        let mut manager = MemoryManager::new();

        let data = [1.0f32, 2.0, 3.0, 4.0];
        let buffer = manager.create_buffer_from_host(bytemuck::cast_slice(&data)).unwrap();
        assert_eq!(manager.buffer_size(buffer).unwrap(), 16);
        assert_eq!(manager.buffer_alias_mode(buffer).unwrap(), AliasMode::HostCopy);

        let mut result = [0.0f32; 4];
        manager
            .copy_from_buffer(buffer, bytemuck::cast_slice_mut(&mut result))
            .unwrap();
        assert_eq!(result, data);
    }

    #[test]
    fn test_buffer_copy_roundtrip() {
        let mut manager = MemoryManager::new();

        let buffer = manager.allocate_buffer(16).unwrap();

        let data = b"Hello, World!";
        manager.copy_to_buffer(buffer, data).unwrap();

        let mut result = vec![0u8; data.len()];
        manager.copy_from_buffer(buffer, &mut result).unwrap();

        assert_eq!(result.as_slice(), data);
    }

    #[test]
    fn test_copy_out_of_bounds() {
        let mut manager = MemoryManager::new();
        let buffer = manager.allocate_buffer(8).unwrap();

        let data = [0u8; 16];
        let result = manager.copy_to_buffer(buffer, &data);
        assert!(matches!(result, Err(BackendError::BufferOutOfBounds { .. })));
    }

    #[test]
    fn test_zero_size_buffer() {
        let mut manager = MemoryManager::new();
        let buffer = manager.allocate_buffer(0).unwrap();
        assert_eq!(manager.buffer_size(buffer).unwrap(), 0);

        let window = manager.map_buffer(buffer, MapIntent::Write).unwrap();
        assert!(window.is_empty());
        manager.unmap_buffer(buffer).unwrap();
        manager.free_buffer(buffer).unwrap();
    }

    #[test]
    fn test_map_pointer_alignment() {
        let mut manager = MemoryManager::new();
        let data = [0u8; 13]; // deliberately not a multiple of 8
        let buffer = manager.create_buffer_from_host(&data).unwrap();

        let window = manager.map_buffer(buffer, MapIntent::Read).unwrap();
        assert_eq!(window.ptr as usize % 8, 0);
        assert_eq!(window.len, 13);
        manager.unmap_buffer(buffer).unwrap();
    }

    #[test]
    fn test_single_window_invariant() {
        let mut manager = MemoryManager::new();
        let buffer = manager.allocate_buffer(64).unwrap();

        manager.map_buffer(buffer, MapIntent::Write).unwrap();
        let second = manager.map_buffer(buffer, MapIntent::Write);
        assert!(matches!(second, Err(BackendError::BufferAlreadyMapped(_))));

        manager.unmap_buffer(buffer).unwrap();
        // Reopening after unmap succeeds
        manager.map_buffer(buffer, MapIntent::Write).unwrap();
        manager.unmap_buffer(buffer).unwrap();
    }

    #[test]
    fn test_unmap_without_map() {
        let mut manager = MemoryManager::new();
        let buffer = manager.allocate_buffer(64).unwrap();

        let result = manager.unmap_buffer(buffer);
        assert!(matches!(result, Err(BackendError::BufferNotMapped(_))));
    }

    #[test]
    fn test_free_while_mapped() {
        let mut manager = MemoryManager::new();
        let buffer = manager.allocate_buffer(64).unwrap();

        manager.map_buffer(buffer, MapIntent::Write).unwrap();
        let result = manager.free_buffer(buffer);
        assert!(matches!(result, Err(BackendError::FreeWhileMapped(_))));

        manager.unmap_buffer(buffer).unwrap();
        manager.free_buffer(buffer).unwrap();
    }

    #[test]
    fn test_window_writes_visible_after_unmap() {
        let mut manager = MemoryManager::new();
        let data = [1.0f32, 2.0, 3.0, 4.0];
        let buffer = manager.create_buffer_from_host(bytemuck::cast_slice(&data)).unwrap();

        let window = manager.map_buffer(buffer, MapIntent::Write).unwrap();
        // Write through the window while it is open
        unsafe {
            let slice = std::slice::from_raw_parts_mut(window.ptr as *mut f32, 4);
            slice[2] = 9.5;
        }
        manager.unmap_buffer(buffer).unwrap();

        let mut result = [0.0f32; 4];
        manager
            .copy_from_buffer(buffer, bytemuck::cast_slice_mut(&mut result))
            .unwrap();
        assert_eq!(result, [1.0, 2.0, 9.5, 4.0]);
    }
}
