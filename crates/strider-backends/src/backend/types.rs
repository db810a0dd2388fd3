//! Types for backend handles and map requests

use std::fmt;

/// Handle to an allocated device buffer
///
/// Buffers are opaque handles managed by the backend.
/// Use Backend methods to interact with buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u64);

impl BufferHandle {
    /// Create a new buffer handle
    pub const fn new(id: u64) -> Self {
        BufferHandle(id)
    }

    /// Get the internal ID
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BufferHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buf{}", self.0)
    }
}

/// How a buffer's contents came into being
///
/// - [`AliasMode::HostCopy`]: created from host memory at construction time
/// - [`AliasMode::DeviceFill`]: allocated on the device and filled afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AliasMode {
    /// Buffer was initialized from host memory
    HostCopy,
    /// Buffer was allocated zero-filled, to be written on the device
    DeviceFill,
}

impl fmt::Display for AliasMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AliasMode::HostCopy => write!(f, "host-copy"),
            AliasMode::DeviceFill => write!(f, "device-fill"),
        }
    }
}

/// Access intent declared by a map request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapIntent {
    /// Host will only read through the window
    Read,
    /// Host may write through the window
    Write,
}

impl fmt::Display for MapIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapIntent::Read => write!(f, "read"),
            MapIntent::Write => write!(f, "write"),
        }
    }
}

/// A host-visible window onto a device buffer
///
/// Carries the host pointer together with the byte length of the mapped
/// region, so callers never have to do unchecked pointer arithmetic. The
/// pointer is valid from the map request that produced it until the matching
/// unmap request on the same buffer.
#[derive(Debug, Clone, Copy)]
pub struct MappedRange {
    /// Host-visible base pointer of the mapped region
    pub ptr: *mut u8,
    /// Length of the mapped region in bytes
    pub len: usize,
}

impl MappedRange {
    /// Create a new mapped range
    pub const fn new(ptr: *mut u8, len: usize) -> Self {
        Self { ptr, len }
    }

    /// Length of the mapped region in bytes
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if the mapped region is empty
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_handle() {
        let handle = BufferHandle::new(42);
        assert_eq!(handle.id(), 42);
        assert_eq!(handle.to_string(), "buf42");
    }

    #[test]
    fn test_alias_mode_display() {
        assert_eq!(AliasMode::HostCopy.to_string(), "host-copy");
        assert_eq!(AliasMode::DeviceFill.to_string(), "device-fill");
    }

    #[test]
    fn test_map_intent_display() {
        assert_eq!(MapIntent::Read.to_string(), "read");
        assert_eq!(MapIntent::Write.to_string(), "write");
    }

    #[test]
    fn test_mapped_range() {
        let mut storage = [0u8; 16];
        let range = MappedRange::new(storage.as_mut_ptr(), storage.len());
        assert_eq!(range.len(), 16);
        assert!(!range.is_empty());

        let empty = MappedRange::new(std::ptr::NonNull::<u8>::dangling().as_ptr(), 0);
        assert!(empty.is_empty());
    }
}
