//! Device-resident containers and their cursors
//!
//! A [`DeviceVector`] owns exactly one device buffer and exposes typed host
//! transfer plus `begin`/`end` cursor access. The materializer heap-owns
//! newly created vectors behind `Arc` and hands them to the caller through
//! the cursors it returns, so the containers live as long as any iterator
//! over them.

use crate::error::{Error, Result};
use crate::executor::{Executor, SharedBackend};
use std::marker::PhantomData;
use std::sync::Arc;
use strider_backends::{AliasMode, BufferHandle};

/// Typed device-resident container
///
/// Wraps a device buffer handle together with the execution-control
/// reference captured at construction. The buffer is exclusively owned:
/// it is freed when the vector drops.
///
/// # Type Safety
///
/// `T` must be `bytemuck::Pod` so host transfers are plain byte copies.
pub struct DeviceVector<T> {
    backend: SharedBackend,
    handle: BufferHandle,
    len: usize,
    _phantom: PhantomData<T>,
}

impl<T> DeviceVector<T> {
    /// Number of elements
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the vector is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total size in bytes
    pub fn size_bytes(&self) -> usize {
        self.len * std::mem::size_of::<T>()
    }

    /// Handle of the underlying device buffer
    pub fn handle(&self) -> BufferHandle {
        self.handle
    }

    /// How the underlying buffer was created
    pub fn alias_mode(&self) -> Result<AliasMode> {
        Ok(self.backend.read().buffer_alias_mode(self.handle)?)
    }

    pub(crate) fn backend_ref(&self) -> &SharedBackend {
        &self.backend
    }

    /// Cursor at the first element
    pub fn begin(this: &Arc<Self>) -> DeviceVectorIter<T> {
        DeviceVectorIter {
            vector: Arc::clone(this),
            index: 0,
        }
    }

    /// Cursor one past the last element
    pub fn end(this: &Arc<Self>) -> DeviceVectorIter<T> {
        DeviceVectorIter {
            vector: Arc::clone(this),
            index: this.len,
        }
    }
}

impl<T: bytemuck::Pod> DeviceVector<T> {
    /// Allocate a zero-filled device vector of `len` elements
    #[tracing::instrument(skip(exec), fields(
        len = len,
        elem_size = std::mem::size_of::<T>(),
        type_name = std::any::type_name::<T>()
    ))]
    pub fn new(exec: &Executor, len: usize) -> Result<Self> {
        let backend = exec.backend();
        let size_bytes = len * std::mem::size_of::<T>();
        let handle = backend.write().allocate_buffer(size_bytes)?;

        tracing::debug!(handle = %handle, size_bytes = size_bytes, "device_vector_allocated");

        Ok(Self {
            backend,
            handle,
            len,
            _phantom: PhantomData,
        })
    }

    /// Create a device vector from host memory
    ///
    /// The buffer is constructed directly over the host data (alias mode
    /// `HostCopy`); there is no separate fill step. An empty slice
    /// produces a zero-size buffer.
    #[tracing::instrument(skip(exec, data), fields(
        len = data.len(),
        bytes = std::mem::size_of_val(data),
        type_name = std::any::type_name::<T>()
    ))]
    pub fn from_host(exec: &Executor, data: &[T]) -> Result<Self> {
        let backend = exec.backend();
        let handle = backend.write().create_buffer_from_host(bytemuck::cast_slice(data))?;

        tracing::debug!(
            handle = %handle,
            bytes = std::mem::size_of_val(data),
            "device_vector_from_host"
        );

        Ok(Self {
            backend,
            handle,
            len: data.len(),
            _phantom: PhantomData,
        })
    }

    /// Copy the vector's contents to a host `Vec` (D2H transfer)
    pub fn to_vec(&self) -> Result<Vec<T>> {
        let mut out = vec![T::zeroed(); self.len];
        self.backend
            .read()
            .copy_from_buffer(self.handle, bytemuck::cast_slice_mut(&mut out))?;
        Ok(out)
    }

    /// Copy data from a host slice into the vector (H2D transfer)
    ///
    /// # Errors
    ///
    /// Returns an error if the slice length does not match the vector
    /// length.
    pub fn copy_from_slice(&mut self, src: &[T]) -> Result<()> {
        if src.len() != self.len {
            return Err(Error::BufferSizeMismatch {
                expected: self.len,
                actual: src.len(),
            });
        }

        self.backend
            .write()
            .copy_to_buffer(self.handle, bytemuck::cast_slice(src))?;
        Ok(())
    }
}

impl<T> Drop for DeviceVector<T> {
    fn drop(&mut self) {
        // Drop cannot propagate; a failure here means a window was leaked.
        if let Err(e) = self.backend.write().free_buffer(self.handle) {
            tracing::warn!(handle = %self.handle, error = %e, "device buffer free failed");
        }
    }
}

/// Cursor over a [`DeviceVector`]
///
/// Holds a shared reference to its owning vector, so a cursor returned by
/// the materializer keeps the freshly created container alive.
pub struct DeviceVectorIter<T> {
    vector: Arc<DeviceVector<T>>,
    index: usize,
}

impl<T> Clone for DeviceVectorIter<T> {
    fn clone(&self) -> Self {
        Self {
            vector: Arc::clone(&self.vector),
            index: self.index,
        }
    }
}

impl<T> DeviceVectorIter<T> {
    /// Current element position
    pub fn index(&self) -> usize {
        self.index
    }

    /// The owning device-resident container
    pub fn vector(&self) -> &Arc<DeviceVector<T>> {
        &self.vector
    }

    /// Number of elements between this cursor and the container's end
    pub fn remaining(&self) -> usize {
        self.vector.len().saturating_sub(self.index)
    }

    /// Cursor advanced by `n` positions
    pub fn advance(&self, n: usize) -> Self {
        Self {
            vector: Arc::clone(&self.vector),
            index: self.index + n,
        }
    }

    /// Signed distance from this cursor to `other` over the same container
    pub fn distance_to(&self, other: &Self) -> isize {
        other.index as isize - self.index as isize
    }
}

impl<T> crate::iter::category::sealed::Sealed for DeviceVectorIter<T> {}
impl<T> crate::iter::Categorized for DeviceVectorIter<T> {
    const CATEGORY: crate::iter::Category = crate::iter::Category::DeviceResident;
}

impl<T: bytemuck::Pod> DeviceVectorIter<T> {
    /// Read the element currently referenced (D2H transfer)
    pub fn value(&self) -> Result<T> {
        let all = self.vector.to_vec()?;
        all.get(self.index).copied().ok_or(Error::OutOfRange {
            position: self.index,
            len: self.vector.len(),
        })
    }
}
