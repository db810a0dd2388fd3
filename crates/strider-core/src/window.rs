//! Mapped windows: host-visible views onto device buffers
//!
//! A window is opened with write intent against the active queue, blocks
//! until the device is done with the buffer, and stays open until it is
//! released. At most one window may be open per buffer. Release happens on
//! every exit path: [`MappedWindow::close`] consumes the guard and
//! propagates unmap failures; dropping the guard unmaps as a fallback and
//! logs instead.
//!
//! The device must not touch the buffer while a window is open. That is a
//! caller obligation; the layer enforces only the single-window rule.
//!
//! Only the composite permutation category participates in mapping; the
//! remaining categories already expose host-visible state without it.

use crate::error::Result;
use crate::iter::{IndexValue, PermutationIterator};
use crate::vector::{DeviceVector, DeviceVectorIter};
use std::sync::Arc;
use strider_backends::{MapIntent, MappedRange};

/// Scoped host-visible window onto a device vector's buffer
///
/// Holds a shared reference to the owning container, so the buffer cannot
/// be freed while the window is open. The window covers the whole buffer
/// and is bounds-carrying: views are handed out as slices, never raw
/// pointers.
pub struct MappedWindow<T> {
    vector: Arc<DeviceVector<T>>,
    range: MappedRange,
    released: bool,
}

impl<T: bytemuck::Pod> MappedWindow<T> {
    /// Open a window onto `vector`'s buffer with write intent
    ///
    /// Blocks until any outstanding device-side work on the buffer has
    /// completed.
    ///
    /// # Errors
    ///
    /// Fails if a window is already open against the buffer.
    #[tracing::instrument(skip(vector), fields(handle = %vector.handle(), bytes = vector.size_bytes()))]
    pub fn open(vector: &Arc<DeviceVector<T>>) -> Result<Self> {
        let range = vector
            .backend_ref()
            .write()
            .map_buffer(vector.handle(), MapIntent::Write)?;

        tracing::debug!(handle = %vector.handle(), bytes = range.len, "window_opened");

        Ok(Self {
            vector: Arc::clone(vector),
            range,
            released: false,
        })
    }

    /// Number of elements visible through the window
    pub fn len(&self) -> usize {
        self.range.len / std::mem::size_of::<T>()
    }

    /// Check if the window is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read-only view of the mapped region
    pub fn as_slice(&self) -> &[T] {
        // Backend storage is aligned for scalar Pod types; the range length
        // is a multiple of the element size by construction.
        unsafe { std::slice::from_raw_parts(self.range.ptr as *const T, self.len()) }
    }

    /// Mutable view of the mapped region
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.range.ptr as *mut T, self.len()) }
    }

    /// Release the window, restoring exclusive device ownership
    ///
    /// Consumes the guard; a second close is impossible by construction.
    pub fn close(mut self) -> Result<()> {
        self.released = true;
        self.vector
            .backend_ref()
            .write()
            .unmap_buffer(self.vector.handle())?;
        tracing::debug!(handle = %self.vector.handle(), "window_closed");
        Ok(())
    }
}

impl<T> Drop for MappedWindow<T> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.vector.backend_ref().write().unmap_buffer(self.vector.handle()) {
            tracing::warn!(handle = %self.vector.handle(), error = %e, "unmap on drop failed");
        }
    }
}

/// Host-usable cursor over a mapped device permutation iterator
///
/// Maps the element buffer (write intent) and snapshots the index sequence
/// host-side, forming the composite the caller reads and writes through
/// while the device is quiescent. Closing releases the element window; the
/// index snapshot needs no release.
pub struct MappedComposite<T, I> {
    window: MappedWindow<T>,
    indices: Vec<I>,
    elem_offset: usize,
}

impl<T, I> MappedComposite<T, I>
where
    T: bytemuck::Pod,
    I: bytemuck::Pod + IndexValue,
{
    /// Open a host-visible window onto a device permutation iterator
    ///
    /// The map request goes to the execution control captured by the
    /// element container at construction time.
    pub fn open(itr: &PermutationIterator<DeviceVectorIter<T>, DeviceVectorIter<I>>) -> Result<Self> {
        let window = MappedWindow::open(itr.element_iter().vector())?;

        let all_indices = itr.index_iter().vector().to_vec()?;
        let indices = all_indices[itr.index_iter().index()..].to_vec();

        Ok(Self {
            window,
            indices,
            elem_offset: itr.element_iter().index(),
        })
    }

    /// Number of logical positions
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check if no logical positions remain
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The index snapshot
    pub fn indices(&self) -> &[I] {
        &self.indices
    }

    /// The element window
    pub fn window(&self) -> &MappedWindow<T> {
        &self.window
    }

    /// Read the value at logical position `n`
    pub fn get(&self, n: usize) -> Result<T> {
        let idx = self.indices.get(n).copied().ok_or(crate::Error::OutOfRange {
            position: n,
            len: self.indices.len(),
        })?;

        let pos = self.elem_offset + idx.as_index();
        let slice = self.window.as_slice();
        slice.get(pos).copied().ok_or(crate::Error::OutOfRange {
            position: pos,
            len: slice.len(),
        })
    }

    /// Write `value` at logical position `n`
    pub fn set(&mut self, n: usize, value: T) -> Result<()> {
        let idx = self.indices.get(n).copied().ok_or(crate::Error::OutOfRange {
            position: n,
            len: self.indices.len(),
        })?;

        let pos = self.elem_offset + idx.as_index();
        let slice = self.window.as_mut_slice();
        let len = slice.len();
        let slot = slice.get_mut(pos).ok_or(crate::Error::OutOfRange { position: pos, len })?;
        *slot = value;
        Ok(())
    }

    /// Release the element window
    pub fn close(self) -> Result<()> {
        self.window.close()
    }
}
