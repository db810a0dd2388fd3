//! Index-permuted composite iterator
//!
//! Traversal order is defined by an auxiliary index sequence, not by the
//! element sequence: the value at logical position `n` is
//! `elements[indices[n]]`. Consequently the distance between two
//! permutation iterators is the distance between their index cursors
//! (the element sub-range plays no part in it), and the iterator's
//! "address" is a pair (element address, index address).

use super::category::{sealed, Categorized, Category};
use crate::error::{Error, Result};
use crate::vector::DeviceVectorIter;

/// Integer types usable as a permutation index
pub trait IndexValue: Copy {
    /// The element position this index value refers to
    fn as_index(self) -> usize;
}

macro_rules! impl_index_value {
    ($($t:ty),* $(,)?) => {$(
        impl IndexValue for $t {
            fn as_index(self) -> usize {
                self as usize
            }
        }
    )*};
}

impl_index_value!(u16, u32, u64, usize, i32, i64);

/// Composite iterator over an element sub-iterator and an index sub-iterator
///
/// `E` and `I` are host slices before materialization and
/// [`DeviceVectorIter`]s after; the composite shape is preserved
/// end-to-end, never collapsed to a single cursor.
#[derive(Debug, Clone)]
pub struct PermutationIterator<E, I> {
    elements: E,
    indices: I,
}

impl<E, I> PermutationIterator<E, I> {
    /// Compose a permutation iterator from its two sub-iterators
    pub fn new(elements: E, indices: I) -> Self {
        Self { elements, indices }
    }

    /// The element sub-iterator
    pub fn element_iter(&self) -> &E {
        &self.elements
    }

    /// The index sub-iterator
    pub fn index_iter(&self) -> &I {
        &self.indices
    }

    /// Decompose into the two sub-iterators
    pub fn into_parts(self) -> (E, I) {
        (self.elements, self.indices)
    }
}

impl<E, I> sealed::Sealed for PermutationIterator<E, I> {}
impl<E, I> Categorized for PermutationIterator<E, I> {
    const CATEGORY: Category = Category::Permutation;
}

// ================================================================================================
// Host form: both sub-iterators are slices
// ================================================================================================

impl<'e, 'i, T, I: IndexValue> PermutationIterator<&'e [T], &'i [I]> {
    /// Logical length: the number of remaining index positions
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check if no index positions remain
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Value at logical position `n`
    pub fn value_at(&self, n: usize) -> T
    where
        T: Copy,
    {
        self.elements[self.indices[n].as_index()]
    }

    /// Iterator advanced by `n` logical steps
    ///
    /// Advancing consumes index positions only; the element sub-range is
    /// left untouched, since indices address it absolutely.
    pub fn advance(&self, n: usize) -> Self {
        Self {
            elements: self.elements,
            indices: &self.indices[n..],
        }
    }

    /// Index-count distance from this iterator to `later`
    pub fn distance_to(&self, later: &Self) -> usize {
        self.indices.len() - later.indices.len()
    }

    /// Address of the element sub-range
    pub fn element_ptr(&self) -> *const T {
        self.elements.as_ptr()
    }

    /// Address of the index sub-range
    pub fn index_ptr(&self) -> *const I {
        self.indices.as_ptr()
    }
}

// ================================================================================================
// Device form: both sub-iterators are device cursors
// ================================================================================================

impl<T, I> PermutationIterator<DeviceVectorIter<T>, DeviceVectorIter<I>>
where
    T: bytemuck::Pod,
    I: bytemuck::Pod + IndexValue,
{
    /// Logical length: remaining index positions
    pub fn len(&self) -> usize {
        self.indices.remaining()
    }

    /// Check if no index positions remain
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index-count distance from this iterator to `later`
    pub fn distance_to(&self, later: &Self) -> isize {
        self.indices.distance_to(&later.indices)
    }

    /// Value at logical position `n` (D2H transfer of both sub-buffers)
    pub fn value_at(&self, n: usize) -> Result<T> {
        let indices = self.indices.vector().to_vec()?;
        let elements = self.elements.vector().to_vec()?;

        let pos = self.indices.index() + n;
        let idx = indices.get(pos).copied().ok_or(Error::OutOfRange {
            position: pos,
            len: indices.len(),
        })?;

        let elem_pos = self.elements.index() + idx.as_index();
        elements.get(elem_pos).copied().ok_or(Error::OutOfRange {
            position: elem_pos,
            len: elements.len(),
        })
    }
}
