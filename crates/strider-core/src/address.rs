//! Address resolution for every iterator category
//!
//! Reports the host address(es) backing an iterator's storage, used for
//! extent and size computation before buffers are allocated, and for the
//! fallback host-execution path. Composite permutation iterators resolve
//! to a pair: the element address alone is insufficient, because two
//! permutation iterators N logical steps apart are N *index* positions
//! apart, not necessarily N element positions; size arithmetic must use
//! the index side.
//!
//! The dispatch is closed over the iterator categories; an iterator type
//! without an [`AddressOf`] impl fails to build. No runtime error exists.

use crate::iter::{
    Categorized, ConstantIterator, CountingIterator, CountingValue, IndexValue, PermutationIterator,
    TransformIterator,
};

/// The two addresses backing a composite permutation iterator
#[derive(Debug, Clone, Copy)]
pub struct AddressPair<T, I> {
    /// Address of the element sub-range
    pub element: *const T,
    /// Address of the index sub-range; arithmetic over the composite's
    /// logical positions uses this side
    pub index: *const I,
}

/// Address resolution, dispatched on the iterator's category
pub trait AddressOf: Categorized {
    /// Either a single pointer or an [`AddressPair`]
    type Address;

    /// The address(es) backing this iterator's storage
    fn address_of(&self) -> Self::Address;
}

/// Resolve the address(es) backing `itr`
pub fn address_of<It: AddressOf>(itr: &It) -> It::Address {
    itr.address_of()
}

// Raw pointer: identity, no dereference.
impl<T> AddressOf for *const T {
    type Address = *const T;

    fn address_of(&self) -> *const T {
        *self
    }
}

// Host random-access range: address of the element currently referenced.
impl<'a, T> AddressOf for &'a [T] {
    type Address = *const T;

    fn address_of(&self) -> *const T {
        self.as_ptr()
    }
}

// Counting/constant: no per-element host storage, so the internal storage
// pointer is reported without dereference.
impl<T: CountingValue> AddressOf for CountingIterator<T> {
    type Address = *const T;

    fn address_of(&self) -> *const T {
        self.storage_ptr()
    }
}

impl<T: Copy> AddressOf for ConstantIterator<T> {
    type Address = *const T;

    fn address_of(&self) -> *const T {
        self.storage_ptr()
    }
}

// Transform: resolves through its base; the adaptor itself owns nothing.
impl<F, I: AddressOf> AddressOf for TransformIterator<F, I> {
    type Address = I::Address;

    fn address_of(&self) -> I::Address {
        self.base().address_of()
    }
}

// Permutation: pair of (element address, index address). The pair's index
// component has the index sequence's element type, so distance arithmetic
// done with it is index-typed by construction.
impl<'e, 'i, T, I: IndexValue> AddressOf for PermutationIterator<&'e [T], &'i [I]> {
    type Address = AddressPair<T, I>;

    fn address_of(&self) -> AddressPair<T, I> {
        AddressPair {
            element: self.element_ptr(),
            index: self.index_ptr(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_of_slice_is_element_address() {
        let data = [2.0f32, 9.0, 3.0, 7.0];
        let range = &data[1..];
        assert_eq!(address_of(&range), &data[1] as *const f32);
    }

    #[test]
    fn test_address_of_raw_pointer_identity() {
        let data = [1u64, 2, 3];
        let ptr = data.as_ptr();
        assert_eq!(address_of(&ptr), ptr);
    }

    #[test]
    fn test_address_of_counting_and_constant() {
        let counting = CountingIterator::new(5i32);
        assert_eq!(address_of(&counting), counting.storage_ptr());

        let constant = ConstantIterator::new(9u32);
        assert_eq!(address_of(&constant), constant.storage_ptr());
    }

    #[test]
    fn test_address_of_transform_resolves_through_base() {
        let data = [1i32, 2, 3];
        let itr = TransformIterator::new(&data[..], |x: &i32| x * 2);
        assert_eq!(address_of(&itr), data.as_ptr());
    }

    #[test]
    fn test_address_of_permutation_pair() {
        let elements = [10i32, 20, 30];
        let indices = [2u32, 0];
        let itr = PermutationIterator::new(&elements[..], &indices[..]);

        let pair = address_of(&itr);
        assert_eq!(pair.element, elements.as_ptr());
        assert_eq!(pair.index, indices.as_ptr());
    }
}
