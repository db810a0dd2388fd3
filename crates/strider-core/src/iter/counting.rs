//! Counting-sequence iterator
//!
//! Produces `first, first + 1, first + 2, ...` on access. Carries no
//! per-element host storage, so staging it to the device is an identity
//! operation and must never allocate a buffer.

use super::category::{sealed, Categorized, Category};

/// Scalar types usable as a counting sequence value
pub trait CountingValue: Copy {
    /// The value `n` positions after `self`
    fn offset_by(self, n: usize) -> Self;
}

macro_rules! impl_counting_value {
    ($($t:ty),* $(,)?) => {$(
        impl CountingValue for $t {
            fn offset_by(self, n: usize) -> Self {
                self + n as $t
            }
        }
    )*};
}

impl_counting_value!(i32, i64, u32, u64, usize, f32, f64);

/// Iterator over the sequence `first, first + 1, ...`
#[derive(Debug, Clone, Copy)]
pub struct CountingIterator<T> {
    first: T,
    index: usize,
}

impl<T: CountingValue> CountingIterator<T> {
    /// Create a counting iterator starting at `first`
    pub fn new(first: T) -> Self {
        Self { first, index: 0 }
    }

    /// Current position
    pub fn index(&self) -> usize {
        self.index
    }

    /// Value at the current position
    pub fn value(&self) -> T {
        self.first.offset_by(self.index)
    }

    /// Value `n` positions past the current one
    pub fn value_at(&self, n: usize) -> T {
        self.first.offset_by(self.index + n)
    }

    /// Iterator advanced by `n` positions
    pub fn advance(&self, n: usize) -> Self {
        Self {
            first: self.first,
            index: self.index + n,
        }
    }

    /// Pointer to the iterator's internal storage (the start value)
    ///
    /// Counting iterators own no per-element host storage; this is the
    /// address the resolver reports for them.
    pub fn storage_ptr(&self) -> *const T {
        &self.first
    }
}

impl<T> sealed::Sealed for CountingIterator<T> {}
impl<T> Categorized for CountingIterator<T> {
    const CATEGORY: Category = Category::Counting;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_values() {
        let itr = CountingIterator::new(5i32);
        assert_eq!(itr.value(), 5);
        assert_eq!(itr.value_at(3), 8);

        let later = itr.advance(10);
        assert_eq!(later.value(), 15);
        assert_eq!(later.index(), 10);
    }

    #[test]
    fn test_counting_float() {
        let itr = CountingIterator::new(0.5f32);
        assert_eq!(itr.value_at(2), 2.5);
    }

    #[test]
    fn test_counting_category() {
        let itr = CountingIterator::new(0u64);
        assert_eq!(itr.category(), Category::Counting);
    }
}
