//! Constant-sequence iterator
//!
//! Produces the same value at every position. Like the counting iterator
//! it owns no per-element host storage and staging it is allocation-free.

use super::category::{sealed, Categorized, Category};

/// Iterator that yields `value` at every position
#[derive(Debug, Clone, Copy)]
pub struct ConstantIterator<T> {
    value: T,
    index: usize,
}

impl<T: Copy> ConstantIterator<T> {
    /// Create a constant iterator
    pub fn new(value: T) -> Self {
        Self { value, index: 0 }
    }

    /// Current position
    pub fn index(&self) -> usize {
        self.index
    }

    /// The constant value
    pub fn value(&self) -> T {
        self.value
    }

    /// Iterator advanced by `n` positions
    pub fn advance(&self, n: usize) -> Self {
        Self {
            value: self.value,
            index: self.index + n,
        }
    }

    /// Pointer to the iterator's internal storage (the constant)
    pub fn storage_ptr(&self) -> *const T {
        &self.value
    }
}

impl<T> sealed::Sealed for ConstantIterator<T> {}
impl<T> Categorized for ConstantIterator<T> {
    const CATEGORY: Category = Category::Constant;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_value_everywhere() {
        let itr = ConstantIterator::new(7i64);
        assert_eq!(itr.value(), 7);
        assert_eq!(itr.advance(100).value(), 7);
        assert_eq!(itr.advance(100).index(), 100);
    }

    #[test]
    fn test_constant_category() {
        let itr = ConstantIterator::new(1.0f64);
        assert_eq!(itr.category(), Category::Constant);
    }
}
