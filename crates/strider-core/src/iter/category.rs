//! Iterator category tags
//!
//! Every iterator shape the staging layer accepts carries a category,
//! assigned once per type at compile time. The set is closed: supporting a
//! new shape means adding a `Category` variant and implementing the
//! dispatch traits ([`crate::AddressOf`], [`crate::RebindDevice`]) for the
//! new type. There is no open-ended fallback; an unknown shape is a build
//! failure, not a runtime error.

use std::fmt;

/// Iterator category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Raw pointer or host random-access range
    RandomAccess,
    /// Cursor over a device-resident container
    DeviceResident,
    /// Index-permuted composite (element sub-iterator + index sub-iterator)
    Permutation,
    /// Function-transformed adaptor
    Transform,
    /// Counting sequence, computed on access
    Counting,
    /// Constant sequence, computed on access
    Constant,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::RandomAccess => write!(f, "random-access"),
            Category::DeviceResident => write!(f, "device-resident"),
            Category::Permutation => write!(f, "permutation"),
            Category::Transform => write!(f, "transform"),
            Category::Counting => write!(f, "counting"),
            Category::Constant => write!(f, "constant"),
        }
    }
}

#[doc(hidden)]
pub mod sealed {
    pub trait Sealed {}
}

/// Compile-time category tag
///
/// Sealed: only the shapes defined in this crate participate.
pub trait Categorized: sealed::Sealed {
    /// The category assigned to this iterator type
    const CATEGORY: Category;

    /// Category of this iterator instance
    fn category(&self) -> Category {
        Self::CATEGORY
    }
}

impl<'a, T> sealed::Sealed for &'a [T] {}
impl<'a, T> Categorized for &'a [T] {
    const CATEGORY: Category = Category::RandomAccess;
}

impl<T> sealed::Sealed for *const T {}
impl<T> Categorized for *const T {
    const CATEGORY: Category = Category::RandomAccess;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_display() {
        assert_eq!(Category::RandomAccess.to_string(), "random-access");
        assert_eq!(Category::Permutation.to_string(), "permutation");
        assert_eq!(Category::Constant.to_string(), "constant");
    }

    #[test]
    fn test_slice_category() {
        let data = [1, 2, 3];
        let range: &[i32] = &data;
        assert_eq!(range.category(), Category::RandomAccess);

        let ptr = data.as_ptr();
        assert_eq!(ptr.category(), Category::RandomAccess);
    }
}
