//! Function-transformed iterator adaptor
//!
//! Decorates a base iterator with a unary function applied on access. The
//! adaptor owns no storage of its own; its address is its base's address,
//! and staging rebinds the same function onto a device-side base.

use super::category::{sealed, Categorized, Category};

/// Iterator that applies `func` to each element of `base` on access
#[derive(Clone)]
pub struct TransformIterator<F, I> {
    base: I,
    func: F,
}

impl<F, I> TransformIterator<F, I> {
    /// Create a transform iterator over `base`
    pub fn new(base: I, func: F) -> Self {
        Self { base, func }
    }

    /// The underlying base iterator
    pub fn base(&self) -> &I {
        &self.base
    }

    /// The transform function
    pub fn functor(&self) -> &F {
        &self.func
    }

    /// Rebind the same function onto a different base iterator
    ///
    /// This is the staging seam: a host transform iterator becomes a
    /// device transform iterator by rebinding onto a device-side base.
    pub fn rebind<J>(&self, base: J) -> TransformIterator<F, J>
    where
        F: Clone,
    {
        TransformIterator {
            base,
            func: self.func.clone(),
        }
    }
}

impl<'a, T, U, F: Fn(&T) -> U> TransformIterator<F, &'a [T]> {
    /// Number of elements in the underlying range
    pub fn len(&self) -> usize {
        self.base.len()
    }

    /// Check if the underlying range is empty
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Transformed value at position `n`
    pub fn value_at(&self, n: usize) -> U {
        (self.func)(&self.base[n])
    }
}

impl<F, I> sealed::Sealed for TransformIterator<F, I> {}
impl<F, I> Categorized for TransformIterator<F, I> {
    const CATEGORY: Category = Category::Transform;
}
