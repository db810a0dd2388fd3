//! Iterator shapes and category tags

pub mod category;
pub mod constant;
pub mod counting;
pub mod permutation;
pub mod transform;

pub use category::{Categorized, Category};
pub use constant::ConstantIterator;
pub use counting::{CountingIterator, CountingValue};
pub use permutation::{IndexValue, PermutationIterator};
pub use transform::TransformIterator;
