//! Backend trait and supporting types

pub mod traits;
pub mod types;

pub use traits::Backend;
pub use types::{AliasMode, BufferHandle, MapIntent, MappedRange};
