//! # Strider Core
//!
//! Iterator staging layer for device-accelerated algorithms: resolves the
//! host addresses behind heterogeneous iterator shapes, materializes the
//! one composite shape that needs device buffers, and opens scoped
//! host-visible windows onto device memory.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 algorithm front-ends                 │
//! └──────────────────────┬───────────────────────────────┘
//!                        │
//!        ┌───────────────┼────────────────┐
//!        ▼               ▼                ▼
//!  address_of    create_device_itr   MappedWindow /
//!  (resolver)    + materializer      MappedComposite
//!        │               │                │
//!        └───────────────┼────────────────┘
//!                        ▼
//!                    Executor
//!               (shared Backend)
//! ```
//!
//! Dispatch over iterator shapes is closed: each facility is a trait
//! implemented for exactly the supported categories, so an unsupported
//! iterator type fails at compile time rather than at run time.
//!
//! ## Example
//!
//! ```
//! use strider_core::{address_of, Executor, MappedComposite, PermutationIterator};
//! use strider_core::stage::materialize_permutation;
//!
//! # fn main() -> strider_core::Result<()> {
//! let exec = Executor::new()?;
//!
//! let elements = [2.0f32, 9.0, 3.0, 7.0, 5.0];
//! let indices = [3u32, 0, 4];
//! let host = PermutationIterator::new(&elements[..], &indices[..]);
//!
//! // Host addresses drive extent computation before any allocation.
//! let pair = address_of(&host);
//! assert_eq!(pair.element, elements.as_ptr());
//!
//! // One buffer per sub-range, each sized from its own extent.
//! let dev = materialize_permutation(&exec, &host)?;
//! assert_eq!(dev.value_at(0)?, 7.0);
//!
//! // Scoped host access while the device is quiescent.
//! let mapped = MappedComposite::open(&dev)?;
//! assert_eq!(mapped.get(2)?, 5.0);
//! mapped.close()?;
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod error;
pub mod executor;
pub mod iter;
pub mod stage;
pub mod vector;
pub mod window;

pub use address::{address_of, AddressOf, AddressPair};
pub use error::{Error, Result};
pub use executor::{Executor, SharedBackend};
pub use iter::{
    Categorized, Category, ConstantIterator, CountingIterator, CountingValue, IndexValue,
    PermutationIterator, TransformIterator,
};
pub use stage::{create_device_itr, materialize_permutation, RebindDevice};
pub use vector::{DeviceVector, DeviceVectorIter};
pub use window::{MappedComposite, MappedWindow};
