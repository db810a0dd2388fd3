//! Device memory backends for the strider staging layer
//!
//! This crate provides:
//! - **Backend trait**: pluggable device memory interface (allocate, host
//!   transfer, map/unmap)
//! - **CPU backend**: reference implementation, always available
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 strider-core staging layer               │
//! │   (address resolution, materialization, mapped windows)  │
//! └─────────────────────┬───────────────────────────────────┘
//!                       │
//!                       ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                     Backend trait                        │
//! │   allocate / create-from-host / copy / map / unmap       │
//! └─────────────────────┬───────────────────────────────────┘
//!                       │
//!         ┌─────────────┴─────────────┐
//!         ▼                           ▼
//!   ┌─────────┐               ┌──────────────┐
//!   │   CPU   │               │ accelerator  │
//!   │ Backend │               │   backends   │
//!   └─────────┘               └──────────────┘
//! ```
//!
//! Buffers are opaque [`BufferHandle`]s. A buffer has at most one open
//! host-visible window at a time; a map request returns a bounds-carrying
//! [`MappedRange`] and the matching unmap restores exclusive device
//! ownership.
//!
//! # Usage
//!
//! ```rust
//! use strider_backends::{Backend, CpuBackend, MapIntent};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut backend = CpuBackend::new();
//!
//! // Create a buffer directly from host memory
//! let data = vec![1.0f32, 2.0, 3.0, 4.0];
//! let buffer = backend.create_buffer_from_host(bytemuck::cast_slice(&data))?;
//!
//! // Read it back
//! let mut result = vec![0.0f32; 4];
//! backend.copy_from_buffer(buffer, bytemuck::cast_slice_mut(&mut result))?;
//! assert_eq!(result, data);
//!
//! backend.free_buffer(buffer)?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod backends;
pub mod error;

// Re-export public API
pub use backend::{AliasMode, Backend, BufferHandle, MapIntent, MappedRange};
pub use backends::CpuBackend;
pub use error::{BackendError, Result};
