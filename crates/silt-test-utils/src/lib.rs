//! Test utilities and mock allocators for Silt development.
//!
//! Provides an instrumented [`MockAllocator`] implementing
//! [`silt_alloc::Allocator`], and a [`MockHost`] that exposes the same mock
//! through a C [`HostAllocatorDef`](silt_alloc::HostAllocatorDef) vtable
//! for exercising the callback path.

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod host;
pub mod mock;

pub use host::MockHost;
pub use mock::{AllocEvent, MockAllocator};
