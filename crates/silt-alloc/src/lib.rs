//! Allocator capability and C proxy bridge for the Silt GUI shim.
//!
//! The embedded GUI library never touches `malloc`/`free`. Every request
//! it makes goes through two C-ABI proxies carrying an opaque `userdata`
//! word; the bridge turns that word back into an [`Allocator`] and
//! forwards the call. The host owns all memory.
//!
//! # Architecture
//!
//! ```text
//! GUI library
//! └── AllocatorPlugin { userdata, alloc, free }      (repr(C), handed to C)
//!     ├── alloc_proxy(userdata, old, size) ──┐
//!     └── free_proxy(userdata, ptr) ─────────┤
//!                                            ▼
//!         Pin<&AllocatorHandle> → &dyn Allocator
//!                                            │
//!          ┌─────────────────┬───────────────┴───────┐
//!          ▼                 ▼                       ▼
//!     HeapAllocator    CallbackAllocator      host's own impl
//!     (std, counters)  (C vtable)
//! ```
//!
//! # `no_std`
//!
//! Without the default `std` feature the crate is `no_std` and carries
//! only the capability, the bridge and the callback allocator. Panics are
//! then not contained at the proxy boundary.
//!
//! This crate is one of two that may contain `unsafe` code (along with
//! `silt-ffi`).

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod allocator;
pub mod bridge;
pub mod callback;
pub mod config;
pub mod error;
mod guard;
#[cfg(feature = "std")]
pub mod heap;
#[cfg(feature = "std")]
pub mod stats;

// Public re-exports for the primary API surface.
pub use allocator::Allocator;
pub use bridge::{AllocatorHandle, AllocatorPlugin};
pub use callback::{CallbackAllocator, HostAllocatorDef};
pub use config::HeapConfig;
pub use error::{AllocError, ConfigError};
#[cfg(feature = "std")]
pub use heap::HeapAllocator;
#[cfg(feature = "std")]
pub use stats::{AllocStats, AllocStatsSnapshot};
