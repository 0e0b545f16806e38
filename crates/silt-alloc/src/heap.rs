//! Default allocator over the process heap.
//!
//! Each block is laid out as `[header][payload]`. The header holds the
//! payload size so `release` can rebuild the layout from the pointer
//! alone, which is all the GUI library gives back.

#![allow(unsafe_code)]

use std::alloc::{self as sys, Layout};
use std::ptr::{self, NonNull};

use crate::allocator::Allocator;
use crate::config::HeapConfig;
use crate::error::{AllocError, ConfigError};
use crate::stats::{AllocStats, AllocStatsSnapshot};

/// Header-prefixed allocator backed by `std::alloc`.
///
/// Zero-byte requests are rounded up to one byte so a successful result is
/// never null. `resize` always moves: fresh block, copy, release.
#[derive(Debug, Default)]
pub struct HeapAllocator {
    config: HeapConfig,
    stats: AllocStats,
}

impl HeapAllocator {
    /// Allocator with the default 16-byte alignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocator with a custom config. Fails if the config is invalid.
    pub fn with_config(config: HeapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            stats: AllocStats::new(),
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &HeapConfig {
        &self.config
    }

    /// Current allocation counters.
    pub fn stats(&self) -> AllocStatsSnapshot {
        self.stats.snapshot()
    }

    fn block_layout(&self, payload: usize) -> Result<Layout, AllocError> {
        let total = self
            .config
            .header_bytes()
            .checked_add(payload)
            .ok_or(AllocError::InvalidSize { requested: payload })?;
        Layout::from_size_align(total, self.config.alignment)
            .map_err(|_| AllocError::InvalidSize { requested: payload })
    }

    /// Block start and payload size for a payload pointer.
    ///
    /// # Safety
    ///
    /// `payload` must be a live block returned by this allocator.
    unsafe fn header(&self, payload: NonNull<u8>) -> (NonNull<u8>, usize) {
        // SAFETY: every payload sits `header_bytes` past the start of its block.
        let block = unsafe { payload.sub(self.config.header_bytes()) };
        // SAFETY: the block start is aligned for usize and holds the size word.
        let size = unsafe { block.cast::<usize>().read() };
        (block, size)
    }
}

impl Allocator for HeapAllocator {
    fn allocate(&self, size: usize) -> Result<NonNull<u8>, AllocError> {
        let payload = size.max(1);
        let layout = self.block_layout(payload)?;
        // SAFETY: layout size is at least header_bytes, never zero.
        let raw = unsafe { sys::alloc(layout) };
        let block = NonNull::new(raw).ok_or(AllocError::OutOfMemory { requested: size })?;
        // SAFETY: the block is aligned to `alignment >= align_of::<usize>()` and
        // its header spans at least `size_of::<usize>()` bytes.
        unsafe { block.cast::<usize>().write(payload) };
        self.stats.record_alloc(payload);
        // SAFETY: header_bytes < layout.size(), so the payload is in bounds.
        Ok(unsafe { block.add(self.config.header_bytes()) })
    }

    unsafe fn resize(&self, ptr: NonNull<u8>, new_size: usize) -> Result<NonNull<u8>, AllocError> {
        // SAFETY: caller contract.
        let (_, old_size) = unsafe { self.header(ptr) };
        let fresh = self.allocate(new_size)?;
        // SAFETY: distinct live blocks; both payloads span at least the copied length.
        unsafe { ptr::copy_nonoverlapping(ptr.as_ptr(), fresh.as_ptr(), old_size.min(new_size)) };
        // SAFETY: caller contract; `ptr` is not used again.
        unsafe { self.release(ptr) };
        self.stats.record_resize();
        Ok(fresh)
    }

    unsafe fn release(&self, ptr: NonNull<u8>) {
        // SAFETY: caller contract.
        let (block, size) = unsafe { self.header(ptr) };
        // SAFETY: this exact layout was validated when the block was allocated.
        let layout = unsafe {
            Layout::from_size_align_unchecked(self.config.header_bytes() + size, self.config.alignment)
        };
        // SAFETY: `block` was returned by `sys::alloc` with `layout`.
        unsafe { sys::dealloc(block.as_ptr(), layout) };
        self.stats.record_free(size);
    }
}
