//! Allocation counters for [`HeapAllocator`](crate::HeapAllocator).

use core::sync::atomic::{AtomicUsize, Ordering};

/// Running counters. Relaxed atomics: values are diagnostic, not a
/// synchronisation point.
#[derive(Debug, Default)]
pub struct AllocStats {
    alloc_count: AtomicUsize,
    free_count: AtomicUsize,
    resize_count: AtomicUsize,
    total_allocated_bytes: AtomicUsize,
    current_allocated_bytes: AtomicUsize,
}

/// Point-in-time copy of [`AllocStats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocStatsSnapshot {
    /// Successful allocations, including the fresh block of each resize.
    pub alloc_count: usize,
    /// Releases, including the old block of each resize.
    pub free_count: usize,
    /// Successful resizes.
    pub resize_count: usize,
    /// Payload bytes ever handed out.
    pub total_allocated_bytes: usize,
    /// Payload bytes currently live.
    pub current_allocated_bytes: usize,
}

impl AllocStats {
    /// All counters at zero.
    pub const fn new() -> Self {
        Self {
            alloc_count: AtomicUsize::new(0),
            free_count: AtomicUsize::new(0),
            resize_count: AtomicUsize::new(0),
            total_allocated_bytes: AtomicUsize::new(0),
            current_allocated_bytes: AtomicUsize::new(0),
        }
    }

    pub(crate) fn record_alloc(&self, bytes: usize) {
        self.alloc_count.fetch_add(1, Ordering::Relaxed);
        self.total_allocated_bytes.fetch_add(bytes, Ordering::Relaxed);
        self.current_allocated_bytes.fetch_add(bytes, Ordering::Relaxed);
    }

    pub(crate) fn record_free(&self, bytes: usize) {
        self.free_count.fetch_add(1, Ordering::Relaxed);
        self.current_allocated_bytes.fetch_sub(bytes, Ordering::Relaxed);
    }

    pub(crate) fn record_resize(&self) {
        self.resize_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Read every counter.
    pub fn snapshot(&self) -> AllocStatsSnapshot {
        AllocStatsSnapshot {
            alloc_count: self.alloc_count.load(Ordering::Relaxed),
            free_count: self.free_count.load(Ordering::Relaxed),
            resize_count: self.resize_count.load(Ordering::Relaxed),
            total_allocated_bytes: self.total_allocated_bytes.load(Ordering::Relaxed),
            current_allocated_bytes: self.current_allocated_bytes.load(Ordering::Relaxed),
        }
    }
}
