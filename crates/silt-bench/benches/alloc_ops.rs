//! Criterion micro-benchmarks for the allocator proxies.

use std::hint::black_box;
use std::pin::pin;
use std::ptr;

use criterion::{criterion_group, criterion_main, Criterion};
use silt_alloc::bridge::{alloc_proxy, free_proxy};
use silt_alloc::{AllocatorHandle, HeapAllocator};
use silt_bench::alloc_sizes;

fn bench_alloc_free_pairs(c: &mut Criterion) {
    let heap = HeapAllocator::new();
    let handle = pin!(AllocatorHandle::new(&heap));
    let userdata = handle.as_ref().userdata();
    let sizes = alloc_sizes(42, 1024);

    c.bench_function("proxy_alloc_free_1k", |b| {
        b.iter(|| {
            for &size in &sizes {
                // SAFETY: userdata is a pinned live handle; p came from it.
                unsafe {
                    let p = alloc_proxy(userdata, ptr::null_mut(), black_box(size));
                    free_proxy(userdata, p);
                }
            }
        });
    });
}

fn bench_resize_chain(c: &mut Criterion) {
    let heap = HeapAllocator::new();
    let handle = pin!(AllocatorHandle::new(&heap));
    let userdata = handle.as_ref().userdata();
    let sizes = alloc_sizes(9, 256);

    c.bench_function("proxy_resize_chain_256", |b| {
        b.iter(|| {
            // SAFETY: every pointer passed back came from the same handle.
            unsafe {
                let mut p = alloc_proxy(userdata, ptr::null_mut(), 16);
                for &size in &sizes {
                    p = alloc_proxy(userdata, p, black_box(size));
                }
                free_proxy(userdata, p);
            }
        });
    });
}

criterion_group!(benches, bench_alloc_free_pairs, bench_resize_chain);
criterion_main!(benches);
