//! Deterministic workloads for the Silt benchmarks.
//!
//! - [`floor_inputs`]: layout-coordinate-like doubles for `floor`
//! - [`alloc_sizes`]: request sizes shaped like the GUI library's buffers
//! - [`rect_records`]: packed rectangle records for the strided sort

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Width of one record produced by [`rect_records`]: `id: u32, h: u32`.
pub const RECT_WIDTH: usize = 8;

/// Uniform in `[0, 1)` from the top 53 bits of one draw.
fn unit(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}

/// `n` doubles: mostly pixel coordinates in `[-4096, 4096)`, with every
/// eighth value a sub-unit fraction to hit the `|x| < 1` path.
pub fn floor_inputs(seed: u64, n: usize) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let u = unit(&mut rng);
            if i % 8 == 7 {
                u * 2.0 - 1.0
            } else {
                u * 8192.0 - 4096.0
            }
        })
        .collect()
}

/// `n` allocation sizes between 16 bytes and 64 KiB, skewed small.
pub fn alloc_sizes(seed: u64, n: usize) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| 16usize << (rng.next_u32() % 13))
        .collect()
}

/// `n` rectangle records, `RECT_WIDTH` bytes each, with random heights.
pub fn rect_records(seed: u64, n: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(n * RECT_WIDTH);
    for id in 0..n as u32 {
        out.extend_from_slice(&id.to_ne_bytes());
        out.extend_from_slice(&(rng.next_u32() % 512).to_ne_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workloads_are_deterministic() {
        assert_eq!(floor_inputs(7, 64), floor_inputs(7, 64));
        assert_eq!(alloc_sizes(7, 64), alloc_sizes(7, 64));
        assert_eq!(rect_records(7, 16), rect_records(7, 16));
        assert_ne!(alloc_sizes(7, 64), alloc_sizes(8, 64));
    }

    #[test]
    fn floor_inputs_cover_fraction_path() {
        let xs = floor_inputs(1, 800);
        assert!(xs.iter().all(|x| (-4096.0..4096.0).contains(x)));
        assert!(xs.iter().skip(7).step_by(8).all(|x| x.abs() < 1.0));
    }

    #[test]
    fn alloc_sizes_in_range() {
        let sizes = alloc_sizes(3, 1000);
        assert!(sizes.iter().all(|&s| (16..=65536).contains(&s)));
    }

    #[test]
    fn rect_records_have_sequential_ids() {
        let bytes = rect_records(5, 10);
        assert_eq!(bytes.len(), 10 * RECT_WIDTH);
        for (i, rec) in bytes.chunks_exact(RECT_WIDTH).enumerate() {
            let id = u32::from_ne_bytes(rec[..4].try_into().unwrap());
            assert_eq!(id as usize, i);
        }
    }
}
