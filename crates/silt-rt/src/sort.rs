//! In-place sort of fixed-stride elements by a three-way comparator.
//!
//! The elements are opaque byte records, so the standard sort runs over
//! an index permutation instead and the permutation is then applied to
//! the buffer cycle by cycle, one scratch element at a time. The buffer
//! is not touched until the comparison phase has finished; a comparator
//! that panics leaves it in its original order.

use std::cmp::Ordering;
use std::ffi::{c_int, c_void};

use smallvec::SmallVec;

use crate::error::SortError;

/// C comparator: negative, zero or positive for less, equal, greater.
pub type CompareFn = unsafe extern "C" fn(a: *const c_void, b: *const c_void) -> c_int;

/// Scratch elements up to this size stay on the stack.
const INLINE_ELEMENT_BYTES: usize = 64;

/// Sort `bytes` as consecutive `width`-byte elements, in place.
///
/// Stable. `width == 0` and buffers of fewer than two elements are a
/// no-op.
///
/// ```
/// let mut buf = [3u8, 1, 2];
/// silt_rt::sort_strided(&mut buf, 1, |a, b| a.cmp(b)).unwrap();
/// assert_eq!(buf, [1, 2, 3]);
/// ```
pub fn sort_strided<F>(bytes: &mut [u8], width: usize, mut cmp: F) -> Result<(), SortError>
where
    F: FnMut(&[u8], &[u8]) -> Ordering,
{
    if width == 0 {
        return Ok(());
    }
    if bytes.len() % width != 0 {
        return Err(SortError::Misaligned {
            len: bytes.len(),
            width,
        });
    }
    let count = bytes.len() / width;
    if count < 2 {
        return Ok(());
    }

    let mut order: Vec<usize> = (0..count).collect();
    {
        let view: &[u8] = bytes;
        let element = |i: usize| &view[i * width..(i + 1) * width];
        order.sort_by(|&a, &b| cmp(element(a), element(b)));
    }
    apply_permutation(bytes, width, &mut order);
    Ok(())
}

/// Move element `order[i]` to slot `i` for every `i`.
///
/// `order` is consumed as a visited marker: each entry becomes its own
/// index once placed.
fn apply_permutation(bytes: &mut [u8], width: usize, order: &mut [usize]) {
    let mut scratch: SmallVec<[u8; INLINE_ELEMENT_BYTES]> = SmallVec::from_elem(0, width);
    for start in 0..order.len() {
        if order[start] == start {
            continue;
        }
        scratch.copy_from_slice(&bytes[start * width..(start + 1) * width]);
        let mut hole = start;
        loop {
            let src = order[hole];
            order[hole] = hole;
            if src == start {
                bytes[hole * width..(hole + 1) * width].copy_from_slice(&scratch);
                break;
            }
            bytes.copy_within(src * width..(src + 1) * width, hole * width);
            hole = src;
        }
    }
}

/// `qsort`-shaped entry point over raw memory.
///
/// Null `base`, `width == 0`, fewer than two elements, or a byte length
/// that overflows `usize` leave the buffer untouched.
///
/// # Safety
///
/// `base` must be valid for reads and writes of `nel * width` bytes, and
/// `cmp` must be safe to call on any two element pointers in that range.
#[allow(unsafe_code)]
pub unsafe fn qsort_raw(base: *mut c_void, nel: usize, width: usize, cmp: CompareFn) {
    if base.is_null() || nel < 2 || width == 0 {
        return;
    }
    let Some(len) = nel.checked_mul(width) else {
        return;
    };
    // SAFETY: caller guarantees `base` spans `nel * width` writable bytes.
    let bytes = unsafe { std::slice::from_raw_parts_mut(base.cast::<u8>(), len) };
    let sorted = sort_strided(bytes, width, |a, b| {
        // SAFETY: both pointers address whole elements inside the caller's buffer.
        let r = unsafe { cmp(a.as_ptr().cast(), b.as_ptr().cast()) };
        r.cmp(&0)
    });
    // `len` is `nel * width`, so the buffer is never misaligned.
    debug_assert!(sorted.is_ok(), "qsort_raw: {sorted:?}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn as_u32s(bytes: &[u8]) -> Vec<u32> {
        bytes
            .chunks_exact(4)
            .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    fn from_u32s(values: &[u32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_ne_bytes()).collect()
    }

    fn by_u32(a: &[u8], b: &[u8]) -> Ordering {
        as_u32s(a)[0].cmp(&as_u32s(b)[0])
    }

    #[allow(unsafe_code)]
    unsafe extern "C" fn cmp_i32(a: *const c_void, b: *const c_void) -> c_int {
        let (a, b) = unsafe { (*(a as *const i32), *(b as *const i32)) };
        (a > b) as c_int - (a < b) as c_int
    }

    #[test]
    fn sorts_words() {
        let mut buf = from_u32s(&[5, 3, 9, 1, 3]);
        sort_strided(&mut buf, 4, by_u32).unwrap();
        assert_eq!(as_u32s(&buf), vec![1, 3, 3, 5, 9]);
    }

    #[test]
    fn stable_on_equal_keys() {
        // 2-byte records: (key, tag)
        let mut buf = vec![2, b'a', 1, b'b', 2, b'c', 1, b'd'];
        sort_strided(&mut buf, 2, |a, b| a[0].cmp(&b[0])).unwrap();
        assert_eq!(buf, vec![1, b'b', 1, b'd', 2, b'a', 2, b'c']);
    }

    #[test]
    fn wide_elements_spill_scratch_to_heap() {
        let width = INLINE_ELEMENT_BYTES * 2;
        let mut buf: Vec<u8> = [3u8, 1, 2]
            .iter()
            .flat_map(|&k| std::iter::repeat(k).take(width))
            .collect();
        sort_strided(&mut buf, width, |a, b| a[0].cmp(&b[0])).unwrap();
        for (i, chunk) in buf.chunks_exact(width).enumerate() {
            assert!(chunk.iter().all(|&b| b == i as u8 + 1));
        }
    }

    #[test]
    fn misaligned_buffer_rejected() {
        let mut buf = [0u8; 7];
        assert_eq!(
            sort_strided(&mut buf, 4, by_u32),
            Err(SortError::Misaligned { len: 7, width: 4 })
        );
    }

    #[test]
    fn degenerate_inputs_are_noops() {
        let mut buf = [9u8, 8, 7];
        sort_strided(&mut buf, 0, |a, b| a.cmp(b)).unwrap();
        sort_strided(&mut buf, 3, |a, b| a.cmp(b)).unwrap();
        assert_eq!(buf, [9, 8, 7]);
        sort_strided(&mut [], 4, by_u32).unwrap();
    }

    #[test]
    fn panicking_comparator_leaves_buffer_untouched() {
        let mut buf = from_u32s(&[4, 2, 3]);
        let before = buf.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = sort_strided(&mut buf, 4, |_, _| panic!("comparator failed"));
        }));
        assert!(result.is_err());
        assert_eq!(buf, before);
    }

    #[test]
    #[allow(unsafe_code)]
    fn raw_entry_point_sorts_c_array() {
        let mut values = [7i32, -2, 0, 15, -9];
        unsafe {
            qsort_raw(
                values.as_mut_ptr().cast(),
                values.len(),
                std::mem::size_of::<i32>(),
                cmp_i32,
            )
        };
        assert_eq!(values, [-9, -2, 0, 7, 15]);
    }

    #[test]
    #[allow(unsafe_code)]
    fn raw_entry_point_ignores_null_and_overflow() {
        unsafe { qsort_raw(std::ptr::null_mut(), 4, 4, cmp_i32) };
        let mut values = [2i32, 1];
        unsafe { qsort_raw(values.as_mut_ptr().cast(), usize::MAX, 4, cmp_i32) };
        assert_eq!(values, [2, 1]);
    }

    #[allow(unsafe_code)]
    unsafe extern "C" fn cmp_first_byte(a: *const c_void, b: *const c_void) -> c_int {
        let (a, b) = unsafe { (*(a as *const u8), *(b as *const u8)) };
        c_int::from(a) - c_int::from(b)
    }

    #[test]
    #[allow(unsafe_code)]
    fn raw_entry_point_handles_odd_width_records() {
        let mut records = *b"c01a02b03";
        unsafe { qsort_raw(records.as_mut_ptr().cast(), 3, 3, cmp_first_byte) };
        assert_eq!(&records, b"a02b03c01");
    }

    proptest! {
        #[test]
        fn matches_std_sort(values in prop::collection::vec(any::<u32>(), 0..64)) {
            let mut buf = from_u32s(&values);
            sort_strided(&mut buf, 4, by_u32).unwrap();
            let mut expected = values.clone();
            expected.sort();
            prop_assert_eq!(as_u32s(&buf), expected);
        }

        #[test]
        fn permutation_keeps_records_intact(
            records in prop::collection::vec((any::<u8>(), any::<[u8; 5]>()), 0..48),
        ) {
            let mut buf: Vec<u8> = records
                .iter()
                .flat_map(|(k, rest)| std::iter::once(*k).chain(rest.iter().copied()))
                .collect();
            sort_strided(&mut buf, 6, |a, b| a[0].cmp(&b[0])).unwrap();
            let mut expected = records.clone();
            expected.sort_by_key(|(k, _)| *k);
            let got: Vec<(u8, [u8; 5])> = buf
                .chunks_exact(6)
                .map(|c| (c[0], [c[1], c[2], c[3], c[4], c[5]]))
                .collect();
            prop_assert_eq!(got, expected);
        }
    }
}
