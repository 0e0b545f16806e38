//! Instrumented allocator that records every call and owns block contents.

use std::cell::RefCell;
use std::ptr::NonNull;

use indexmap::IndexMap;
use silt_alloc::{AllocError, Allocator};

/// One observed allocator call. Pointers are recorded as addresses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocEvent {
    /// Fresh block handed out.
    Allocate { ptr: usize, size: usize },
    /// Block at `old` replaced by a block at `new` of `size` bytes.
    Resize { old: usize, new: usize, size: usize },
    /// Known block released.
    Release { ptr: usize },
    /// Release of an address this mock never handed out (or already released).
    InvalidRelease { ptr: usize },
    /// Request refused because of [`MockAllocator::refuse_next`].
    Refused { size: usize },
}

struct Block {
    data: Box<[u8]>,
    size: usize,
}

#[derive(Default)]
struct MockState {
    /// Live blocks in allocation order, keyed by address.
    blocks: IndexMap<usize, Block>,
    events: Vec<AllocEvent>,
    refuse: usize,
}

/// Mock implementation of [`Allocator`].
///
/// Every block is a boxed byte slice pre-filled with [`MockAllocator::FILL`].
/// Contents can be written and inspected without `unsafe` through
/// [`write`](MockAllocator::write) and [`contents`](MockAllocator::contents).
/// Not `Sync`: like any bridge allocator it relies on callers serializing
/// access.
#[derive(Default)]
pub struct MockAllocator {
    state: RefCell<MockState>,
}

impl MockAllocator {
    /// Byte pattern of freshly allocated memory.
    pub const FILL: u8 = 0xCD;

    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse the next `n` allocate/resize requests with `OutOfMemory`.
    pub fn refuse_next(&self, n: usize) {
        self.state.borrow_mut().refuse = n;
    }

    /// Every call observed so far, in order.
    pub fn events(&self) -> Vec<AllocEvent> {
        self.state.borrow().events.clone()
    }

    /// Number of successful fresh allocations.
    pub fn allocation_count(&self) -> usize {
        self.count(|e| matches!(e, AllocEvent::Allocate { .. }))
    }

    /// Number of successful resizes.
    pub fn resize_count(&self) -> usize {
        self.count(|e| matches!(e, AllocEvent::Resize { .. }))
    }

    /// Number of releases of known blocks.
    pub fn release_count(&self) -> usize {
        self.count(|e| matches!(e, AllocEvent::Release { .. }))
    }

    /// Number of blocks currently live.
    pub fn live_blocks(&self) -> usize {
        self.state.borrow().blocks.len()
    }

    /// Sum of requested sizes of live blocks.
    pub fn live_bytes(&self) -> usize {
        self.state.borrow().blocks.values().map(|b| b.size).sum()
    }

    /// Requested size of the live block at `ptr`.
    pub fn size_of(&self, ptr: *const u8) -> Option<usize> {
        self.state.borrow().blocks.get(&(ptr as usize)).map(|b| b.size)
    }

    /// Copy of the first `size` bytes of the live block at `ptr`.
    pub fn contents(&self, ptr: *const u8) -> Option<Vec<u8>> {
        self.state
            .borrow()
            .blocks
            .get(&(ptr as usize))
            .map(|b| b.data[..b.size].to_vec())
    }

    /// Write `bytes` at the start of the live block at `ptr`.
    ///
    /// Returns `false` if the block is unknown or too small.
    pub fn write(&self, ptr: *const u8, bytes: &[u8]) -> bool {
        let mut state = self.state.borrow_mut();
        match state.blocks.get_mut(&(ptr as usize)) {
            Some(block) if bytes.len() <= block.size => {
                block.data[..bytes.len()].copy_from_slice(bytes);
                true
            }
            _ => false,
        }
    }

    fn count(&self, pred: impl Fn(&AllocEvent) -> bool) -> usize {
        self.state.borrow().events.iter().filter(|e| pred(e)).count()
    }

    /// Consume one refusal if armed.
    fn take_refusal(state: &mut MockState, size: usize) -> bool {
        if state.refuse == 0 {
            return false;
        }
        state.refuse -= 1;
        state.events.push(AllocEvent::Refused { size });
        true
    }

    fn new_block(size: usize) -> (usize, Block) {
        // One spare byte keeps zero-size blocks at distinct addresses.
        let mut data = vec![Self::FILL; size.max(1)].into_boxed_slice();
        let addr = data.as_mut_ptr() as usize;
        (addr, Block { data, size })
    }
}

impl Allocator for MockAllocator {
    fn allocate(&self, size: usize) -> Result<NonNull<u8>, AllocError> {
        let mut state = self.state.borrow_mut();
        if Self::take_refusal(&mut state, size) {
            return Err(AllocError::OutOfMemory { requested: size });
        }
        let (addr, mut block) = Self::new_block(size);
        let ptr = NonNull::new(block.data.as_mut_ptr()).ok_or(AllocError::InvalidAddress)?;
        state.blocks.insert(addr, block);
        state.events.push(AllocEvent::Allocate { ptr: addr, size });
        Ok(ptr)
    }

    #[allow(unsafe_code)]
    unsafe fn resize(&self, ptr: NonNull<u8>, new_size: usize) -> Result<NonNull<u8>, AllocError> {
        let mut state = self.state.borrow_mut();
        let old_addr = ptr.as_ptr() as usize;
        if !state.blocks.contains_key(&old_addr) {
            return Err(AllocError::InvalidAddress);
        }
        if Self::take_refusal(&mut state, new_size) {
            return Err(AllocError::OutOfMemory {
                requested: new_size,
            });
        }
        let (new_addr, mut fresh) = Self::new_block(new_size);
        if let Some(old) = state.blocks.shift_remove(&old_addr) {
            let keep = old.size.min(new_size);
            fresh.data[..keep].copy_from_slice(&old.data[..keep]);
        }
        let new_ptr = NonNull::new(fresh.data.as_mut_ptr()).ok_or(AllocError::InvalidAddress)?;
        state.blocks.insert(new_addr, fresh);
        state.events.push(AllocEvent::Resize {
            old: old_addr,
            new: new_addr,
            size: new_size,
        });
        Ok(new_ptr)
    }

    #[allow(unsafe_code)]
    unsafe fn release(&self, ptr: NonNull<u8>) {
        let mut state = self.state.borrow_mut();
        let addr = ptr.as_ptr() as usize;
        let event = match state.blocks.shift_remove(&addr) {
            Some(_) => AllocEvent::Release { ptr: addr },
            None => AllocEvent::InvalidRelease { ptr: addr },
        };
        state.events.push(event);
    }
}
