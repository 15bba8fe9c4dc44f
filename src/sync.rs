//! Optional `GlobalAlloc` front end, gated behind the `global` feature.
//!
//! Wraps an [`Allocator`] over [`SbrkArena`] in a `Mutex`, lazily
//! initialized on first use, matching how the pack's other `GlobalAlloc`
//! implementations guard a shared allocator behind one lock.

use std::alloc::{GlobalAlloc, Layout};
use std::sync::Mutex;

use crate::allocator::Allocator;
use crate::arena::SbrkArena;

/// A process-wide heap suitable for `#[global_allocator]`.
pub struct GlobalHeap {
    inner: Mutex<Option<Allocator<SbrkArena>>>,
}

impl GlobalHeap {
    /// Creates an uninitialized global heap. The backing arena is not
    /// touched until the first allocation request.
    #[must_use]
    pub const fn new() -> Self {
        Self { inner: Mutex::new(None) }
    }

    fn with_initialized<R>(&self, f: impl FnOnce(&mut Allocator<SbrkArena>) -> R) -> R {
        let mut guard = self.inner.lock().expect("global heap mutex poisoned");
        if guard.is_none() {
            let mut allocator = Allocator::new(SbrkArena::new());
            allocator.init().expect("initial arena extension failed");
            *guard = Some(allocator);
        }
        f(guard.as_mut().unwrap())
    }
}

impl Default for GlobalHeap {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl GlobalAlloc for GlobalHeap {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        debug_assert!(layout.align() <= 8, "tagalloc only guarantees 8-byte alignment");
        self.with_initialized(|a| a.allocate(layout.size()))
    }

    unsafe fn dealloc(&self, ptr: *mut u8, _layout: Layout) {
        self.with_initialized(|a| unsafe { a.free(ptr) });
    }

    unsafe fn realloc(&self, ptr: *mut u8, _layout: Layout, new_size: usize) -> *mut u8 {
        self.with_initialized(|a| unsafe { a.reallocate(ptr, new_size) })
    }
}
