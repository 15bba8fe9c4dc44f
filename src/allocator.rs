//! Allocator policy: `init`, `allocate`, `free`, `reallocate`, and the
//! internal `coalesce`, `extend_heap`, `find_fit`, `place` they share.
//!
//! The free-list head and arena base live on this struct rather than in
//! process globals, so more than one `Allocator` can coexist (handy for
//! tests), but nothing inside makes it safe to share one across threads —
//! see `sync` for a `Mutex`-wrapped front end.

use log::{debug, trace};

use crate::align::{align_up, DSIZE, MIN_BLOCK, WSIZE};
use crate::arena::Arena;
use crate::block;
use crate::cell;
use crate::error::AllocError;
use crate::list;

/// A single-arena explicit-free-list allocator with boundary-tag
/// coalescing and first-fit placement.
pub struct Allocator<A: Arena> {
    arena: A,
    base: *mut u8,
    free_head: Option<*mut u8>,
}

impl<A: Arena> Allocator<A> {
    /// Prologue (1 word) + initial free block (4 words) + epilogue (1 word).
    const INIT_SIZE: usize = 6 * WSIZE;

    /// Builds an allocator over `arena`. Call [`Allocator::init`] before
    /// any other operation.
    pub fn new(arena: A) -> Self {
        Self { arena, base: core::ptr::null_mut(), free_head: None }
    }

    /// Requests the initial arena extension and lays down the prologue,
    /// one free block, and the epilogue sentinel.
    ///
    /// Must be called exactly once before `allocate`, `free`, or
    /// `reallocate`.
    pub fn init(&mut self) -> Result<(), AllocError> {
        let base = self.arena.extend(Self::INIT_SIZE)?;
        self.base = base;
        unsafe {
            cell::write(base, cell::pack(MIN_BLOCK as u32, true));
            let free_payload = base.add(2 * WSIZE);
            block::set_header_footer(free_payload, MIN_BLOCK, false);
            cell::write(base.add(5 * WSIZE), cell::pack(0, true));
            self.free_head = None;
            list::insert_head(self.base, &mut self.free_head, free_payload);
        }
        trace!("init: arena base = {:p}, initial free block = {MIN_BLOCK} bytes", self.base);
        Ok(())
    }

    /// Returns a pointer to at least `size` usable bytes, or null if the
    /// arena could not be extended to satisfy the request. `size == 0`
    /// returns null without touching the arena.
    pub fn allocate(&mut self, size: usize) -> *mut u8 {
        if size == 0 {
            return core::ptr::null_mut();
        }
        let asize = Self::adjusted_size(size);
        if let Some(found) = self.find_fit(asize) {
            unsafe { self.place(found, asize) };
            return found;
        }
        let extend_size = core::cmp::max(asize, MIN_BLOCK);
        let words = extend_size / WSIZE;
        let Some(block) = (unsafe { self.extend_heap(words) }) else {
            return core::ptr::null_mut();
        };
        unsafe { self.place(block, asize) };
        block
    }

    /// Returns `payload`'s block to the free list, coalescing with free
    /// neighbors.
    ///
    /// # Safety
    /// `payload` must have been returned by `allocate` or `reallocate` on
    /// this allocator and must not already be free.
    pub unsafe fn free(&mut self, payload: *mut u8) {
        unsafe {
            let size = block::size(block::header(payload));
            block::set_header_footer(payload, size, false);
            self.coalesce(payload);
        }
    }

    /// Resizes the block at `payload` to hold `size` bytes, preserving its
    /// contents up to the smaller of the old and new sizes.
    ///
    /// A null `payload` behaves like `allocate`; a zero `size` behaves
    /// like `free` and returns null. Returns null, leaving `payload`
    /// untouched, if growth requires a new block and the arena cannot be
    /// extended.
    ///
    /// # Safety
    /// If non-null, `payload` must have been returned by `allocate` or
    /// `reallocate` on this allocator and must not already be free.
    pub unsafe fn reallocate(&mut self, payload: *mut u8, size: usize) -> *mut u8 {
        if payload.is_null() {
            return self.allocate(size);
        }
        if size == 0 {
            unsafe { self.free(payload) };
            return core::ptr::null_mut();
        }

        let asize = Self::adjusted_size(size);
        let current = unsafe { block::size(block::header(payload)) };
        if asize == current {
            return payload;
        }

        if asize < current {
            let leftover = current - asize;
            if leftover >= MIN_BLOCK {
                unsafe {
                    block::set_header_footer(payload, asize, true);
                    let remainder = payload.add(asize);
                    self.free_block_at(remainder, leftover);
                }
            }
            return payload;
        }

        unsafe {
            let next_payload = block::next_block(payload);
            let next_header = block::header(next_payload);
            if !block::alloc(next_header) {
                let next_size = block::size(next_header);
                if current + next_size >= asize {
                    list::unlink(self.base, &mut self.free_head, next_payload);
                    let combined = current + next_size;
                    let leftover = combined - asize;
                    if leftover >= MIN_BLOCK {
                        block::set_header_footer(payload, asize, true);
                        let remainder = payload.add(asize);
                        self.free_block_at(remainder, leftover);
                    } else {
                        block::set_header_footer(payload, combined, true);
                    }
                    return payload;
                }
            }
        }

        let new_payload = self.allocate(size);
        if new_payload.is_null() {
            return core::ptr::null_mut();
        }
        unsafe {
            let copy_len = core::cmp::min(current, asize) - DSIZE;
            core::ptr::copy_nonoverlapping(payload, new_payload, copy_len);
            self.free(payload);
        }
        new_payload
    }

    /// Returns `true` if the arena's internal bookkeeping (block tags and
    /// free-list links) is self-consistent. Exposed for tests.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        self.check()
    }

    #[cfg(test)]
    pub(crate) fn base_ptr(&self) -> *mut u8 {
        self.base
    }

    #[cfg(test)]
    pub(crate) fn free_head(&self) -> Option<*mut u8> {
        self.free_head
    }

    #[cfg(test)]
    pub(crate) fn arena_end(&self) -> *mut u8 {
        self.arena.end()
    }

    fn adjusted_size(size: usize) -> usize {
        core::cmp::max(align_up(size) + DSIZE, MIN_BLOCK)
    }

    unsafe fn free_block_at(&mut self, payload: *mut u8, size: usize) {
        unsafe {
            block::set_header_footer(payload, size, false);
            self.coalesce(payload);
        }
    }

    unsafe fn extend_heap(&mut self, words: usize) -> Option<*mut u8> {
        let mut w = words;
        if w % 2 != 0 {
            w += 1;
        }
        let bytes = core::cmp::max(w * WSIZE, MIN_BLOCK);
        let old_end = self.arena.extend(bytes).ok()?;
        unsafe {
            let payload = old_end;
            block::set_header_footer(payload, bytes, false);
            let new_epilogue = payload.add(bytes - WSIZE);
            cell::write(new_epilogue, cell::pack(0, true));
            debug!("extend_heap: grew arena by {bytes} bytes");
            Some(self.coalesce(payload))
        }
    }

    fn find_fit(&self, size: usize) -> Option<*mut u8> {
        let mut current = self.free_head;
        while let Some(block) = current {
            let found_size = unsafe { block::size(block::header(block)) };
            if found_size >= size {
                return Some(block);
            }
            current = unsafe { list::next(self.base, block) };
        }
        None
    }

    unsafe fn place(&mut self, payload: *mut u8, asize: usize) {
        unsafe {
            let free_size = block::size(block::header(payload));
            list::unlink(self.base, &mut self.free_head, payload);
            if free_size - asize >= MIN_BLOCK {
                block::set_header_footer(payload, asize, true);
                let remainder = payload.add(asize);
                block::set_header_footer(remainder, free_size - asize, false);
                self.coalesce(remainder);
                debug!("place: split {free_size} into {asize} + {}", free_size - asize);
            } else {
                block::set_header_footer(payload, free_size, true);
                debug!("place: used whole {free_size}-byte block for {asize}-byte request");
            }
        }
    }

    unsafe fn coalesce(&mut self, payload: *mut u8) -> *mut u8 {
        unsafe {
            let has_prev = block::header(payload) != self.base.add(WSIZE);
            let prev_payload = if has_prev { Some(block::prev_block(payload)) } else { None };
            let prev_alloc = match prev_payload {
                Some(p) => block::alloc(block::footer(p)),
                None => true,
            };
            let next_payload = block::next_block(payload);
            let next_alloc = block::alloc(block::header(next_payload));
            let mut size = block::size(block::header(payload));
            let mut result = payload;

            if prev_alloc && !next_alloc {
                size += block::size(block::header(next_payload));
                list::unlink(self.base, &mut self.free_head, next_payload);
                block::set_header_footer(result, size, false);
                trace!("coalesce: merge next -> {size} bytes");
            } else if !prev_alloc && next_alloc {
                let prev = prev_payload.unwrap();
                size += block::size(block::header(prev));
                list::unlink(self.base, &mut self.free_head, prev);
                result = prev;
                block::set_header_footer(result, size, false);
                trace!("coalesce: merge prev -> {size} bytes");
            } else if !prev_alloc && !next_alloc {
                let prev = prev_payload.unwrap();
                size += block::size(block::header(prev)) + block::size(block::header(next_payload));
                list::unlink(self.base, &mut self.free_head, prev);
                list::unlink(self.base, &mut self.free_head, next_payload);
                result = prev;
                block::set_header_footer(result, size, false);
                trace!("coalesce: merge both -> {size} bytes");
            } else {
                trace!("coalesce: no merge, {size} bytes");
            }

            list::insert_head(self.base, &mut self.free_head, result);
            result
        }
    }
}
