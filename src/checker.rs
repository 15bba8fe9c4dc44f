//! Consistency checker used only by tests: walks the arena block-by-block
//! and cross-checks it against the free list.

use std::collections::HashSet;

use crate::align::WSIZE;
use crate::allocator::Allocator;
use crate::arena::Arena;
use crate::block;
use crate::cell;
use crate::list;

impl<A: Arena> Allocator<A> {
    pub(crate) fn check(&self) -> bool {
        self.check_walk_and_tags() && self.check_free_list()
    }

    fn check_walk_and_tags(&self) -> bool {
        let mut payload = unsafe { self.base_ptr().add(2 * WSIZE) };
        let mut prev_was_free = false;
        let mut free_count_by_walk = 0usize;
        loop {
            let header = block::header(payload);
            let size = unsafe { block::size(header) };
            if size == 0 {
                break;
            }
            let alloc = unsafe { block::alloc(header) };
            let footer = unsafe { block::footer(payload) };
            if unsafe { cell::read(header) } != unsafe { cell::read(footer) } {
                return false;
            }
            if !alloc {
                if prev_was_free {
                    return false;
                }
                free_count_by_walk += 1;
            }
            prev_was_free = !alloc;
            payload = unsafe { block::next_block(payload) };
        }
        free_count_by_walk == self.free_list_len()
    }

    fn check_free_list(&self) -> bool {
        let mut seen = HashSet::new();
        let mut current = self.free_head();
        let mut prev: Option<*mut u8> = None;
        while let Some(block) = current {
            if !seen.insert(block as usize) {
                return false;
            }
            let actual_prev = unsafe { list::prev(self.base_ptr(), block) };
            if actual_prev != prev {
                return false;
            }
            let header = block::header(block);
            if unsafe { block::alloc(header) } {
                return false;
            }
            prev = Some(block);
            current = unsafe { list::next(self.base_ptr(), block) };
        }
        true
    }

    fn free_list_len(&self) -> usize {
        let mut count = 0;
        let mut current = self.free_head();
        while let Some(block) = current {
            count += 1;
            current = unsafe { list::next(self.base_ptr(), block) };
        }
        count
    }
}
