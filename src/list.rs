//! The explicit free list: a doubly linked list threaded through the first
//! two words of each free block's payload.
//!
//! Link cells are 4 bytes each, too narrow for a native 64-bit pointer, so
//! each link stores the linked block's payload address as an offset from
//! the arena base. Offset `0` doubles as "no link": it names the prologue's
//! header cell, which can never be a free block's payload.

use crate::align::WSIZE;
use crate::cell;

const NULL_OFFSET: u32 = 0;

#[inline]
unsafe fn offset_of(base: *mut u8, addr: *mut u8) -> u32 {
    (addr as usize - base as usize) as u32
}

#[inline]
unsafe fn addr_of(base: *mut u8, offset: u32) -> Option<*mut u8> {
    if offset == NULL_OFFSET {
        None
    } else {
        Some(unsafe { base.add(offset as usize) })
    }
}

#[inline]
fn next_cell(payload: *mut u8) -> *mut u8 {
    payload
}

#[inline]
fn prev_cell(payload: *mut u8) -> *mut u8 {
    unsafe { payload.add(WSIZE) }
}

/// Reads the `next` link of a free block.
///
/// # Safety
/// `payload` must be a free block's payload address.
pub unsafe fn next(base: *mut u8, payload: *mut u8) -> Option<*mut u8> {
    unsafe { addr_of(base, cell::read(next_cell(payload))) }
}

/// Reads the `prev` link of a free block.
///
/// # Safety
/// `payload` must be a free block's payload address.
pub unsafe fn prev(base: *mut u8, payload: *mut u8) -> Option<*mut u8> {
    unsafe { addr_of(base, cell::read(prev_cell(payload))) }
}

unsafe fn set_next(base: *mut u8, payload: *mut u8, link: Option<*mut u8>) {
    unsafe {
        let raw = link.map_or(NULL_OFFSET, |p| offset_of(base, p));
        cell::write(next_cell(payload), raw);
    }
}

unsafe fn set_prev(base: *mut u8, payload: *mut u8, link: Option<*mut u8>) {
    unsafe {
        let raw = link.map_or(NULL_OFFSET, |p| offset_of(base, p));
        cell::write(prev_cell(payload), raw);
    }
}

/// Inserts `block` at the head of the free list.
///
/// # Safety
/// `block` must be a free block with room for two link cells in its
/// payload (guaranteed by `MIN_BLOCK`).
pub unsafe fn insert_head(base: *mut u8, head: &mut Option<*mut u8>, block: *mut u8) {
    unsafe {
        set_next(base, block, *head);
        if let Some(old_head) = *head {
            set_prev(base, old_head, Some(block));
        }
        set_prev(base, block, None);
        *head = Some(block);
    }
}

/// Removes `block` from the free list.
///
/// # Safety
/// `block` must currently be linked into the list `head` describes.
pub unsafe fn unlink(base: *mut u8, head: &mut Option<*mut u8>, block: *mut u8) {
    unsafe {
        let p = prev(base, block);
        let n = next(base, block);
        match p {
            Some(prev_block) => set_next(base, prev_block, n),
            None => *head = n,
        }
        if let Some(next_block) = n {
            set_prev(base, next_block, p);
        }
    }
}
