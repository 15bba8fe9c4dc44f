//! Block-level pointer arithmetic.
//!
//! Every block, free or allocated, is bracketed by a header and a footer
//! cell holding the same packed size/alloc value (the boundary-tag scheme).
//! All addresses here are payload pointers: the address a caller of
//! `allocate` would see, one word past the header.

use crate::align::{DSIZE, MIN_BLOCK, WSIZE};
use crate::cell;

/// Address of `payload`'s header cell.
#[inline]
#[must_use]
pub fn header(payload: *mut u8) -> *mut u8 {
    unsafe { payload.sub(WSIZE) }
}

/// Address of `payload`'s footer cell.
///
/// # Safety
/// The header at `header(payload)` must hold a valid packed size.
#[inline]
pub unsafe fn footer(payload: *mut u8) -> *mut u8 {
    unsafe { payload.add(size(header(payload)) - DSIZE) }
}

/// Payload address of the block immediately to the right.
///
/// # Safety
/// The header at `header(payload)` must hold a valid packed size.
#[inline]
pub unsafe fn next_block(payload: *mut u8) -> *mut u8 {
    unsafe { payload.add(size(header(payload))) }
}

/// Payload address of the block immediately to the left.
///
/// # Safety
/// `payload` must not be the arena's leftmost block — callers must check
/// that first (see `allocator::coalesce`'s `has_prev` special case); the
/// footer this reads would otherwise belong to the prologue, not a block.
#[inline]
pub unsafe fn prev_block(payload: *mut u8) -> *mut u8 {
    unsafe {
        let prev_footer = payload.sub(DSIZE);
        payload.sub(size(prev_footer))
    }
}

/// Reads the size field out of a header or footer cell.
///
/// # Safety
/// `cell_addr` must point at a valid header or footer cell.
#[inline]
#[must_use]
pub unsafe fn size(cell_addr: *mut u8) -> usize {
    unsafe { cell::unpack_size(cell::read(cell_addr)) as usize }
}

/// Reads the allocated bit out of a header or footer cell.
///
/// # Safety
/// `cell_addr` must point at a valid header or footer cell.
#[inline]
#[must_use]
pub unsafe fn alloc(cell_addr: *mut u8) -> bool {
    unsafe { cell::unpack_alloc(cell::read(cell_addr)) }
}

/// Writes `size`/`alloc` into both the header and footer of the block at
/// `payload`.
///
/// # Safety
/// `payload` must have `size` bytes of writable arena space starting at its
/// header (`payload - WSIZE`).
pub unsafe fn set_header_footer(payload: *mut u8, size: usize, alloc: bool) {
    unsafe {
        debug_assert!(size >= MIN_BLOCK, "block below minimum size");
        debug_assert_eq!(size % DSIZE, 0, "block size must be a multiple of 8");
        let packed = cell::pack(size as u32, alloc);
        cell::write(header(payload), packed);
        cell::write(payload.add(size - DSIZE), packed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_footer_and_neighbors_are_consistent_in_a_buffer() {
        // prologue cell (1 word) | free block (32 bytes) | epilogue cell (1 word)
        let mut buf = [0u8; WSIZE + 32 + WSIZE];
        let base = buf.as_mut_ptr();
        unsafe {
            cell::write(base, cell::pack(MIN_BLOCK as u32, true));
            let payload = base.add(2 * WSIZE);
            set_header_footer(payload, 32, false);
            cell::write(header(next_block(payload)), cell::pack(0, true));

            assert_eq!(size(header(payload)), 32);
            assert!(!alloc(header(payload)));
            assert_eq!(footer(payload), header(payload).add(32 - WSIZE));
            assert_eq!(size(footer(payload)), 32);
            assert!(alloc(header(next_block(payload))));
            assert_eq!(size(header(next_block(payload))), 0);
        }
    }
}
