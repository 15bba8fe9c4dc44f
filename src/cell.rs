//! Raw 4-byte metadata cell access.
//!
//! Every header, footer, and free-list link in the arena is a 4-byte cell
//! packing a size and an allocated bit (headers/footers) or an arena-relative
//! offset (free-list links, see [`crate::list`]). This is the only module
//! that turns an arena address into a typed read or write — everything above
//! it (`block`, `list`, `allocator`) goes through here instead of touching
//! raw pointers itself. Ownership of the arena is morally single, so the
//! safety review for this whole crate lives in this file.

use std::ptr;

/// Size in bytes of one metadata cell.
pub const CELL: usize = 4;

const SIZE_MASK: u32 = !0x7;
const ALLOC_MASK: u32 = 0x1;

/// Packs a block size and its allocated bit into one cell value.
///
/// # Panics
/// In debug builds, panics if `size` is not a multiple of 8.
#[inline]
#[must_use]
pub fn pack(size: u32, alloc: bool) -> u32 {
    debug_assert_eq!(size & !SIZE_MASK, 0, "block size must be a multiple of 8");
    size | (alloc as u32)
}

/// Extracts the size field, masking out the low 3 flag bits.
#[inline]
#[must_use]
pub fn unpack_size(cell: u32) -> u32 {
    cell & SIZE_MASK
}

/// Extracts the allocated bit (bit 0).
#[inline]
#[must_use]
pub fn unpack_alloc(cell: u32) -> bool {
    cell & ALLOC_MASK != 0
}

/// Reads the 4-byte cell at `addr`.
///
/// # Safety
/// `addr` must point at `CELL` readable bytes inside the arena.
#[inline]
pub unsafe fn read(addr: *const u8) -> u32 {
    unsafe { ptr::read_unaligned(addr.cast::<u32>()) }
}

/// Writes `val` into the 4-byte cell at `addr`.
///
/// # Safety
/// `addr` must point at `CELL` writable bytes inside the arena.
#[inline]
pub unsafe fn write(addr: *mut u8, val: u32) {
    unsafe { ptr::write_unaligned(addr.cast::<u32>(), val) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_and_unpack_round_trip() {
        for &size in &[16u32, 24, 32, 4096] {
            for &alloc in &[true, false] {
                let packed = pack(size, alloc);
                assert_eq!(unpack_size(packed), size);
                assert_eq!(unpack_alloc(packed), alloc);
            }
        }
    }

    #[test]
    fn epilogue_cell_has_size_zero_and_is_allocated() {
        let packed = pack(0, true);
        assert_eq!(unpack_size(packed), 0);
        assert!(unpack_alloc(packed));
    }

    #[test]
    fn read_write_round_trip_through_a_buffer() {
        let mut buf = [0u8; 8];
        unsafe {
            write(buf.as_mut_ptr(), pack(16, false));
            write(buf.as_mut_ptr().add(4), pack(16, true));
        }
        unsafe {
            assert_eq!(unpack_size(read(buf.as_ptr())), 16);
            assert!(!unpack_alloc(read(buf.as_ptr())));
            assert!(unpack_alloc(read(buf.as_ptr().add(4))));
        }
    }
}
