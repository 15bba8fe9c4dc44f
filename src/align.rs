//! Alignment constants shared by every layer above the raw cell module.
//!
//! The data model is built from fixed 4-byte cells (`WSIZE`) regardless of
//! target pointer width — a 32-bit-cell design layered on a 64-bit address
//! space — with every block size rounded to a double word (`DSIZE`).

/// Size of one metadata cell: a header, a footer, or one free-list link.
pub const WSIZE: usize = 4;

/// Double-word size. Every block size is a multiple of this.
pub const DSIZE: usize = 8;

/// Payload pointers handed back to callers are aligned to this many bytes.
pub const ALIGNMENT: usize = 8;

/// Smallest span a free or allocated block can ever occupy: header + two
/// free-list link words + footer.
pub const MIN_BLOCK: usize = 16;

/// Rounds `size` up to the next multiple of [`ALIGNMENT`].
///
/// ```
/// use tagalloc::align::align_up;
/// assert_eq!(align_up(1), 8);
/// assert_eq!(align_up(8), 8);
/// assert_eq!(align_up(9), 16);
/// ```
#[inline]
#[must_use]
pub const fn align_up(size: usize) -> usize {
    (size + ALIGNMENT - 1) & !(ALIGNMENT - 1)
}
