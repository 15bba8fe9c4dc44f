//! # tagalloc - An explicit free-list allocator with boundary-tag coalescing
//!
//! This crate implements a user-space dynamic memory allocator over a
//! single growable arena: an explicit doubly-linked free list, first-fit
//! placement with splitting, and O(1) boundary-tag coalescing.
//!
//! ## Overview
//!
//! Every block, free or allocated, carries a header and a footer holding
//! the same packed size and allocated bit — the boundary-tag scheme. This
//! lets `free` inspect a block's neighbors in either direction without
//! walking the whole arena:
//!
//! ```text
//!   Block layout (allocated):
//!   ┌────────┬──────────────────────────────────────┬────────┐
//!   │ header │              payload                 │ footer │
//!   │ 4 bytes│         (size - 8) bytes              │ 4 bytes│
//!   └────────┴──────────────────────────────────────┴────────┘
//!            ▲
//!            └── pointer returned to the caller
//!
//!   Block layout (free):
//!   ┌────────┬────────┬────────┬──────────────────────┬────────┐
//!   │ header │  next  │  prev  │   unused payload      │ footer │
//!   │ 4 bytes│ 4 bytes│ 4 bytes│                        │ 4 bytes│
//!   └────────┴────────┴────────┴──────────────────────┴────────┘
//! ```
//!
//! Header and footer cells are 4 bytes wide, so a free block's `next` and
//! `prev` links cannot hold a native 64-bit pointer — they store the
//! linked block's address as an offset from the arena base instead (see
//! [`list`]).
//!
//! ## Arena layout
//!
//! ```text
//!   ┌─────────┬───────────────────────────────┬─────────┐
//!   │prologue │         block  block  ...      │epilogue │
//!   │ 1 word  │                                 │ 1 word  │
//!   └─────────┴───────────────────────────────┴─────────┘
//! ```
//!
//! The prologue and epilogue are permanently-allocated sentinel cells that
//! let `coalesce` treat every real block uniformly, without special-casing
//! the arena's two edges inside the block arithmetic itself.
//!
//! ## Crate structure
//!
//! ```text
//!   tagalloc
//!   ├── align      - shared size/alignment constants
//!   ├── cell       - raw 4-byte header/footer/link access
//!   ├── block      - header/footer/neighbor pointer arithmetic
//!   ├── list       - the explicit doubly-linked free list
//!   ├── arena      - Arena trait, SbrkArena, FixedArena
//!   ├── error      - AllocError
//!   ├── allocator  - Allocator<A>: init/allocate/free/reallocate
//!   └── sync       - optional GlobalAlloc front end (feature = "global")
//! ```
//!
//! ## Quick start
//!
//! ```
//! use tagalloc::{Allocator, SbrkArena};
//!
//! let mut allocator = Allocator::new(SbrkArena::new());
//! allocator.init().expect("arena extension failed");
//!
//! unsafe {
//!     let ptr = allocator.allocate(64);
//!     assert!(!ptr.is_null());
//!     *ptr = 42;
//!     allocator.free(ptr);
//! }
//! ```
//!
//! ## Safety
//!
//! This crate is inherently unsafe: it manages raw memory directly and
//! assumes single-threaded, non-reentrant use of any one `Allocator`. The
//! optional `global` feature wraps an allocator in a `Mutex` to make that
//! safe to share, at the cost of a lock per operation.

pub mod align;
pub mod allocator;
pub mod arena;
mod block;
mod cell;
#[cfg(test)]
mod checker;
pub mod error;
mod list;
#[cfg(feature = "global")]
pub mod sync;

pub use allocator::Allocator;
pub use arena::{Arena, FixedArena, SbrkArena};
pub use error::AllocError;
#[cfg(feature = "global")]
pub use sync::GlobalHeap;
