//! Error types surfaced internally by the allocator core.

/// Failure modes the allocator can hit.
///
/// The public API (`init`, `allocate`, `reallocate`) never exposes this
/// type directly — `init` collapses it to `Result<(), AllocError>` at the
/// crate boundary, and `allocate`/`reallocate` collapse it further, to a
/// null pointer, matching the spec's null/failure-return error policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AllocError {
    /// The arena refused to grow; the request cannot be satisfied.
    #[error("arena extension failed: out of memory")]
    OutOfMemory,
}
