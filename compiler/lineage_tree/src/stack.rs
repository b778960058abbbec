//! Stack growth for recursive tree walks.
//!
//! Hierarchies are shallow in practice, but every walk in this crate recurses
//! once per level, so a degenerate chain would otherwise be bounded by the
//! thread's stack size.

/// Grow the stack when less than this remains.
const RED_ZONE: usize = 64 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
