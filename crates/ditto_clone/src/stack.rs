//! Stack growth for deep object graphs and deep type graphs.
//!
//! Plan building recurses once per nested attribute type and plan execution
//! once per nested object. A linked chain of a hundred thousand nodes would
//! exhaust a thread's native stack, so both recursions go through
//! [`ensure_sufficient_stack`], which moves onto a freshly allocated segment
//! when the remaining stack runs low.
//!
//! On `wasm32` the guard is a passthrough.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a new stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
