//! Stack growth for deeply nested rule invocations.
//!
//! Call depth tracks grammar nesting depth, which user grammars can make
//! arbitrarily deep. Rule entry routes through `ensure_sufficient_stack` so
//! the interpreter grows the stack instead of overflowing.

#[cfg(not(target_family = "wasm"))]
const RED_ZONE: usize = 100 * 1024;

#[cfg(not(target_family = "wasm"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[cfg(not(target_family = "wasm"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

// Stack switching is unavailable on wasm targets.
#[cfg(target_family = "wasm")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
