//! # Algorithms
//!
//! Pure logic separated from the async drivers: debounce state tracking.

pub mod debounce;

pub use debounce::DebounceState;
