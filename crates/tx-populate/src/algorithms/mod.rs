//! # Algorithms
//!
//! Pure logic separated from the network-calling loops: trial batch
//! sizing and gas headroom.

pub mod batches;
pub mod headroom;

pub use batches::{total_trials, trial_batches, MAX_TRIALS_PER_CALL};
pub use headroom::{GasHeadroomEstimator, DECAY_RECOMPUTE_GAS, RETRAVERSAL_GAS};
