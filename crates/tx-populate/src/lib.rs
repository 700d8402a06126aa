//! # tx-populate
//!
//! Transaction population for a client-side ledger view.
//!
//! ## Purpose
//!
//! A position operation must name its insertion point in a remote sorted
//! collection that is far too large to fetch, and every transaction must
//! carry enough gas to survive sitting unmined while fee parameters keep
//! decaying. This crate turns a user intent into a submittable
//! transaction:
//!
//! - local validation against the latest snapshot, before any network call
//! - randomized `O(sqrt(n))` hint search, batched under a per-call cap,
//!   refined with one exact insert-position query
//! - gas headroom covering both a list re-traversal and longer decay
//!   recomputation
//!
//! ## Module Structure
//!
//! ```text
//! tx-populate/
//! ├── domain/          # IntentKind, Neighbors, PopulatedIntent, errors
//! ├── ports/           # SortedLedgerReader, TransactionSender + mocks
//! ├── algorithms/      # trial batch sizing, gas headroom
//! └── application/     # HintFinder, Populator
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use algorithms::{
    total_trials, trial_batches, GasHeadroomEstimator, DECAY_RECOMPUTE_GAS, MAX_TRIALS_PER_CALL,
    RETRAVERSAL_GAS,
};
pub use application::{HintFinder, Populator};
pub use config::PopulateConfig;
pub use domain::{HintTrial, IntentKind, Neighbors, PopulateError, PopulatedIntent};
pub use ports::{
    MockSortedCollection, MockSubmitOutcome, MockTransactionSender, SortedLedgerReader,
    TransactionSender,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
