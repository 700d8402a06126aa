//! # tx-tracker
//!
//! Transaction lifecycle tracking for a client-side ledger view.
//!
//! ## Purpose
//!
//! UI features submit transactions and need to know, per operation id,
//! whether a signature prompt is outstanding, a confirmation is pending,
//! or the operation settled. The tracker is a keyed registry:
//!
//! - at most one live record per id; re-tracking supersedes the old watch
//! - `ConfirmedOneShot` fires one-time side effects exactly once, then the
//!   record settles at `Confirmed` for polling consumers
//! - rejection, revert and replacement are classified into terminal
//!   `Cancelled`/`Failed` statuses; no error escapes as an exception
//!
//! ## Module Structure
//!
//! ```text
//! tx-tracker/
//! ├── domain/          # TxStatus state machine, Receipt, errors
//! ├── ports/           # SentHandle trait, MockSentHandle
//! └── application/     # TransactionLifecycleTracker
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod application;
pub mod domain;
pub mod ports;

// Re-exports
pub use application::{TrackerEvent, TransactionLifecycleTracker, DEFAULT_EVENT_CAPACITY};
pub use domain::{Receipt, ReceiptStatus, SubmitError, TxStatus, WaitError};
pub use ports::{MockSentHandle, SentHandle};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
