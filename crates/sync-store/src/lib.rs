//! # sync-store
//!
//! Debounced polling state store for block-granular ledger state.
//!
//! ## Purpose
//!
//! Many UI widgets observe one shared, eventually-consistent view of
//! remote ledger state. This crate provides that view:
//!
//! - [`ChainPoller`] coalesces bursts of new-block notifications into one
//!   fetch per quiescence window, always for the freshest block.
//! - [`StateStore`] fetches a full snapshot per tick with an
//!   all-or-nothing barrier and publishes atomic `(base, extra)` state,
//!   guarded against block-tag regressions.
//!
//! ## Module Structure
//!
//! ```text
//! sync-store/
//! ├── domain/          # Snapshot, DomainState, diff reducer, errors
//! ├── algorithms/      # Pure debounce state
//! ├── ports/           # LedgerReader + BlockSource traits, MockLedger
//! ├── application/     # ChainPoller task, StateStore service
//! ├── inspect.rs       # Feature-flagged inspection API
//! └── config.rs        # SyncConfig
//! ```
//!
//! ## Failure model
//!
//! Transport errors during a fetch are caught here, logged, and the tick
//! skipped; the previously published snapshot remains current. No
//! exception ever propagates to subscribers.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
#[cfg(feature = "inspect")]
pub mod inspect;
pub mod ports;

// Re-exports
pub use algorithms::DebounceState;
pub use application::{ChainPoller, PollerHandle, StateStore, StoreEvent, StoreHandle};
pub use config::{SyncConfig, DEFAULT_DEBOUNCE_MS};
pub use domain::{
    diff_base, ChainMetadata, DepositRecord, DomainState, DomainStateDiff, FieldChange,
    PositionRecord, Snapshot, StakeRecord, SyncError,
};
pub use ports::{BlockSource, LedgerReader, MockBlock, MockLedger};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
