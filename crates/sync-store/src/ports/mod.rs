//! # Ports
//!
//! Outbound dependency traits (ledger reader, block source) and their
//! mock implementations.

pub mod outbound;

pub use outbound::{BlockSource, LedgerReader, MockBlock, MockLedger};
