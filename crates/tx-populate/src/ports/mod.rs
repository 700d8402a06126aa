//! # Ports Layer
//!
//! Outbound interfaces for the sorted-collection reader and the
//! transaction write collaborator.

pub mod outbound;

pub use outbound::{
    CollectionCallCounters, MockSortedCollection, MockSubmitOutcome, MockTransactionSender,
    SortedLedgerReader, TransactionSender,
};
