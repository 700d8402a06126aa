//! # Domain Layer
//!
//! Snapshot value types, the partial diff reducer and error types.

pub mod diff;
pub mod errors;
pub mod snapshot;

pub use diff::{diff_base, DomainStateDiff, FieldChange};
pub use errors::SyncError;
pub use snapshot::{
    ChainMetadata, DepositRecord, DomainState, PositionRecord, Snapshot, StakeRecord,
};
