//! # Domain Errors
//!
//! Error types for the sync store. Transient fetch failures never escape
//! to subscribers; they are logged and the tick is skipped.

use thiserror::Error;

/// Sync store error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Network/provider hiccup during a fetch. Swallowed at the store
    /// layer; the previously published snapshot stays current.
    #[error("transient fetch failure: {0}")]
    TransientFetch(String),

    /// The block-notification source closed its channel.
    #[error("block source closed")]
    SourceClosed,
}
