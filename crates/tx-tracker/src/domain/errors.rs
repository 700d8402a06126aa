//! # Domain Errors
//!
//! Failure classification for submission and receipt watching. None of
//! these escape the tracker as exceptions; they surface exclusively as
//! status transitions.

use thiserror::Error;

/// Errors raised while submitting a transaction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The user declined the signature prompt. Terminal `Cancelled`.
    #[error("user rejected the signature request")]
    Rejected,

    /// Broadcast failed at the transport level.
    #[error("submission failed: {0}")]
    Transport(String),
}

/// Errors raised while waiting for a receipt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WaitError {
    /// The transaction was sped up or replaced and something else was
    /// mined in its place. Treated as failed-with-receipt.
    #[error("transaction replaced; a different transaction was mined")]
    ReplacedMined,

    /// The transaction was replaced by a cancellation; no effect occurred.
    #[error("transaction cancelled by replacement")]
    ReplacedCancelled,

    /// The receipt watch itself failed at the transport level.
    #[error("receipt watch failed: {0}")]
    Transport(String),
}
