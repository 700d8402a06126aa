//! # Domain Errors
//!
//! Population errors propagate synchronously to the call site: a failed
//! population aborts before any transaction is submitted.

use thiserror::Error;

/// Transaction population error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PopulateError {
    /// A local precondition failed before any network call (e.g.
    /// insufficient balance). Never reaches the write collaborator.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The collection was too volatile or large to bracket reliably
    /// within the trial budget.
    #[error("hint search exhausted after {trials} trials")]
    HintSearchExhausted {
        /// Total trials spent before giving up.
        trials: u64,
    },

    /// Collaborator read failed during population.
    #[error("collection read failed: {0}")]
    Transport(String),
}
