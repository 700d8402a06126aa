//! # Pending Edit
//!
//! A locally staged, unconfirmed user input layered over the last known
//! remote value.
//!
//! Invariant: `edited == original_remote` exactly when the feature is in
//! its unedited/settled state.

use serde::{Deserialize, Serialize};

/// One feature's staged edit.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PendingEdit<T> {
    /// Last remote value this edit was based on.
    pub original_remote: T,

    /// The staged value: user input, or a rebase of it.
    pub edited: T,

    /// Whether a transaction for this edit is in flight.
    pub change_pending: bool,
}

impl<T: Clone> PendingEdit<T> {
    /// Create an unedited state over a remote value.
    pub fn new(remote: T) -> Self {
        PendingEdit {
            edited: remote.clone(),
            original_remote: remote,
            change_pending: false,
        }
    }
}

impl<T: PartialEq> PendingEdit<T> {
    /// Whether the user has an outstanding edit.
    #[must_use]
    pub fn is_edited(&self) -> bool {
        self.edited != self.original_remote
    }
}
