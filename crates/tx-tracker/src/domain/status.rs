//! # Transaction Status
//!
//! Lifecycle state machine for a tracked transaction:
//!
//! ```text
//! Idle → WaitingForApproval → WaitingForConfirmation
//!                                   │
//!              ┌────────────┬───────┴──────┬───────────┐
//!              ▼            ▼              ▼           ▼
//!        ConfirmedOneShot  Failed      Cancelled   (replaced → Failed/Cancelled)
//!              │
//!              ▼ (consumed once)
//!          Confirmed
//! ```
//!
//! `WaitingForApproval` exists only while a signature prompt is
//! outstanding. `ConfirmedOneShot` is delivered to exactly one consumer
//! and then settles at `Confirmed`, the steady-state success status for
//! polling consumers.

use serde::{Deserialize, Serialize};

/// Status of a tracked transaction.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TxStatus {
    /// Not tracked, or tracking not yet begun.
    #[default]
    Idle,

    /// A signature prompt is outstanding.
    WaitingForApproval,

    /// Broadcast; awaiting a receipt.
    WaitingForConfirmation,

    /// Mined successfully; the one-shot notification is still unconsumed.
    ConfirmedOneShot,

    /// Mined successfully; steady-state terminal status.
    Confirmed,

    /// Execution failed on chain, with a decoded reason when available.
    Failed {
        /// Decoded revert reason, if one could be extracted.
        reason: Option<String>,
    },

    /// No effect occurred: the user declined signing, or a replacement
    /// cancelled the transaction.
    Cancelled,
}

impl TxStatus {
    /// Whether the transaction reached a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TxStatus::Confirmed
                | TxStatus::ConfirmedOneShot
                | TxStatus::Failed { .. }
                | TxStatus::Cancelled
        )
    }

    /// Whether a change is in flight (approval or confirmation pending).
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            TxStatus::WaitingForApproval | TxStatus::WaitingForConfirmation
        )
    }

    /// Whether the transaction succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, TxStatus::Confirmed | TxStatus::ConfirmedOneShot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(TxStatus::default(), TxStatus::Idle);
    }

    #[test]
    fn test_pending_states() {
        assert!(TxStatus::WaitingForApproval.is_pending());
        assert!(TxStatus::WaitingForConfirmation.is_pending());
        assert!(!TxStatus::Idle.is_pending());
        assert!(!TxStatus::Confirmed.is_pending());
    }

    #[test]
    fn test_terminal_states() {
        assert!(TxStatus::Confirmed.is_terminal());
        assert!(TxStatus::ConfirmedOneShot.is_terminal());
        assert!(TxStatus::Failed { reason: None }.is_terminal());
        assert!(TxStatus::Cancelled.is_terminal());
        assert!(!TxStatus::WaitingForApproval.is_terminal());
    }

    #[test]
    fn test_success_states() {
        assert!(TxStatus::ConfirmedOneShot.is_success());
        assert!(TxStatus::Confirmed.is_success());
        assert!(!TxStatus::Cancelled.is_success());
    }
}
