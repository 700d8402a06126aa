//! # Receipt
//!
//! Outcome of a mined transaction as reported by the write collaborator.

use serde::{Deserialize, Serialize};
use shared_types::BlockTag;

/// Execution outcome recorded in a receipt.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReceiptStatus {
    /// Executed successfully.
    Succeeded,

    /// Execution reverted.
    Reverted {
        /// Decoded revert reason, when the collaborator could extract one.
        reason: Option<String>,
    },
}

/// Receipt for a mined transaction.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Receipt {
    /// Execution outcome.
    pub status: ReceiptStatus,

    /// Block the transaction was mined in.
    pub block_tag: BlockTag,

    /// Gas consumed.
    pub gas_used: u64,
}

impl Receipt {
    /// A successful receipt.
    #[must_use]
    pub fn succeeded(block_tag: BlockTag, gas_used: u64) -> Self {
        Receipt {
            status: ReceiptStatus::Succeeded,
            block_tag,
            gas_used,
        }
    }

    /// A reverted receipt.
    #[must_use]
    pub fn reverted(block_tag: BlockTag, gas_used: u64, reason: Option<String>) -> Self {
        Receipt {
            status: ReceiptStatus::Reverted { reason },
            block_tag,
            gas_used,
        }
    }
}
