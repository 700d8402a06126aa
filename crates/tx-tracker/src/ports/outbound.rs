//! # Outbound Ports
//!
//! The sent-transaction handle exposed by the write collaborator, plus a
//! mock for tests.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::{Receipt, WaitError};

/// Handle to a broadcast transaction.
#[async_trait]
pub trait SentHandle: Send + Sync {
    /// Wait until the transaction is mined (or replaced) and return its
    /// receipt.
    async fn wait_for_receipt(&self) -> Result<Receipt, WaitError>;

    /// Transaction hash, for logging.
    fn tx_hash(&self) -> &str;
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

/// Mock sent-transaction handle resolving to a preset outcome after an
/// optional delay.
pub struct MockSentHandle {
    /// Hash reported for logging.
    pub hash: String,
    /// Outcome returned by `wait_for_receipt`.
    pub outcome: Result<Receipt, WaitError>,
    /// Simulated confirmation latency.
    pub delay: Duration,
}

impl MockSentHandle {
    /// A handle that confirms successfully at `block_tag`.
    #[must_use]
    pub fn confirmed(block_tag: u64) -> Self {
        MockSentHandle {
            hash: format!("0xmock{block_tag}"),
            outcome: Ok(Receipt::succeeded(block_tag, 21_000)),
            delay: Duration::ZERO,
        }
    }

    /// A handle whose wait resolves to the given outcome.
    #[must_use]
    pub fn resolving(outcome: Result<Receipt, WaitError>) -> Self {
        MockSentHandle {
            hash: "0xmock".to_string(),
            outcome,
            delay: Duration::ZERO,
        }
    }

    /// Add a simulated confirmation latency.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl SentHandle for MockSentHandle {
    async fn wait_for_receipt(&self) -> Result<Receipt, WaitError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcome.clone()
    }

    fn tx_hash(&self) -> &str {
        &self.hash
    }
}
