//! # Sync Store Configuration

use serde::{Deserialize, Serialize};

/// Default quiescence window for block-notification debouncing.
pub const DEFAULT_DEBOUNCE_MS: u64 = 50;

/// Sync store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Quiescence window in milliseconds: a burst of block notifications
    /// within this window yields a single fetch of the freshest block.
    pub debounce_ms: u64,

    /// Capacity of the listener broadcast channel.
    pub channel_capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            channel_capacity: 256,
        }
    }
}

impl SyncConfig {
    /// Create a config for testing (small channel, default debounce).
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            channel_capacity: 16,
        }
    }
}
