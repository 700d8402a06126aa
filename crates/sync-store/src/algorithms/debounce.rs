//! # Debounce
//!
//! Pure state for coalescing bursts of block notifications.
//!
//! Notifications may arrive out of order (a provider re-emitting an old
//! block, or several blocks back to back). `DebounceState` keeps the
//! maximum observed block; the surrounding timer loop re-arms a quiescence
//! window on every observation and fetches once when it elapses. Fetch
//! volume is thereby bounded independent of notification volume.

use shared_types::BlockTag;

/// Maximum-block tracker between timer fires.
#[derive(Debug, Default)]
pub struct DebounceState {
    latest: Option<BlockTag>,
}

impl DebounceState {
    /// Create an empty state.
    #[must_use]
    pub fn new() -> Self {
        DebounceState::default()
    }

    /// Record a notification. Keeps `latest = max(latest, block)` so
    /// out-of-order delivery never regresses the target.
    pub fn observe(&mut self, block: BlockTag) {
        self.latest = Some(match self.latest {
            Some(prev) => prev.max(block),
            None => block,
        });
    }

    /// The freshest block observed since the last take, if any.
    #[must_use]
    pub fn latest(&self) -> Option<BlockTag> {
        self.latest
    }

    /// Consume the pending block, resetting the state for the next burst.
    pub fn take_latest(&mut self) -> Option<BlockTag> {
        self.latest.take()
    }
}
