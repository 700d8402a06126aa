//! # Store Inspection
//!
//! Explicit, feature-flagged view into store internals for embedders'
//! debugging panels. Read-only: counters and the published block tag.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use parking_lot::RwLock;
use shared_types::BlockTag;

use crate::application::store::StoreCounters;
use crate::domain::Snapshot;

/// Read-only inspection handle over a running store.
pub struct StoreInspector {
    counters: Arc<StoreCounters>,
    current: Arc<RwLock<Option<Snapshot>>>,
}

impl StoreInspector {
    pub(crate) fn new(
        counters: Arc<StoreCounters>,
        current: Arc<RwLock<Option<Snapshot>>>,
    ) -> Self {
        StoreInspector { counters, current }
    }

    /// Snapshot fetches attempted (initial load included).
    #[must_use]
    pub fn fetches_attempted(&self) -> u64 {
        self.counters.fetches_attempted.load(Ordering::Relaxed)
    }

    /// Fetches that failed and were skipped.
    #[must_use]
    pub fn fetches_failed(&self) -> u64 {
        self.counters.fetches_failed.load(Ordering::Relaxed)
    }

    /// Snapshots actually published.
    #[must_use]
    pub fn snapshots_published(&self) -> u64 {
        self.counters.snapshots_published.load(Ordering::Relaxed)
    }

    /// Fetch results discarded by the block-tag monotonicity guard.
    #[must_use]
    pub fn snapshots_discarded_stale(&self) -> u64 {
        self.counters.snapshots_discarded_stale.load(Ordering::Relaxed)
    }

    /// Block tag of the currently published snapshot.
    #[must_use]
    pub fn published_block(&self) -> Option<BlockTag> {
        self.current.read().as_ref().map(|s| s.block_tag)
    }
}
