//! # State Store
//!
//! Composes the chain poller with the ledger read collaborator, fetches a
//! full snapshot per tick and publishes atomic `(base, extra)` state to
//! subscribers.
//!
//! Guarantees:
//! - `base` and `extra` of a published snapshot derive from one block.
//! - A fetch result is only published if its block tag is not older than
//!   the currently published one; stale results are discarded silently.
//! - Transient fetch errors are logged and the tick skipped: the previous
//!   snapshot stays current (liveness over freshness).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use shared_types::{Address, BlockTag};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::application::poller::{ChainPoller, PollerHandle};
use crate::config::SyncConfig;
use crate::domain::{diff_base, DomainState, DomainStateDiff, Snapshot, SyncError};
use crate::ports::{BlockSource, LedgerReader};

/// Event delivered to store subscribers.
///
/// Both old and new snapshots ride along on updates so feature controllers
/// can diff without retaining state of their own.
#[derive(Clone, Debug)]
pub enum StoreEvent {
    /// First successful fetch: initial state is now available.
    Initialized {
        /// The first published snapshot.
        snapshot: Snapshot,
    },
    /// A subsequent fetch was published.
    Updated {
        /// Previously published snapshot.
        old: Snapshot,
        /// Newly published snapshot.
        new: Snapshot,
        /// Partial diff of `base` fields.
        diff: DomainStateDiff,
    },
}

/// Fetch/publish counters, surfaced through the `inspect` feature.
#[derive(Debug, Default)]
pub(crate) struct StoreCounters {
    pub(crate) fetches_attempted: AtomicU64,
    pub(crate) fetches_failed: AtomicU64,
    pub(crate) snapshots_published: AtomicU64,
    pub(crate) snapshots_discarded_stale: AtomicU64,
}

/// Handle to a running store: cancelling stops the poll loop, unregisters
/// the block listener and clears any pending debounce timer.
pub struct StoreHandle {
    poller: Option<PollerHandle>,
    task: JoinHandle<()>,
}

impl StoreHandle {
    /// Stop polling. Already-published state remains readable.
    pub fn cancel(mut self) {
        if let Some(poller) = self.poller.take() {
            poller.cancel();
        }
        self.task.abort();
    }
}

/// Polling state store over a ledger read collaborator.
pub struct StateStore<C> {
    collaborator: Arc<C>,
    user: Option<Address>,
    config: SyncConfig,
    current: Arc<RwLock<Option<Snapshot>>>,
    events: broadcast::Sender<StoreEvent>,
    counters: Arc<StoreCounters>,
}

impl<C> StateStore<C>
where
    C: LedgerReader + BlockSource + 'static,
{
    /// Create a store for an optionally connected user.
    #[must_use]
    pub fn new(collaborator: Arc<C>, user: Option<Address>, config: SyncConfig) -> Self {
        let (events, _) = broadcast::channel(config.channel_capacity);
        StateStore {
            collaborator,
            user,
            config,
            current: Arc::new(RwLock::new(None)),
            events,
            counters: Arc::new(StoreCounters::default()),
        }
    }

    /// The currently published snapshot, `None` until the first load.
    #[must_use]
    pub fn state(&self) -> Option<Snapshot> {
        self.current.read().clone()
    }

    /// Subscribe to store events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Start polling: an immediate fetch of the latest block, then one
    /// fetch per debounced new-block tick.
    pub async fn start(&self) -> StoreHandle {
        let blocks = self.collaborator.subscribe_blocks().await;
        let poller = ChainPoller::new(Duration::from_millis(self.config.debounce_ms));
        let (mut ticks, poller_handle) = poller.spawn(blocks);

        let collaborator = Arc::clone(&self.collaborator);
        let user = self.user;
        let current = Arc::clone(&self.current);
        let events = self.events.clone();
        let counters = Arc::clone(&self.counters);

        let task = tokio::spawn(async move {
            match collaborator.latest_block().await {
                Ok(block) => {
                    Self::fetch_and_publish(&collaborator, user, block, &current, &events, &counters)
                        .await;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "initial latest-block query failed");
                }
            }

            while let Some(block) = ticks.recv().await {
                Self::fetch_and_publish(&collaborator, user, block, &current, &events, &counters)
                    .await;
            }
        });

        StoreHandle {
            poller: Some(poller_handle),
            task,
        }
    }

    async fn fetch_and_publish(
        collaborator: &C,
        user: Option<Address>,
        block: BlockTag,
        current: &RwLock<Option<Snapshot>>,
        events: &broadcast::Sender<StoreEvent>,
        counters: &StoreCounters,
    ) {
        counters.fetches_attempted.fetch_add(1, Ordering::Relaxed);
        match Self::fetch_snapshot(collaborator, user, block).await {
            Ok(snapshot) => Self::publish(snapshot, current, events, counters),
            Err(e) => {
                counters.fetches_failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(block, error = %e, "snapshot fetch failed, keeping previous state");
            }
        }
    }

    /// Fetch every field for one block with an all-or-nothing barrier:
    /// any constituent failure discards the whole snapshot for this tick.
    async fn fetch_snapshot(
        collaborator: &C,
        user: Option<Address>,
        block: BlockTag,
    ) -> Result<Snapshot, SyncError> {
        let (
            price,
            (total_collateral, total_debt),
            total_staked,
            (account_balance, token_balance),
            deposit,
            stake,
            position,
            collection_size,
            extra,
            block_timestamp,
        ) = tokio::try_join!(
            collaborator.price(block),
            collaborator.totals(block),
            collaborator.total_staked(block),
            collaborator.balances(user, block),
            collaborator.deposit(user, block),
            collaborator.stake(user, block),
            collaborator.position(user, block),
            collaborator.collection_size(block),
            collaborator.metadata(block),
            collaborator.block_timestamp(block),
        )?;

        Ok(Snapshot {
            base: DomainState {
                price,
                total_collateral,
                total_debt,
                total_staked,
                account_balance,
                token_balance,
                deposit,
                stake,
                position,
                collection_size,
            },
            extra,
            block_tag: block,
            block_timestamp,
        })
    }

    fn publish(
        snapshot: Snapshot,
        current: &RwLock<Option<Snapshot>>,
        events: &broadcast::Sender<StoreEvent>,
        counters: &StoreCounters,
    ) {
        let mut guard = current.write();
        match guard.as_ref() {
            Some(prev) if snapshot.block_tag < prev.block_tag => {
                counters
                    .snapshots_discarded_stale
                    .fetch_add(1, Ordering::Relaxed);
                tracing::debug!(
                    stale = snapshot.block_tag,
                    published = prev.block_tag,
                    "discarding stale fetch result"
                );
            }
            Some(prev) => {
                let old = prev.clone();
                let new = Snapshot {
                    extra: snapshot.extra.merged_over(&old.extra),
                    ..snapshot
                };
                let diff = diff_base(&old.base, &new.base);
                *guard = Some(new.clone());
                counters.snapshots_published.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(block = new.block_tag, changed = !diff.is_empty(), "snapshot updated");
                // No subscribers is fine.
                let _ = events.send(StoreEvent::Updated { old, new, diff });
            }
            None => {
                *guard = Some(snapshot.clone());
                counters.snapshots_published.fetch_add(1, Ordering::Relaxed);
                tracing::info!(block = snapshot.block_tag, "store initialized");
                let _ = events.send(StoreEvent::Initialized { snapshot });
            }
        }
    }

    /// Inspection view of the store's counters and published block.
    #[cfg(feature = "inspect")]
    #[must_use]
    pub fn inspect(&self) -> crate::inspect::StoreInspector {
        crate::inspect::StoreInspector::new(Arc::clone(&self.counters), Arc::clone(&self.current))
    }
}
