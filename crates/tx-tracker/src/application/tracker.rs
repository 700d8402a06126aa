//! # Transaction Lifecycle Tracker
//!
//! Keyed registry of in-flight transaction states. One live record per
//! id: a new submission under an existing id aborts the previous watch
//! and supersedes it (last submission wins).

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::domain::{ReceiptStatus, SubmitError, TxStatus, WaitError};
use crate::ports::SentHandle;

/// Default capacity of the status broadcast channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Status transition notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackerEvent {
    /// Tracked transaction id.
    pub id: String,
    /// New status.
    pub status: TxStatus,
}

struct TrackedRecord {
    status: TxStatus,
    epoch: u64,
    watch: Option<JoinHandle<()>>,
}

/// Registry of in-flight transaction lifecycles.
#[derive(Clone)]
pub struct TransactionLifecycleTracker {
    inner: Arc<Mutex<HashMap<String, TrackedRecord>>>,
    events: broadcast::Sender<TrackerEvent>,
    epochs: Arc<AtomicU64>,
}

impl Default for TransactionLifecycleTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionLifecycleTracker {
    /// Create a tracker with the default event capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Create a tracker with a specific event channel capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity);
        TransactionLifecycleTracker {
            inner: Arc::new(Mutex::new(HashMap::new())),
            events,
            epochs: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Generate a fresh transaction id.
    #[must_use]
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Track a submission under `id`.
    ///
    /// `send` performs the actual submission (signature prompt included);
    /// the record is `WaitingForApproval` while it is pending and
    /// `WaitingForConfirmation` once a sent handle is returned. Errors
    /// surface only as status transitions, never as exceptions.
    pub fn track<F>(&self, id: impl Into<String>, send: F)
    where
        F: Future<Output = Result<Box<dyn SentHandle>, SubmitError>> + Send + 'static,
    {
        let id = id.into();
        let epoch = self.epochs.fetch_add(1, Ordering::Relaxed) + 1;

        {
            let mut map = self.inner.lock();
            let previous = map.insert(
                id.clone(),
                TrackedRecord {
                    status: TxStatus::WaitingForApproval,
                    epoch,
                    watch: None,
                },
            );
            if let Some(TrackedRecord {
                watch: Some(handle),
                ..
            }) = previous
            {
                tracing::debug!(%id, "superseding previous watch");
                handle.abort();
            }
        }
        let _ = self.events.send(TrackerEvent {
            id: id.clone(),
            status: TxStatus::WaitingForApproval,
        });

        let tracker = self.clone();
        let task_id = id.clone();
        let watch = tokio::spawn(async move {
            tracker.run_watch(task_id, epoch, send).await;
        });

        let mut map = self.inner.lock();
        match map.get_mut(&id) {
            Some(record) if record.epoch == epoch => record.watch = Some(watch),
            // Superseded before the spawn registered.
            _ => watch.abort(),
        }
    }

    /// Current status of an id. Untracked ids are simply `Idle`.
    #[must_use]
    pub fn status_of(&self, id: &str) -> TxStatus {
        self.inner
            .lock()
            .get(id)
            .map(|record| record.status.clone())
            .unwrap_or_default()
    }

    /// Subscribe to status transitions.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TrackerEvent> {
        self.events.subscribe()
    }

    /// Consume the one-shot confirmation for an id.
    ///
    /// Returns `true` for exactly one caller after a successful
    /// confirmation; the record then settles at `Confirmed` for polling
    /// consumers.
    pub fn consume_one_shot(&self, id: &str) -> bool {
        let consumed = {
            let mut map = self.inner.lock();
            match map.get_mut(id) {
                Some(record) if record.status == TxStatus::ConfirmedOneShot => {
                    record.status = TxStatus::Confirmed;
                    true
                }
                _ => false,
            }
        };
        if consumed {
            let _ = self.events.send(TrackerEvent {
                id: id.to_string(),
                status: TxStatus::Confirmed,
            });
        }
        consumed
    }

    async fn run_watch<F>(&self, id: String, epoch: u64, send: F)
    where
        F: Future<Output = Result<Box<dyn SentHandle>, SubmitError>> + Send + 'static,
    {
        match send.await {
            Ok(handle) => {
                tracing::debug!(%id, hash = handle.tx_hash(), "transaction broadcast");
                self.transition(&id, epoch, TxStatus::WaitingForConfirmation);
                let status = match handle.wait_for_receipt().await {
                    Ok(receipt) => match receipt.status {
                        ReceiptStatus::Succeeded => TxStatus::ConfirmedOneShot,
                        ReceiptStatus::Reverted { reason } => {
                            tracing::warn!(%id, ?reason, "transaction reverted");
                            TxStatus::Failed { reason }
                        }
                    },
                    Err(WaitError::ReplacedMined) => TxStatus::Failed {
                        reason: Some("replaced by a different transaction".to_string()),
                    },
                    Err(WaitError::ReplacedCancelled) => TxStatus::Cancelled,
                    Err(WaitError::Transport(e)) => {
                        tracing::warn!(%id, error = %e, "receipt watch failed");
                        TxStatus::Failed { reason: Some(e) }
                    }
                };
                self.transition(&id, epoch, status);
            }
            Err(SubmitError::Rejected) => {
                self.transition(&id, epoch, TxStatus::Cancelled);
            }
            Err(SubmitError::Transport(e)) => {
                tracing::warn!(%id, error = %e, "submission failed");
                self.transition(&id, epoch, TxStatus::Failed { reason: Some(e) });
            }
        }
    }

    /// Apply a status transition unless the record was superseded.
    fn transition(&self, id: &str, epoch: u64, status: TxStatus) {
        {
            let mut map = self.inner.lock();
            match map.get_mut(id) {
                Some(record) if record.epoch == epoch => record.status = status.clone(),
                _ => return,
            }
        }
        tracing::debug!(%id, ?status, "transaction status changed");
        let _ = self.events.send(TrackerEvent {
            id: id.to_string(),
            status,
        });
    }
}
