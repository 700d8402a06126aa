//! # Outbound Ports
//!
//! The sorted-collection read collaborator and the transaction write
//! collaborator, plus mocks for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{Address, Decimal};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tx_tracker::{MockSentHandle, Receipt, SentHandle, SubmitError, WaitError};

use crate::domain::{HintTrial, Neighbors, PopulateError, PopulatedIntent};

/// Sorted-collection read collaborator - outbound port.
///
/// The collection is ascending by key and too large to fetch wholesale;
/// the finder brackets an insertion point with randomized approximate
/// queries plus one exact query.
#[async_trait]
pub trait SortedLedgerReader: Send + Sync {
    /// Number of entries.
    async fn count(&self) -> Result<u64, PopulateError>;

    /// Run `trials` randomized probes for the entry closest to `key`,
    /// seeded with `seed`. Returns the best candidate, its distance, and
    /// the continuation seed for the next batch.
    async fn approx_hint(
        &self,
        key: Decimal,
        trials: u64,
        seed: u64,
    ) -> Result<HintTrial, PopulateError>;

    /// Exact insert-position query for `key`, starting the walk at
    /// `anchor`.
    async fn find_insert_position(
        &self,
        key: Decimal,
        anchor: Address,
    ) -> Result<Neighbors, PopulateError>;

    /// The entry one step below `addr` (toward smaller keys), or zero.
    async fn prev_neighbor(&self, addr: Address) -> Result<Address, PopulateError>;

    /// The entry one step above `addr` (toward larger keys), or zero.
    async fn next_neighbor(&self, addr: Address) -> Result<Address, PopulateError>;

    /// The entry with the largest key, or zero when empty.
    async fn tail(&self) -> Result<Address, PopulateError>;
}

/// Transaction write collaborator - outbound port.
#[async_trait]
pub trait TransactionSender: Send + Sync {
    /// Submit a populated intent. Resolves once the user has signed (or
    /// declined) with a handle for the broadcast transaction.
    async fn submit(&self, intent: PopulatedIntent) -> Result<Box<dyn SentHandle>, SubmitError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Call counters recorded by [`MockSortedCollection`].
#[derive(Debug, Default)]
pub struct CollectionCallCounters {
    /// `count` calls.
    pub count_calls: AtomicU64,
    /// `approx_hint` calls.
    pub hint_calls: AtomicU64,
    /// Total trials across all `approx_hint` calls.
    pub hint_trials: AtomicU64,
    /// `find_insert_position` calls.
    pub exact_calls: AtomicU64,
    /// `prev_neighbor`/`next_neighbor` calls.
    pub step_calls: AtomicU64,
}

/// In-memory sorted collection (ascending by key) with a deterministic
/// seeded probe, for exercising the hint finder.
#[derive(Clone, Default)]
pub struct MockSortedCollection {
    entries: Arc<Mutex<Vec<(Decimal, Address)>>>,
    calls: Arc<CollectionCallCounters>,
}

fn xorshift(mut seed: u64) -> u64 {
    // A zero seed would get stuck.
    if seed == 0 {
        seed = 0x9E37_79B9_7F4A_7C15;
    }
    seed ^= seed << 13;
    seed ^= seed >> 7;
    seed ^= seed << 17;
    seed
}

impl MockSortedCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(key, address)` pairs; sorts them ascending by key.
    #[must_use]
    pub fn with_entries(mut pairs: Vec<(Decimal, Address)>) -> Self {
        pairs.sort_by_key(|(key, _)| *key);
        MockSortedCollection {
            entries: Arc::new(Mutex::new(pairs)),
            calls: Arc::new(CollectionCallCounters::default()),
        }
    }

    /// Recorded call counters.
    #[must_use]
    pub fn calls(&self) -> &CollectionCallCounters {
        &self.calls
    }

    /// Total collaborator calls of any kind.
    #[must_use]
    pub fn total_calls(&self) -> u64 {
        self.calls.count_calls.load(Ordering::Relaxed)
            + self.calls.hint_calls.load(Ordering::Relaxed)
            + self.calls.exact_calls.load(Ordering::Relaxed)
            + self.calls.step_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl SortedLedgerReader for MockSortedCollection {
    async fn count(&self) -> Result<u64, PopulateError> {
        self.calls.count_calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.entries.lock().len() as u64)
    }

    async fn approx_hint(
        &self,
        key: Decimal,
        trials: u64,
        seed: u64,
    ) -> Result<HintTrial, PopulateError> {
        self.calls.hint_calls.fetch_add(1, Ordering::Relaxed);
        self.calls.hint_trials.fetch_add(trials, Ordering::Relaxed);

        let entries = self.entries.lock();
        let mut state = seed;
        let mut best: Option<(Decimal, Address)> = None;

        if !entries.is_empty() {
            for _ in 0..trials {
                state = xorshift(state);
                let (entry_key, addr) = entries[(state % entries.len() as u64) as usize];
                let distance = entry_key.abs_diff(key);
                match best {
                    Some((best_distance, _)) if distance >= best_distance => {}
                    _ => best = Some((distance, addr)),
                }
            }
        }

        let (distance, candidate) = best.unwrap_or((Decimal::INFINITY, Address::ZERO));
        Ok(HintTrial {
            candidate,
            distance,
            continuation_seed: state,
        })
    }

    async fn find_insert_position(
        &self,
        key: Decimal,
        _anchor: Address,
    ) -> Result<Neighbors, PopulateError> {
        self.calls.exact_calls.fetch_add(1, Ordering::Relaxed);

        let entries = self.entries.lock();
        let split = entries.partition_point(|(entry_key, _)| *entry_key <= key);
        let prev = split
            .checked_sub(1)
            .map_or(Address::ZERO, |i| entries[i].1);
        let next = entries.get(split).map_or(Address::ZERO, |entry| entry.1);
        Ok(Neighbors { prev, next })
    }

    async fn prev_neighbor(&self, addr: Address) -> Result<Address, PopulateError> {
        self.calls.step_calls.fetch_add(1, Ordering::Relaxed);
        let entries = self.entries.lock();
        let index = entries
            .iter()
            .position(|(_, entry_addr)| *entry_addr == addr)
            .ok_or_else(|| PopulateError::Transport(format!("unknown entry {addr}")))?;
        Ok(index
            .checked_sub(1)
            .map_or(Address::ZERO, |i| entries[i].1))
    }

    async fn next_neighbor(&self, addr: Address) -> Result<Address, PopulateError> {
        self.calls.step_calls.fetch_add(1, Ordering::Relaxed);
        let entries = self.entries.lock();
        let index = entries
            .iter()
            .position(|(_, entry_addr)| *entry_addr == addr)
            .ok_or_else(|| PopulateError::Transport(format!("unknown entry {addr}")))?;
        Ok(entries.get(index + 1).map_or(Address::ZERO, |entry| entry.1))
    }

    async fn tail(&self) -> Result<Address, PopulateError> {
        self.calls.step_calls.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .entries
            .lock()
            .last()
            .map_or(Address::ZERO, |entry| entry.1))
    }
}

/// Scripted outcome for one mock submission.
#[derive(Clone, Debug)]
pub enum MockSubmitOutcome {
    /// Sign and confirm at a block.
    Confirm(u64),
    /// The user declines the signature prompt.
    Reject,
    /// Mined but reverted with a reason.
    Revert(Option<String>),
    /// Replaced; a different transaction was mined.
    ReplaceMined,
    /// Replaced by a cancellation.
    ReplaceCancelled,
}

/// Mock write collaborator: replays scripted outcomes and records every
/// submitted intent.
#[derive(Clone, Default)]
pub struct MockTransactionSender {
    script: Arc<Mutex<VecDeque<MockSubmitOutcome>>>,
    submitted: Arc<Mutex<Vec<PopulatedIntent>>>,
}

impl MockTransactionSender {
    /// Create a sender that confirms everything at block 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome for the next submission.
    pub fn enqueue(&self, outcome: MockSubmitOutcome) {
        self.script.lock().push_back(outcome);
    }

    /// Intents submitted so far.
    #[must_use]
    pub fn submitted(&self) -> Vec<PopulatedIntent> {
        self.submitted.lock().clone()
    }
}

#[async_trait]
impl TransactionSender for MockTransactionSender {
    async fn submit(&self, intent: PopulatedIntent) -> Result<Box<dyn SentHandle>, SubmitError> {
        self.submitted.lock().push(intent);
        let outcome = self
            .script
            .lock()
            .pop_front()
            .unwrap_or(MockSubmitOutcome::Confirm(0));
        match outcome {
            MockSubmitOutcome::Confirm(block) => Ok(Box::new(MockSentHandle::confirmed(block))),
            MockSubmitOutcome::Reject => Err(SubmitError::Rejected),
            MockSubmitOutcome::Revert(reason) => Ok(Box::new(MockSentHandle::resolving(Ok(
                Receipt::reverted(0, 40_000, reason),
            )))),
            MockSubmitOutcome::ReplaceMined => Ok(Box::new(MockSentHandle::resolving(Err(
                WaitError::ReplacedMined,
            )))),
            MockSubmitOutcome::ReplaceCancelled => Ok(Box::new(MockSentHandle::resolving(Err(
                WaitError::ReplacedCancelled,
            )))),
        }
    }
}
