//! # Hint Finder
//!
//! Randomized approximate search over the remote sorted collection,
//! refined with one exact insert-position query. The collection is
//! ascending by key and far too large to fetch wholesale.

use shared_types::{Address, Decimal};
use std::sync::Arc;

use crate::algorithms::{total_trials, trial_batches, MAX_TRIALS_PER_CALL};
use crate::domain::{HintTrial, Neighbors, PopulateError};
use crate::ports::SortedLedgerReader;

/// Finds bracketing neighbors for an insertion key.
///
/// Probes scale with `sqrt(collection_size)` and are split into batches
/// so no single collaborator call exceeds the per-call trial cap.
pub struct HintFinder<C> {
    collection: Arc<C>,
    trials_per_call: u64,
}

impl<C: SortedLedgerReader> HintFinder<C> {
    /// Create a finder over the given collection reader.
    pub fn new(collection: Arc<C>) -> Self {
        HintFinder {
            collection,
            trials_per_call: MAX_TRIALS_PER_CALL,
        }
    }

    /// Override the per-call trial cap.
    #[must_use]
    pub fn with_trials_per_call(mut self, cap: u64) -> Self {
        self.trials_per_call = cap;
        self
    }

    /// Bracket `key` in the collection of `collection_size` entries.
    ///
    /// `own` is the caller's existing entry, stepped over so an entry
    /// never hints at itself while being repositioned. An empty
    /// collection resolves locally without any collaborator call. An
    /// infinite key (no debt, incomparable ratio) short-circuits to the
    /// collection tail.
    pub async fn find_neighbors(
        &self,
        key: Decimal,
        collection_size: u64,
        own: Option<Address>,
    ) -> Result<Neighbors, PopulateError> {
        if collection_size == 0 {
            return Ok(Neighbors::EMPTY);
        }

        if key == Decimal::INFINITY {
            let tail = self.collection.tail().await?;
            tracing::debug!(%tail, "infinite key, hinting at collection tail");
            return Ok(Neighbors {
                prev: tail,
                next: Address::ZERO,
            }
            .without_empty_endpoints());
        }

        let anchor = self.search(key, collection_size).await?;
        let mut neighbors = self.collection.find_insert_position(key, anchor).await?;

        // An entry being repositioned must not bracket itself.
        if let Some(own) = own {
            if neighbors.prev == own {
                neighbors.prev = self.collection.prev_neighbor(own).await?;
            }
            if neighbors.next == own {
                neighbors.next = self.collection.next_neighbor(own).await?;
            }
        }

        Ok(neighbors.without_empty_endpoints())
    }

    /// Run the batched randomized probes and return the closest anchor.
    async fn search(&self, key: Decimal, collection_size: u64) -> Result<Address, PopulateError> {
        let total = total_trials(collection_size);
        let batches = trial_batches(total, self.trials_per_call);
        let mut seed = rand::random::<u64>();
        let mut best: Option<HintTrial> = None;

        for trials in batches {
            let trial = self.collection.approx_hint(key, trials, seed).await?;
            seed = trial.continuation_seed;
            if trial.candidate.is_zero() {
                continue;
            }
            // Strict improvement only, so earlier batches win ties.
            match best {
                Some(current) if trial.distance >= current.distance => {}
                _ => best = Some(trial),
            }
        }

        match best {
            Some(trial) => {
                tracing::debug!(
                    candidate = %trial.candidate,
                    distance = %trial.distance,
                    total_trials = total,
                    "hint search converged"
                );
                Ok(trial.candidate)
            }
            None => Err(PopulateError::HintSearchExhausted { trials: total }),
        }
    }
}
