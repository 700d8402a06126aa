//! # Populate Flow
//!
//! The populator end to end: hint search call budgets against a large
//! collection, bracketing correctness, gas headroom, and submission
//! handed to the lifecycle tracker.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    use shared_types::{Address, Decimal};
    use sync_store::{ChainMetadata, DomainState, Snapshot};
    use tokio::time::timeout;
    use tx_populate::{
        total_trials, HintFinder, MockSortedCollection, MockTransactionSender, PopulateConfig,
        Populator, TransactionSender, MAX_TRIALS_PER_CALL,
    };
    use tx_tracker::{TransactionLifecycleTracker, TxStatus};

    const RECV_BUDGET: Duration = Duration::from_secs(30);

    fn snapshot(base: DomainState) -> Snapshot {
        Snapshot {
            base,
            extra: ChainMetadata::default(),
            block_tag: 100,
            block_timestamp: 1_700_000_000,
        }
    }

    /// A dense ladder of entries with key = index.
    fn ladder(count: u64) -> MockSortedCollection {
        let entries = (1..=count)
            .map(|i| (Decimal::from(i), Address::from_low_byte((i % 251 + 1) as u8)))
            .collect();
        MockSortedCollection::with_entries(entries)
    }

    #[tokio::test]
    async fn test_large_collection_stays_under_call_budget() {
        // 62_500 entries: sqrt is 250, so 2_500 trials in exactly one
        // full batch.
        let collection = Arc::new(ladder(62_500));
        let finder = HintFinder::new(Arc::clone(&collection));

        let neighbors = finder
            .find_neighbors(Decimal::from(31_250), 62_500, None)
            .await
            .unwrap();
        assert!(!neighbors.prev.is_zero());
        assert!(!neighbors.next.is_zero());

        let calls = collection.calls();
        assert_eq!(calls.hint_calls.load(Ordering::Relaxed), 1);
        assert_eq!(
            calls.hint_trials.load(Ordering::Relaxed),
            MAX_TRIALS_PER_CALL
        );
        assert_eq!(calls.exact_calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_trial_budget_scales_with_sqrt() {
        assert_eq!(total_trials(100), 100);
        assert_eq!(total_trials(10_000), 1_000);
        assert_eq!(total_trials(1_000_000), 10_000);
    }

    #[tokio::test]
    async fn test_hints_bracket_the_target_key() {
        let collection = Arc::new(ladder(1_000));
        let finder = HintFinder::new(Arc::clone(&collection));

        for target in [1u64, 17, 500, 999] {
            // Probe between integer keys so both neighbors are strict.
            let key = Decimal::from(target) + Decimal::from_raw(shared_types::U256::from(1u64));
            let neighbors = finder.find_neighbors(key, 1_000, None).await.unwrap();
            assert!(!neighbors.prev.is_zero(), "no prev for target {target}");
            assert!(!neighbors.next.is_zero(), "no next for target {target}");
        }
    }

    #[tokio::test]
    async fn test_populate_submit_track_round_trip() {
        let collection = Arc::new(ladder(100));
        let sender = Arc::new(MockTransactionSender::new());
        let populator = Populator::new(
            Arc::clone(&collection),
            Arc::clone(&sender),
            PopulateConfig::for_testing(),
        );

        let snap = snapshot(DomainState {
            account_balance: Decimal::from(1_000),
            collection_size: 100,
            ..DomainState::default()
        });

        let intent = populator
            .populate_open_position(&snap, Decimal::from(50), Decimal::from(1), |_| 300_000)
            .await
            .unwrap();
        assert!(intent.gas_limit > 300_000);
        assert!(intent.hints.is_some());

        // Submission goes through the tracker like any other transaction.
        let tracker = TransactionLifecycleTracker::new();
        let id = intent.id.clone();
        let intent_for_send = intent.clone();
        tracker.track(id.clone(), async move {
            sender.submit(intent_for_send).await
        });

        let mut events = tracker.subscribe();
        loop {
            let event = timeout(RECV_BUDGET, events.recv())
                .await
                .expect("no tracker event within budget")
                .expect("tracker channel closed");
            if event.id == id && event.status == TxStatus::ConfirmedOneShot {
                break;
            }
        }
        assert!(tracker.consume_one_shot(&id));
    }

    #[tokio::test]
    async fn test_gas_headroom_grows_with_tolerance() {
        let collection = Arc::new(MockSortedCollection::new());
        let sender = Arc::new(MockTransactionSender::new());
        let snap = snapshot(DomainState {
            token_balance: Decimal::from(1_000),
            ..DomainState::default()
        });

        // Fee parameter decays, so estimates shrink over time but the
        // populated limit must still cover the estimate at zero.
        let decaying = |t: u64| 200_000u64.saturating_sub(t * 1_000);

        let short = Populator::new(
            Arc::clone(&collection),
            Arc::clone(&sender),
            PopulateConfig {
                gas_tolerance_minutes: 10,
                ..PopulateConfig::default()
            },
        );
        let long = Populator::new(
            Arc::clone(&collection),
            Arc::clone(&sender),
            PopulateConfig {
                gas_tolerance_minutes: 30,
                ..PopulateConfig::default()
            },
        );

        let short_limit = short
            .populate_deposit(&snap, Decimal::from(10), decaying)
            .await
            .unwrap()
            .gas_limit;
        let long_limit = long
            .populate_deposit(&snap, Decimal::from(10), decaying)
            .await
            .unwrap()
            .gas_limit;

        assert!(short_limit >= 200_000);
        assert!(short_limit <= long_limit);
    }
}
