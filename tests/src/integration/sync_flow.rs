//! # Sync Flow
//!
//! The poller and the store running together over a mock ledger: initial
//! load, debounced block bursts, failure recovery, and the block-tag
//! monotonicity guard, all under paused time.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use shared_types::Decimal;
    use sync_store::{DomainState, MockBlock, MockLedger, StateStore, StoreEvent, SyncConfig};
    use tokio::sync::broadcast;
    use tokio::time::timeout;

    const RECV_BUDGET: Duration = Duration::from_secs(30);

    fn block_with_price(price: u64, timestamp: u64) -> MockBlock {
        MockBlock {
            state: DomainState {
                price: Decimal::from(price),
                ..DomainState::default()
            },
            timestamp,
            ..MockBlock::default()
        }
    }

    async fn next_event(rx: &mut broadcast::Receiver<StoreEvent>) -> StoreEvent {
        timeout(RECV_BUDGET, rx.recv())
            .await
            .expect("no store event within budget")
            .expect("event channel closed")
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_load_then_block_update() {
        let ledger = Arc::new(MockLedger::new());
        ledger.insert_block(1, block_with_price(2_000, 1_000));

        let store = StateStore::new(Arc::clone(&ledger), None, SyncConfig::for_testing());
        let mut events = store.subscribe();
        let handle = store.start().await;

        match next_event(&mut events).await {
            StoreEvent::Initialized { snapshot } => {
                assert_eq!(snapshot.block_tag, 1);
                assert_eq!(snapshot.base.price, Decimal::from(2_000));
            }
            other => panic!("expected Initialized, got {other:?}"),
        }
        assert_eq!(store.state().map(|s| s.block_tag), Some(1));

        ledger.insert_block(2, block_with_price(2_100, 1_012));
        ledger.announce(2).await;

        match next_event(&mut events).await {
            StoreEvent::Updated { old, new, diff } => {
                assert_eq!(old.block_tag, 1);
                assert_eq!(new.block_tag, 2);
                assert!(diff.price.is_some());
            }
            other => panic!("expected Updated, got {other:?}"),
        }

        handle.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_block_burst_coalesces_to_one_fetch_of_freshest() {
        let ledger = Arc::new(MockLedger::new());
        ledger.insert_block(1, block_with_price(2_000, 1_000));
        for tag in 2..=5u64 {
            ledger.insert_block(tag, block_with_price(2_000 + tag, 1_000 + tag * 12));
        }

        let store = StateStore::new(Arc::clone(&ledger), None, SyncConfig::for_testing());
        let mut events = store.subscribe();
        let handle = store.start().await;
        let _ = next_event(&mut events).await;

        // Burst of notifications inside one quiescence window, out of
        // order on purpose.
        ledger.announce(3).await;
        ledger.announce(5).await;
        ledger.announce(2).await;
        ledger.announce(4).await;

        match next_event(&mut events).await {
            StoreEvent::Updated { new, .. } => assert_eq!(new.block_tag, 5),
            other => panic!("expected Updated, got {other:?}"),
        }

        // The burst produced exactly one fetch after the initial load.
        tokio::time::sleep(Duration::from_millis(500)).await;
        let inspector = store.inspect();
        assert_eq!(inspector.fetches_attempted(), 2);
        assert_eq!(inspector.snapshots_published(), 2);
        assert_eq!(inspector.published_block(), Some(5));

        handle.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_keeps_state_until_recovery() {
        let ledger = Arc::new(MockLedger::new());
        ledger.insert_block(1, block_with_price(2_000, 1_000));

        let store = StateStore::new(Arc::clone(&ledger), None, SyncConfig::for_testing());
        let mut events = store.subscribe();
        let handle = store.start().await;
        let _ = next_event(&mut events).await;

        ledger.set_should_fail(true);
        ledger.insert_block(2, block_with_price(2_100, 1_012));
        ledger.announce(2).await;
        tokio::time::sleep(Duration::from_millis(500)).await;

        // Previous snapshot survives the failed tick.
        assert_eq!(store.state().map(|s| s.block_tag), Some(1));
        assert_eq!(store.inspect().fetches_failed(), 1);

        ledger.set_should_fail(false);
        ledger.insert_block(3, block_with_price(2_200, 1_024));
        ledger.announce(3).await;

        match next_event(&mut events).await {
            StoreEvent::Updated { new, .. } => assert_eq!(new.block_tag, 3),
            other => panic!("expected Updated, got {other:?}"),
        }

        handle.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_order_notification_never_rolls_back() {
        let ledger = Arc::new(MockLedger::new());
        ledger.insert_block(1, block_with_price(2_000, 1_000));
        ledger.insert_block(2, block_with_price(2_100, 1_012));
        ledger.insert_block(3, block_with_price(2_200, 1_024));

        let store = StateStore::new(Arc::clone(&ledger), None, SyncConfig::for_testing());
        let mut events = store.subscribe();
        let handle = store.start().await;
        let _ = next_event(&mut events).await;

        // Block 3 arrives and is published; a late notification for the
        // already-superseded block 2 lands a full window later, gets
        // fetched, and must be discarded by the monotonicity guard.
        ledger.announce(3).await;
        match next_event(&mut events).await {
            StoreEvent::Updated { new, .. } => assert_eq!(new.block_tag, 3),
            other => panic!("expected Updated, got {other:?}"),
        }

        ledger.announce(2).await;
        tokio::time::sleep(Duration::from_millis(500)).await;

        let inspector = store.inspect();
        assert_eq!(inspector.published_block(), Some(3));
        assert_eq!(inspector.snapshots_discarded_stale(), 1);

        handle.cancel();
    }
}
