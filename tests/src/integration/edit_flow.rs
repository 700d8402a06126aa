//! # Edit Flow
//!
//! The optimistic edit controller fed by real store publications and real
//! tracker statuses: edits surviving unrelated remote churn, commit
//! detection settling the edit, and rejection keeping it staged.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use optimistic_edit::{AmountPolicy, OptimisticEditController, UpdateOutcome};
    use shared_types::Decimal;
    use sync_store::{DomainState, MockBlock, MockLedger, StateStore, StoreEvent, SyncConfig};
    use tokio::sync::broadcast;
    use tokio::time::timeout;
    use tx_tracker::{
        MockSentHandle, SubmitError, TransactionLifecycleTracker, TxStatus,
    };

    const RECV_BUDGET: Duration = Duration::from_secs(30);

    type DepositController = OptimisticEditController<AmountPolicy>;

    fn block_with_deposit(current: u64, timestamp: u64) -> MockBlock {
        let mut state = DomainState::default();
        state.deposit.current = Decimal::from(current);
        MockBlock {
            state,
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

    async fn wait_for_status(tracker: &TransactionLifecycleTracker, id: &str, wanted: TxStatus) {
        let mut events = tracker.subscribe();
        if tracker.status_of(id) == wanted {
            return;
        }
        loop {
            let event = timeout(RECV_BUDGET, events.recv())
                .await
                .expect("no tracker event within budget")
                .expect("tracker channel closed");
            if event.id == id && event.status == wanted {
                return;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_survives_unrelated_remote_churn() {
        let ledger = Arc::new(MockLedger::new());
        ledger.insert_block(1, block_with_deposit(100, 1_000));

        let store = StateStore::new(Arc::clone(&ledger), None, SyncConfig::for_testing());
        let mut events = store.subscribe();
        let handle = store.start().await;
        let _ = next_event(&mut events).await;

        // User stages +50 on a remote deposit of 100.
        let mut ctrl = DepositController::new(Decimal::from(100));
        ctrl.edit(Decimal::from(150));

        // A pool offset drains the deposit to 80 in a block the user had
        // nothing to do with.
        ledger.insert_block(2, block_with_deposit(80, 1_012));
        ledger.announce(2).await;

        let outcome = match next_event(&mut events).await {
            StoreEvent::Updated { new, .. } => ctrl.store_update(new.base.deposit.current),
            other => panic!("expected Updated, got {other:?}"),
        };

        // The +50 intent is rebased onto the new baseline of 80.
        assert_eq!(outcome, UpdateOutcome::Rebased);
        assert_eq!(*ctrl.original_remote(), Decimal::from(80));
        assert_eq!(*ctrl.edited(), Decimal::from(130));
        assert!(ctrl.is_edited());

        handle.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_settles_edit_with_single_one_shot() {
        let ledger = Arc::new(MockLedger::new());
        ledger.insert_block(1, block_with_deposit(100, 1_000));

        let store = StateStore::new(Arc::clone(&ledger), None, SyncConfig::for_testing());
        let mut events = store.subscribe();
        let handle = store.start().await;
        let _ = next_event(&mut events).await;

        let mut ctrl = DepositController::new(Decimal::from(100));
        ctrl.edit(Decimal::from(150));

        // Submit the change and mirror the tracker status into the
        // controller.
        let tracker = TransactionLifecycleTracker::new();
        let id = TransactionLifecycleTracker::generate_id();
        tracker.track(id.clone(), async {
            Ok(Box::new(MockSentHandle::confirmed(2)) as Box<dyn tx_tracker::SentHandle>)
        });
        ctrl.apply_status(&tracker.status_of(&id));
        assert!(ctrl.change_pending());

        wait_for_status(&tracker, &id, TxStatus::ConfirmedOneShot).await;

        // Confirmation side effects fire exactly once.
        assert!(tracker.consume_one_shot(&id));
        assert!(!tracker.consume_one_shot(&id));
        assert_eq!(tracker.status_of(&id), TxStatus::Confirmed);

        // The confirmed block publishes the user's own value; the
        // controller detects the commit and discards the edit.
        ledger.insert_block(2, block_with_deposit(150, 1_012));
        ledger.announce(2).await;

        let outcome = match next_event(&mut events).await {
            StoreEvent::Updated { new, .. } => ctrl.store_update(new.base.deposit.current),
            other => panic!("expected Updated, got {other:?}"),
        };

        assert_eq!(outcome, UpdateOutcome::Settled);
        assert!(!ctrl.change_pending());
        assert!(!ctrl.is_edited());
        assert_eq!(*ctrl.edited(), Decimal::from(150));

        handle.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejection_keeps_edit_staged() {
        let mut ctrl = DepositController::new(Decimal::from(100));
        ctrl.edit(Decimal::from(150));

        let tracker = TransactionLifecycleTracker::new();
        let id = TransactionLifecycleTracker::generate_id();
        tracker.track(id.clone(), async { Err(SubmitError::Rejected) });
        ctrl.apply_status(&tracker.status_of(&id));

        wait_for_status(&tracker, &id, TxStatus::Cancelled).await;
        ctrl.apply_status(&tracker.status_of(&id));

        // Declining the signature prompt aborts the in-flight change but
        // the staged value stays for another attempt.
        assert!(!ctrl.change_pending());
        assert!(ctrl.is_edited());
        assert_eq!(*ctrl.edited(), Decimal::from(150));
    }
}
