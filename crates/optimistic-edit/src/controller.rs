//! # Optimistic Edit Controller
//!
//! One parametrized state machine reused per editable feature, replacing
//! per-feature hand-copied reducers.
//!
//! On every store publication the controller either detects that the
//! user's own pending transaction landed (settle) or rebases the staged
//! delta onto the new remote baseline, so an edit survives unrelated
//! remote mutations and is discarded the instant it commits.

use tx_tracker::TxStatus;

use crate::pending::PendingEdit;
use crate::policy::EditPolicy;

/// Outcome of feeding a store update into the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Commit detected while a change was pending: the edit settled onto
    /// the new remote value.
    Settled,
    /// The staged delta was rebased onto the new remote baseline.
    Rebased,
}

/// Optimistic-concurrency controller for one editable feature.
pub struct OptimisticEditController<P: EditPolicy> {
    edit: PendingEdit<P::Value>,
}

impl<P: EditPolicy> OptimisticEditController<P> {
    /// Create a controller in the unedited state over a remote value.
    pub fn new(remote: P::Value) -> Self {
        OptimisticEditController {
            edit: PendingEdit::new(remote),
        }
    }

    /// The staged value shown to the user.
    pub fn edited(&self) -> &P::Value {
        &self.edit.edited
    }

    /// The remote baseline the edit is staged against.
    pub fn original_remote(&self) -> &P::Value {
        &self.edit.original_remote
    }

    /// Whether a transaction for this edit is in flight.
    #[must_use]
    pub fn change_pending(&self) -> bool {
        self.edit.change_pending
    }

    /// Whether the user has an outstanding edit.
    #[must_use]
    pub fn is_edited(&self) -> bool {
        self.edit.is_edited()
    }

    /// Stage a new value typed by the user.
    ///
    /// Staleness prevention while a change is pending is a UI concern;
    /// the controller accepts edits unconditionally.
    pub fn edit(&mut self, value: P::Value) {
        self.edit.edited = value;
    }

    /// Discard the staged edit, back to the remote baseline.
    pub fn revert(&mut self) {
        self.edit.edited = self.edit.original_remote.clone();
    }

    /// Mark the edit's transaction as in flight.
    pub fn start_change(&mut self) {
        self.edit.change_pending = true;
    }

    /// The transaction did not land; keep the edit staged.
    pub fn abort_change(&mut self) {
        self.edit.change_pending = false;
    }

    /// Map a tracker status onto the pending flag.
    pub fn apply_status(&mut self, status: &TxStatus) {
        match status {
            TxStatus::WaitingForApproval | TxStatus::WaitingForConfirmation => self.start_change(),
            TxStatus::Failed { .. } | TxStatus::Cancelled => self.abort_change(),
            // Settlement is driven by store updates, not tracker statuses.
            TxStatus::Idle | TxStatus::Confirmed | TxStatus::ConfirmedOneShot => {}
        }
    }

    /// Reconcile with a newly published remote value.
    pub fn store_update(&mut self, new_remote: P::Value) -> UpdateOutcome {
        let committed = P::committed(&self.edit.original_remote, &new_remote);

        if self.edit.change_pending && committed {
            self.edit.original_remote = new_remote.clone();
            self.edit.edited = new_remote;
            self.edit.change_pending = false;
            return UpdateOutcome::Settled;
        }

        let delta = P::diff(&self.edit.original_remote, &self.edit.edited);
        self.edit.original_remote = new_remote.clone();
        self.edit.edited = P::apply(&new_remote, &delta);
        UpdateOutcome::Rebased
    }
}
