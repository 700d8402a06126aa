//! # State Diff
//!
//! Partial diff of `DomainState` between two published snapshots.
//!
//! The diff is what listeners log and what feature controllers use to
//! decide which of their fields changed; unchanged fields are `None`.

use serde::{Deserialize, Serialize};
use shared_types::Decimal;

use super::snapshot::{DepositRecord, DomainState, PositionRecord, StakeRecord};

/// One changed field: previous and new value.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldChange<T> {
    /// Value in the previously published snapshot.
    pub from: T,
    /// Value in the new snapshot.
    pub to: T,
}

fn changed<T: Copy + PartialEq>(from: T, to: T) -> Option<FieldChange<T>> {
    if from == to {
        None
    } else {
        Some(FieldChange { from, to })
    }
}

/// Partial diff between two `DomainState` values.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct DomainStateDiff {
    pub price: Option<FieldChange<Decimal>>,
    pub total_collateral: Option<FieldChange<Decimal>>,
    pub total_debt: Option<FieldChange<Decimal>>,
    pub total_staked: Option<FieldChange<Decimal>>,
    pub account_balance: Option<FieldChange<Decimal>>,
    pub token_balance: Option<FieldChange<Decimal>>,
    pub deposit: Option<FieldChange<DepositRecord>>,
    pub stake: Option<FieldChange<StakeRecord>>,
    pub position: Option<FieldChange<PositionRecord>>,
    pub collection_size: Option<FieldChange<u64>>,
}

impl DomainStateDiff {
    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == DomainStateDiff::default()
    }
}

/// Compute the partial diff of `new` against `old`.
#[must_use]
pub fn diff_base(old: &DomainState, new: &DomainState) -> DomainStateDiff {
    DomainStateDiff {
        price: changed(old.price, new.price),
        total_collateral: changed(old.total_collateral, new.total_collateral),
        total_debt: changed(old.total_debt, new.total_debt),
        total_staked: changed(old.total_staked, new.total_staked),
        account_balance: changed(old.account_balance, new.account_balance),
        token_balance: changed(old.token_balance, new.token_balance),
        deposit: changed(old.deposit, new.deposit),
        stake: changed(old.stake, new.stake),
        position: changed(old.position, new.position),
        collection_size: changed(old.collection_size, new.collection_size),
    }
}
