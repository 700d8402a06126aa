//! # Populated Intents
//!
//! The value types produced by transaction population: hint pairs for
//! sorted-collection insertion and fully populated intents ready for the
//! write collaborator.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Decimal};

/// Result of one randomized hint batch. Ephemeral, never persisted.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HintTrial {
    /// Best candidate key found in this batch. Zero when the batch found
    /// nothing.
    pub candidate: Address,

    /// Distance metric between the candidate's key and the target.
    pub distance: Decimal,

    /// Seed for the next batch.
    pub continuation_seed: u64,
}

/// Bracketing neighbors for an insertion into the remote sorted
/// collection, ascending by key: `prev.key <= target <= next.key`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Neighbors {
    /// Closest entry at or below the target key.
    pub prev: Address,

    /// Closest entry at or above the target key.
    pub next: Address,
}

impl Neighbors {
    /// The empty pair, returned without any network call for an empty
    /// collection.
    pub const EMPTY: Neighbors = Neighbors {
        prev: Address::ZERO,
        next: Address::ZERO,
    };

    /// Replace either empty-sentinel neighbor with the other neighbor's
    /// value. A real "empty" endpoint is disproportionately expensive for
    /// the remote insertion routine, so it is never left in a hint.
    #[must_use]
    pub fn without_empty_endpoints(self) -> Neighbors {
        match (self.prev.is_zero(), self.next.is_zero()) {
            (true, false) => Neighbors {
                prev: self.next,
                next: self.next,
            },
            (false, true) => Neighbors {
                prev: self.prev,
                next: self.prev,
            },
            _ => self,
        }
    }
}

/// What the populated transaction will do.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum IntentKind {
    /// Deposit into the stability pool.
    Deposit {
        /// Token amount to deposit.
        amount: Decimal,
    },

    /// Withdraw from the stability pool.
    Withdraw {
        /// Token amount to withdraw.
        amount: Decimal,
    },

    /// Stake into the staking pool.
    Stake {
        /// Token amount to stake.
        amount: Decimal,
    },

    /// Open a collateralized position.
    OpenPosition {
        /// Collateral to lock.
        collateral: Decimal,
        /// Debt to draw.
        debt: Decimal,
    },

    /// Adjust an existing position to a new collateral/debt pair.
    AdjustPosition {
        /// Target collateral.
        collateral: Decimal,
        /// Target debt.
        debt: Decimal,
    },
}

/// A transaction intent with everything the write collaborator needs.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PopulatedIntent {
    /// Tracking id, fed to the lifecycle tracker on submission.
    pub id: String,

    /// The operation.
    pub kind: IntentKind,

    /// Gas limit including headroom.
    pub gas_limit: u64,

    /// Insertion hints, present for position operations.
    pub hints: Option<Neighbors>,
}
