//! # Snapshot
//!
//! Immutable, block-tagged view of remote ledger state.
//!
//! Invariant: `base` and `extra` inside one [`Snapshot`] are always derived
//! from the same `block_tag`. Subscribers never observe a mix of two blocks.

use serde::{Deserialize, Serialize};
use shared_types::{BlockTag, Decimal, Timestamp};

/// A user's stability deposit.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DepositRecord {
    /// Amount originally deposited.
    pub initial: Decimal,

    /// Current depleted value after pool offsets.
    pub current: Decimal,

    /// Accrued collateral gain, claimable.
    pub gain: Decimal,
}

/// A user's stake in the staking pool.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StakeRecord {
    /// Staked amount.
    pub amount: Decimal,

    /// Accrued fee reward, claimable.
    pub reward: Decimal,
}

/// A user's collateralized position.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PositionRecord {
    /// Locked collateral.
    pub collateral: Decimal,

    /// Outstanding debt.
    pub debt: Decimal,
}

impl PositionRecord {
    /// Whether the position is open (any collateral or debt).
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.collateral.is_zero() || !self.debt.is_zero()
    }

    /// Sort key for the remote sorted collection: collateral per unit of
    /// debt, or the infinite sentinel for debt-free positions.
    #[must_use]
    pub fn sort_key(&self) -> Decimal {
        if self.debt.is_zero() {
            Decimal::INFINITY
        } else {
            self.collateral
                .checked_div(self.debt)
                .unwrap_or(Decimal::INFINITY)
        }
    }
}

/// Core domain state fetched per block.
///
/// User-scoped fields (`balances`, `deposit`, `stake`, `position`) default
/// to zero-valued sentinels when no user is connected.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomainState {
    /// Oracle price.
    pub price: Decimal,

    /// System-wide locked collateral.
    pub total_collateral: Decimal,

    /// System-wide outstanding debt.
    pub total_debt: Decimal,

    /// Total amount in the staking pool.
    pub total_staked: Decimal,

    /// Connected user's native balance.
    pub account_balance: Decimal,

    /// Connected user's token balance.
    pub token_balance: Decimal,

    /// Connected user's stability deposit.
    pub deposit: DepositRecord,

    /// Connected user's stake.
    pub stake: StakeRecord,

    /// Connected user's position.
    pub position: PositionRecord,

    /// Number of entries in the remote sorted position collection.
    pub collection_size: u64,
}

/// Chain metadata refreshed independently of the core fields.
///
/// Each field is optional: a fetch may leave one undefined, in which case
/// the previously published value is retained (last-write-wins per key).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChainMetadata {
    /// Current borrowing fee rate.
    pub borrowing_fee_rate: Option<Decimal>,

    /// Current redemption fee rate.
    pub redemption_fee_rate: Option<Decimal>,

    /// Gas limit of the tagged block.
    pub block_gas_limit: Option<u64>,
}

impl ChainMetadata {
    /// Merge `self` (the newer fetch) over `older`, preferring the newest
    /// defined value per key.
    #[must_use]
    pub fn merged_over(self, older: &ChainMetadata) -> ChainMetadata {
        ChainMetadata {
            borrowing_fee_rate: self.borrowing_fee_rate.or(older.borrowing_fee_rate),
            redemption_fee_rate: self.redemption_fee_rate.or(older.redemption_fee_rate),
            block_gas_limit: self.block_gas_limit.or(older.block_gas_limit),
        }
    }
}

/// Atomic view of remote state at one block.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    /// Core domain fields.
    pub base: DomainState,

    /// Independently refreshed metadata.
    pub extra: ChainMetadata,

    /// Block this snapshot was derived from.
    pub block_tag: BlockTag,

    /// Timestamp of that block.
    pub block_timestamp: Timestamp,
}
