//! # Transaction Populator
//!
//! Turns user intents into fully populated transactions: validates local
//! preconditions against the latest snapshot, finds insertion hints for
//! position operations, and budgets gas headroom so the transaction
//! survives sitting unmined for a while.

use shared_types::{Address, Decimal};
use std::sync::Arc;
use sync_store::Snapshot;
use tx_tracker::{SentHandle, SubmitError};
use uuid::Uuid;

use crate::algorithms::GasHeadroomEstimator;
use crate::application::HintFinder;
use crate::config::PopulateConfig;
use crate::domain::{IntentKind, Neighbors, PopulateError, PopulatedIntent};
use crate::ports::{SortedLedgerReader, TransactionSender};

/// Populates and submits transaction intents.
///
/// Validation runs entirely against the snapshot before any collaborator
/// call, so a doomed intent fails fast and free.
pub struct Populator<C, S> {
    finder: HintFinder<C>,
    sender: Arc<S>,
    estimator: GasHeadroomEstimator,
    config: PopulateConfig,
}

impl<C, S> Populator<C, S>
where
    C: SortedLedgerReader,
    S: TransactionSender,
{
    /// Create a populator over the given collaborators.
    pub fn new(collection: Arc<C>, sender: Arc<S>, config: PopulateConfig) -> Self {
        Populator {
            finder: HintFinder::new(collection).with_trials_per_call(config.trials_per_call),
            sender,
            estimator: GasHeadroomEstimator::default(),
            config,
        }
    }

    /// Populate a stability pool deposit.
    pub async fn populate_deposit<F>(
        &self,
        snapshot: &Snapshot,
        amount: Decimal,
        estimate_at: F,
    ) -> Result<PopulatedIntent, PopulateError>
    where
        F: Fn(u64) -> u64,
    {
        require_positive(amount, "deposit amount")?;
        if amount > snapshot.base.token_balance {
            return Err(PopulateError::Validation(format!(
                "deposit of {amount} exceeds token balance {}",
                snapshot.base.token_balance
            )));
        }
        Ok(self.finish(IntentKind::Deposit { amount }, None, estimate_at))
    }

    /// Populate a stability pool withdrawal.
    pub async fn populate_withdraw<F>(
        &self,
        snapshot: &Snapshot,
        amount: Decimal,
        estimate_at: F,
    ) -> Result<PopulatedIntent, PopulateError>
    where
        F: Fn(u64) -> u64,
    {
        require_positive(amount, "withdrawal amount")?;
        if amount > snapshot.base.deposit.current {
            return Err(PopulateError::Validation(format!(
                "withdrawal of {amount} exceeds deposit {}",
                snapshot.base.deposit.current
            )));
        }
        Ok(self.finish(IntentKind::Withdraw { amount }, None, estimate_at))
    }

    /// Populate a stake.
    pub async fn populate_stake<F>(
        &self,
        snapshot: &Snapshot,
        amount: Decimal,
        estimate_at: F,
    ) -> Result<PopulatedIntent, PopulateError>
    where
        F: Fn(u64) -> u64,
    {
        require_positive(amount, "stake amount")?;
        if amount > snapshot.base.token_balance {
            return Err(PopulateError::Validation(format!(
                "stake of {amount} exceeds token balance {}",
                snapshot.base.token_balance
            )));
        }
        Ok(self.finish(IntentKind::Stake { amount }, None, estimate_at))
    }

    /// Populate opening a collateralized position, with insertion hints
    /// for its place in the remote sorted collection.
    pub async fn populate_open_position<F>(
        &self,
        snapshot: &Snapshot,
        collateral: Decimal,
        debt: Decimal,
        estimate_at: F,
    ) -> Result<PopulatedIntent, PopulateError>
    where
        F: Fn(u64) -> u64,
    {
        require_positive(collateral, "collateral")?;
        if snapshot.base.position.is_open() {
            return Err(PopulateError::Validation(
                "position already open".to_string(),
            ));
        }
        if collateral > snapshot.base.account_balance {
            return Err(PopulateError::Validation(format!(
                "collateral of {collateral} exceeds account balance {}",
                snapshot.base.account_balance
            )));
        }

        let hints = self
            .position_hints(snapshot, collateral, debt, None)
            .await?;
        Ok(self.finish(
            IntentKind::OpenPosition { collateral, debt },
            Some(hints),
            estimate_at,
        ))
    }

    /// Populate adjusting an open position to a new collateral/debt pair.
    /// The user's existing entry is stepped over when hinting.
    pub async fn populate_adjust_position<F>(
        &self,
        snapshot: &Snapshot,
        user: Address,
        collateral: Decimal,
        debt: Decimal,
        estimate_at: F,
    ) -> Result<PopulatedIntent, PopulateError>
    where
        F: Fn(u64) -> u64,
    {
        if !snapshot.base.position.is_open() {
            return Err(PopulateError::Validation("no open position".to_string()));
        }
        if collateral.is_zero() && !debt.is_zero() {
            return Err(PopulateError::Validation(
                "cannot hold debt without collateral".to_string(),
            ));
        }

        let hints = self
            .position_hints(snapshot, collateral, debt, Some(user))
            .await?;
        Ok(self.finish(
            IntentKind::AdjustPosition { collateral, debt },
            Some(hints),
            estimate_at,
        ))
    }

    /// Submit a populated intent to the write collaborator.
    pub async fn send(
        &self,
        intent: PopulatedIntent,
    ) -> Result<Box<dyn SentHandle>, SubmitError> {
        tracing::info!(id = %intent.id, gas_limit = intent.gas_limit, "submitting transaction");
        self.sender.submit(intent).await
    }

    async fn position_hints(
        &self,
        snapshot: &Snapshot,
        collateral: Decimal,
        debt: Decimal,
        own: Option<Address>,
    ) -> Result<Neighbors, PopulateError> {
        let key = if debt.is_zero() {
            Decimal::INFINITY
        } else {
            collateral
                .checked_div(debt)
                .map_err(|e| PopulateError::Validation(e.to_string()))?
        };
        self.finder
            .find_neighbors(key, snapshot.base.collection_size, own)
            .await
    }

    fn finish<F>(
        &self,
        kind: IntentKind,
        hints: Option<Neighbors>,
        estimate_at: F,
    ) -> PopulatedIntent
    where
        F: Fn(u64) -> u64,
    {
        let gas_limit = self
            .estimator
            .headroom(self.config.gas_tolerance_minutes, estimate_at);
        PopulatedIntent {
            id: Uuid::new_v4().to_string(),
            kind,
            gas_limit,
            hints,
        }
    }
}

fn require_positive(amount: Decimal, what: &str) -> Result<(), PopulateError> {
    if amount.is_zero() {
        return Err(PopulateError::Validation(format!("{what} must be positive")));
    }
    Ok(())
}
