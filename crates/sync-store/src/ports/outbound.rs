//! # Outbound Ports
//!
//! Traits for the ledger read collaborator and the block-notification
//! source, plus a mock implementation for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{Address, BlockTag, Decimal, Timestamp};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::domain::{ChainMetadata, DepositRecord, DomainState, PositionRecord, StakeRecord, SyncError};

/// Ledger read collaborator - outbound port.
///
/// Every method is tagged with a `BlockTag` so that concurrent reads
/// composing one snapshot all observe the same block.
#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// Oracle price at a block.
    async fn price(&self, block: BlockTag) -> Result<Decimal, SyncError>;

    /// System totals (collateral, debt) at a block.
    async fn totals(&self, block: BlockTag) -> Result<(Decimal, Decimal), SyncError>;

    /// Total staked amount at a block.
    async fn total_staked(&self, block: BlockTag) -> Result<Decimal, SyncError>;

    /// A user's native and token balances at a block. `None` user yields
    /// zero sentinels.
    async fn balances(
        &self,
        user: Option<Address>,
        block: BlockTag,
    ) -> Result<(Decimal, Decimal), SyncError>;

    /// A user's stability deposit at a block.
    async fn deposit(
        &self,
        user: Option<Address>,
        block: BlockTag,
    ) -> Result<DepositRecord, SyncError>;

    /// A user's stake at a block.
    async fn stake(&self, user: Option<Address>, block: BlockTag)
        -> Result<StakeRecord, SyncError>;

    /// A user's position at a block.
    async fn position(
        &self,
        user: Option<Address>,
        block: BlockTag,
    ) -> Result<PositionRecord, SyncError>;

    /// Size of the remote sorted position collection at a block.
    async fn collection_size(&self, block: BlockTag) -> Result<u64, SyncError>;

    /// Independently refreshed chain metadata at a block.
    async fn metadata(&self, block: BlockTag) -> Result<ChainMetadata, SyncError>;

    /// Timestamp of a block.
    async fn block_timestamp(&self, block: BlockTag) -> Result<Timestamp, SyncError>;

    /// The newest block known to the collaborator.
    async fn latest_block(&self) -> Result<BlockTag, SyncError>;
}

/// Block-notification source - outbound port.
#[async_trait]
pub trait BlockSource: Send + Sync {
    /// Register a listener; new block numbers arrive on the returned
    /// channel. Delivery may be out of order; the poller tolerates it.
    async fn subscribe_blocks(&self) -> mpsc::Receiver<BlockTag>;
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

/// One block's worth of mock ledger data.
#[derive(Clone, Debug, Default)]
pub struct MockBlock {
    /// Domain fields at this block.
    pub state: DomainState,
    /// Metadata at this block.
    pub extra: ChainMetadata,
    /// Block timestamp.
    pub timestamp: Timestamp,
    /// Artificial latency applied to every field fetch for this block.
    pub fetch_delay: Duration,
}

struct MockLedgerInner {
    blocks: HashMap<BlockTag, MockBlock>,
    latest: BlockTag,
    should_fail: bool,
    subscribers: Vec<mpsc::Sender<BlockTag>>,
}

/// Mock ledger for testing: in-memory per-block field values, injectable
/// latency and failures, manual block announcements.
#[derive(Clone)]
pub struct MockLedger {
    inner: Arc<Mutex<MockLedgerInner>>,
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLedger {
    /// Create an empty mock ledger.
    #[must_use]
    pub fn new() -> Self {
        MockLedger {
            inner: Arc::new(Mutex::new(MockLedgerInner {
                blocks: HashMap::new(),
                latest: 0,
                should_fail: false,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Insert (or replace) the data served for a block. Raises the mock's
    /// latest block if `tag` is newer.
    pub fn insert_block(&self, tag: BlockTag, block: MockBlock) {
        let mut inner = self.inner.lock();
        inner.latest = inner.latest.max(tag);
        inner.blocks.insert(tag, block);
    }

    /// Toggle failure injection: while set, every field fetch errors.
    pub fn set_should_fail(&self, fail: bool) {
        self.inner.lock().should_fail = fail;
    }

    /// Announce a new block to all subscribed listeners.
    pub async fn announce(&self, tag: BlockTag) {
        let senders: Vec<_> = {
            let mut inner = self.inner.lock();
            inner.latest = inner.latest.max(tag);
            inner.subscribers.clone()
        };
        for sender in senders {
            // A closed listener is fine; it unsubscribed.
            let _ = sender.send(tag).await;
        }
    }

    fn lookup(&self, block: BlockTag) -> Result<MockBlock, SyncError> {
        let inner = self.inner.lock();
        if inner.should_fail {
            return Err(SyncError::TransientFetch("mock failure".to_string()));
        }
        inner
            .blocks
            .get(&block)
            .cloned()
            .ok_or_else(|| SyncError::TransientFetch(format!("unknown block {block}")))
    }

    async fn fetch(&self, block: BlockTag) -> Result<MockBlock, SyncError> {
        let data = self.lookup(block)?;
        if !data.fetch_delay.is_zero() {
            tokio::time::sleep(data.fetch_delay).await;
        }
        Ok(data)
    }
}

#[async_trait]
impl LedgerReader for MockLedger {
    async fn price(&self, block: BlockTag) -> Result<Decimal, SyncError> {
        Ok(self.fetch(block).await?.state.price)
    }

    async fn totals(&self, block: BlockTag) -> Result<(Decimal, Decimal), SyncError> {
        let state = self.fetch(block).await?.state;
        Ok((state.total_collateral, state.total_debt))
    }

    async fn total_staked(&self, block: BlockTag) -> Result<Decimal, SyncError> {
        Ok(self.fetch(block).await?.state.total_staked)
    }

    async fn balances(
        &self,
        user: Option<Address>,
        block: BlockTag,
    ) -> Result<(Decimal, Decimal), SyncError> {
        if user.is_none() {
            return Ok((Decimal::ZERO, Decimal::ZERO));
        }
        let state = self.fetch(block).await?.state;
        Ok((state.account_balance, state.token_balance))
    }

    async fn deposit(
        &self,
        user: Option<Address>,
        block: BlockTag,
    ) -> Result<DepositRecord, SyncError> {
        if user.is_none() {
            return Ok(DepositRecord::default());
        }
        Ok(self.fetch(block).await?.state.deposit)
    }

    async fn stake(
        &self,
        user: Option<Address>,
        block: BlockTag,
    ) -> Result<StakeRecord, SyncError> {
        if user.is_none() {
            return Ok(StakeRecord::default());
        }
        Ok(self.fetch(block).await?.state.stake)
    }

    async fn position(
        &self,
        user: Option<Address>,
        block: BlockTag,
    ) -> Result<PositionRecord, SyncError> {
        if user.is_none() {
            return Ok(PositionRecord::default());
        }
        Ok(self.fetch(block).await?.state.position)
    }

    async fn collection_size(&self, block: BlockTag) -> Result<u64, SyncError> {
        Ok(self.fetch(block).await?.state.collection_size)
    }

    async fn metadata(&self, block: BlockTag) -> Result<ChainMetadata, SyncError> {
        Ok(self.fetch(block).await?.extra)
    }

    async fn block_timestamp(&self, block: BlockTag) -> Result<Timestamp, SyncError> {
        Ok(self.fetch(block).await?.timestamp)
    }

    async fn latest_block(&self) -> Result<BlockTag, SyncError> {
        let inner = self.inner.lock();
        if inner.should_fail {
            return Err(SyncError::TransientFetch("mock failure".to_string()));
        }
        Ok(inner.latest)
    }
}

#[async_trait]
impl BlockSource for MockLedger {
    async fn subscribe_blocks(&self) -> mpsc::Receiver<BlockTag> {
        let (tx, rx) = mpsc::channel(64);
        self.inner.lock().subscribers.push(tx);
        rx
    }
}
