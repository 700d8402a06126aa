//! # Chain Poller
//!
//! Debounced "new block" driven fetch scheduler.
//!
//! The poller consumes raw block notifications and emits at most one tick
//! per quiescence window, always for the freshest block observed in the
//! burst. The pure max-tracking lives in
//! [`crate::algorithms::DebounceState`]; this module is only the timer
//! loop around it.

use std::time::Duration;

use shared_types::BlockTag;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::algorithms::DebounceState;

/// Debounced block-notification scheduler.
#[derive(Clone, Debug)]
pub struct ChainPoller {
    window: Duration,
}

/// Handle to a running poller task.
pub struct PollerHandle {
    cancel: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stop the poller: the pending debounce timer is dropped and no
    /// further ticks are emitted.
    pub fn cancel(mut self) {
        if let Some(tx) = self.cancel.take() {
            // An already-finished task is fine.
            let _ = tx.send(());
        }
        self.task.abort();
    }
}

impl ChainPoller {
    /// Create a poller with the given quiescence window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        ChainPoller { window }
    }

    /// Spawn the poller task over a stream of raw block notifications.
    ///
    /// Returns the debounced tick channel and a cancellation handle.
    /// The tick channel closes when the notification channel closes or
    /// the handle is cancelled.
    #[must_use]
    pub fn spawn(&self, blocks: mpsc::Receiver<BlockTag>) -> (mpsc::Receiver<BlockTag>, PollerHandle) {
        let (tick_tx, tick_rx) = mpsc::channel(16);
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let window = self.window;
        let task = tokio::spawn(run(blocks, window, tick_tx, cancel_rx));
        (
            tick_rx,
            PollerHandle {
                cancel: Some(cancel_tx),
                task,
            },
        )
    }
}

async fn run(
    mut blocks: mpsc::Receiver<BlockTag>,
    window: Duration,
    ticks: mpsc::Sender<BlockTag>,
    mut cancel: oneshot::Receiver<()>,
) {
    let mut state = DebounceState::new();
    let sleep = tokio::time::sleep(Duration::ZERO);
    tokio::pin!(sleep);
    let mut armed = false;

    loop {
        tokio::select! {
            _ = &mut cancel => {
                tracing::debug!("poller cancelled");
                break;
            }
            maybe = blocks.recv() => match maybe {
                Some(block) => {
                    state.observe(block);
                    sleep.as_mut().reset(Instant::now() + window);
                    armed = true;
                }
                None => {
                    tracing::debug!("block notification channel closed");
                    break;
                }
            },
            () = &mut sleep, if armed => {
                armed = false;
                if let Some(block) = state.take_latest() {
                    tracing::debug!(block, "debounce window elapsed, emitting tick");
                    if ticks.send(block).await.is_err() {
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_burst_yields_single_tick_for_max_block() {
        let (block_tx, block_rx) = mpsc::channel(16);
        let poller = ChainPoller::new(Duration::from_millis(50));
        let (mut ticks, handle) = poller.spawn(block_rx);

        block_tx.send(100).await.unwrap();
        block_tx.send(102).await.unwrap();
        block_tx.send(101).await.unwrap();

        assert_eq!(ticks.recv().await, Some(102));

        // No second tick follows the burst.
        let extra = tokio::time::timeout(Duration::from_millis(200), ticks.recv()).await;
        assert!(extra.is_err());

        handle.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_notifications_spread_within_window_coalesce() {
        let (block_tx, block_rx) = mpsc::channel(16);
        let poller = ChainPoller::new(Duration::from_millis(50));
        let (mut ticks, handle) = poller.spawn(block_rx);

        block_tx.send(10).await.unwrap();
        tokio::time::advance(Duration::from_millis(10)).await;
        block_tx.send(11).await.unwrap();
        tokio::time::advance(Duration::from_millis(10)).await;
        block_tx.send(12).await.unwrap();

        assert_eq!(ticks.recv().await, Some(12));
        handle.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_yield_separate_ticks() {
        let (block_tx, block_rx) = mpsc::channel(16);
        let poller = ChainPoller::new(Duration::from_millis(50));
        let (mut ticks, handle) = poller.spawn(block_rx);

        block_tx.send(1).await.unwrap();
        assert_eq!(ticks.recv().await, Some(1));

        block_tx.send(2).await.unwrap();
        assert_eq!(ticks.recv().await, Some(2));

        handle.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn test_closing_source_closes_ticks() {
        let (block_tx, block_rx) = mpsc::channel(16);
        let poller = ChainPoller::new(Duration::from_millis(50));
        let (mut ticks, _handle) = poller.spawn(block_rx);

        drop(block_tx);
        assert_eq!(ticks.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticks() {
        let (block_tx, block_rx) = mpsc::channel(16);
        let poller = ChainPoller::new(Duration::from_millis(50));
        let (mut ticks, handle) = poller.spawn(block_rx);

        block_tx.send(5).await.unwrap();
        handle.cancel();

        assert_eq!(ticks.recv().await, None);
    }
}
