//! # Ports
//!
//! Outbound sent-transaction handle trait and its mock.

pub mod outbound;

pub use outbound::{MockSentHandle, SentHandle};
