//! # Application Layer
//!
//! The chain poller task and the state store service orchestrating it.

pub mod poller;
pub mod store;

pub use poller::{ChainPoller, PollerHandle};
pub use store::{StateStore, StoreEvent, StoreHandle};
