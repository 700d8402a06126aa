//! # Application Layer
//!
//! The lifecycle tracker service.

pub mod tracker;

pub use tracker::{TrackerEvent, TransactionLifecycleTracker, DEFAULT_EVENT_CAPACITY};
