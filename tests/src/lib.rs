//! # LedgerView Test Suite
//!
//! Unified test crate exercising the crates together:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-crate choreography
//!     ├── sync_flow.rs      # poller + store over a mock ledger
//!     ├── edit_flow.rs      # store + tracker + edit controller
//!     └── populate_flow.rs  # populator + tracker round trips
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ledgerview-tests
//!
//! # By category
//! cargo test -p ledgerview-tests integration::
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
