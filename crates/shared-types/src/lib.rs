//! # shared-types
//!
//! Domain primitives shared across all LedgerView crates.
//!
//! This is the single source of truth for the value types that cross crate
//! boundaries:
//!
//! - [`Address`]: 20-byte account/contract identifier with a zero sentinel
//! - [`BlockTag`] / [`Timestamp`]: block-granular time
//! - [`Decimal`]: 18-digit fixed point over `U256`, used for every ledger
//!   amount and for sort keys (with [`Decimal::INFINITY`] as the maximal
//!   sentinel)
//!
//! No async code and no I/O live here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod address;
pub mod decimal;

pub use address::Address;
pub use decimal::{Decimal, DecimalError, DECIMAL_DIGITS, DECIMAL_PRECISION};

// Re-export U256 so downstream crates do not depend on primitive-types
// directly.
pub use primitive_types::U256;

/// Block number used to tag a consistent snapshot of remote state.
pub type BlockTag = u64;

/// Unix timestamp in seconds, as reported per block.
pub type Timestamp = u64;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
