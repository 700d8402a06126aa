//! # optimistic-edit
//!
//! Generic optimistic-edit reconciliation for editable ledger features.
//!
//! ## Purpose
//!
//! A user stages a local edit (deposit amount, stake amount,
//! collateral/debt) against the last known remote value. The edit must
//! survive irrelevant remote updates and be discarded the instant the
//! user's own pending transaction lands. One parametrized controller
//! implements that algorithm for every feature; a [`policy::EditPolicy`]
//! supplies the domain type, its delta, and the commit predicate.
//!
//! ## Algorithm (per store publication)
//!
//! 1. `committed := policy.committed(original, new_remote)`, a heuristic
//!    based on directional evidence only.
//! 2. If a change is pending and `committed`: settle. Original, edited
//!    and the pending flag all collapse onto the new remote value.
//! 3. Otherwise: rebase; the staged delta is reapplied onto the new
//!    remote baseline, preserving the user's intent across unrelated
//!    mutations.
//!
//! The controller never produces a value the user did not either type or
//! have rebased from a typed delta.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod controller;
pub mod pending;
pub mod policies;
pub mod policy;

// Re-exports
pub use controller::{OptimisticEditController, UpdateOutcome};
pub use pending::PendingEdit;
pub use policies::{AmountPolicy, DecimalDelta, GainClaimPolicy, PositionDelta, PositionPolicy};
pub use policy::EditPolicy;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
