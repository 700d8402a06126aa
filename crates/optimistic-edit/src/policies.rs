//! # Concrete Edit Policies
//!
//! The per-feature `EditPolicy` implementations: additive amounts
//! (deposits, stakes), claimable gains, and two-component positions.

use serde::{Deserialize, Serialize};
use shared_types::Decimal;
use sync_store::PositionRecord;

use crate::policy::EditPolicy;

/// Signed difference between two decimal amounts.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DecimalDelta {
    /// No change staged.
    #[default]
    Unchanged,
    /// Amount increased by the payload.
    Increased(Decimal),
    /// Amount decreased by the payload.
    Decreased(Decimal),
}

impl DecimalDelta {
    /// Compute the delta turning `original` into `edited`.
    #[must_use]
    pub fn between(original: Decimal, edited: Decimal) -> Self {
        if edited > original {
            DecimalDelta::Increased(edited - original)
        } else if edited < original {
            DecimalDelta::Decreased(original - edited)
        } else {
            DecimalDelta::Unchanged
        }
    }

    /// Reapply this delta onto a new baseline. Decreases clamp at zero:
    /// a staged withdrawal can never drive a balance negative.
    #[must_use]
    pub fn applied_to(self, base: Decimal) -> Decimal {
        match self {
            DecimalDelta::Unchanged => base,
            DecimalDelta::Increased(amount) => base.saturating_add(amount),
            DecimalDelta::Decreased(amount) => base.saturating_sub(amount),
        }
    }
}

/// Policy for additive numeric fields that only the user's own
/// transactions move (deposit principal, staked amount).
///
/// Commit evidence: the remote value moved at all.
pub struct AmountPolicy;

impl EditPolicy for AmountPolicy {
    type Value = Decimal;
    type Delta = DecimalDelta;

    fn diff(original: &Decimal, edited: &Decimal) -> DecimalDelta {
        DecimalDelta::between(*original, *edited)
    }

    fn apply(base: &Decimal, delta: &DecimalDelta) -> Decimal {
        delta.applied_to(*base)
    }

    fn committed(original: &Decimal, new_remote: &Decimal) -> bool {
        new_remote != original
    }
}

/// Policy for claimable gain fields.
///
/// Commit evidence: a previously positive gain decreased to zero: the
/// claim landed. Gains accruing upward are unrelated remote activity.
pub struct GainClaimPolicy;

impl EditPolicy for GainClaimPolicy {
    type Value = Decimal;
    type Delta = DecimalDelta;

    fn diff(original: &Decimal, edited: &Decimal) -> DecimalDelta {
        DecimalDelta::between(*original, *edited)
    }

    fn apply(base: &Decimal, delta: &DecimalDelta) -> Decimal {
        delta.applied_to(*base)
    }

    fn committed(original: &Decimal, new_remote: &Decimal) -> bool {
        !original.is_zero() && new_remote.is_zero()
    }
}

/// Componentwise delta of a two-field position.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PositionDelta {
    /// Staged collateral change.
    pub collateral: DecimalDelta,
    /// Staged debt change.
    pub debt: DecimalDelta,
}

/// Policy for the collateral/debt position.
///
/// Commit evidence: either component of the user's own position moved.
/// Rebasing reapplies both staged component deltas, so an unrelated
/// remote mutation (e.g. a redistribution touching shared totals) never
/// discards the user's intent.
pub struct PositionPolicy;

impl EditPolicy for PositionPolicy {
    type Value = PositionRecord;
    type Delta = PositionDelta;

    fn diff(original: &PositionRecord, edited: &PositionRecord) -> PositionDelta {
        PositionDelta {
            collateral: DecimalDelta::between(original.collateral, edited.collateral),
            debt: DecimalDelta::between(original.debt, edited.debt),
        }
    }

    fn apply(base: &PositionRecord, delta: &PositionDelta) -> PositionRecord {
        PositionRecord {
            collateral: delta.collateral.applied_to(base.collateral),
            debt: delta.debt.applied_to(base.debt),
        }
    }

    fn committed(original: &PositionRecord, new_remote: &PositionRecord) -> bool {
        new_remote != original
    }
}
