//! # Gas Headroom
//!
//! Extra gas budgeted so a transaction populated now still succeeds if it
//! is mined up to `tolerance_minutes` later, while the fee parameter it
//! depends on keeps decaying.

/// Fixed allowance for a potential sorted-list re-traversal.
pub const RETRAVERSAL_GAS: u64 = 10_000;

/// Allowance per `log2` step for recomputing the decay function over a
/// longer elapsed window.
pub const DECAY_RECOMPUTE_GAS: u64 = 1_000;

/// Gas headroom estimator.
///
/// `headroom` is non-decreasing in `tolerance_minutes` for any monotone
/// estimate function.
#[derive(Clone, Copy, Debug)]
pub struct GasHeadroomEstimator {
    /// Fixed re-traversal allowance.
    pub retraversal_gas: u64,

    /// Per-`log2` decay recompute allowance.
    pub decay_recompute_gas: u64,
}

impl Default for GasHeadroomEstimator {
    fn default() -> Self {
        GasHeadroomEstimator {
            retraversal_gas: RETRAVERSAL_GAS,
            decay_recompute_gas: DECAY_RECOMPUTE_GAS,
        }
    }
}

impl GasHeadroomEstimator {
    /// Gas limit with headroom: the larger of the estimates at `t = 0`
    /// and `t = tolerance_minutes`, the fixed re-traversal allowance, and
    /// a term growing with `log2(tolerance_minutes + 1)`.
    pub fn headroom<F>(&self, tolerance_minutes: u64, estimate_at: F) -> u64
    where
        F: Fn(u64) -> u64,
    {
        let now = estimate_at(0);
        let later = estimate_at(tolerance_minutes);
        now.max(later)
            .saturating_add(self.retraversal_gas)
            .saturating_add(self.decay_recompute_gas * log2_floor(tolerance_minutes + 1))
    }
}

/// `floor(log2(n))` for `n >= 1`.
fn log2_floor(n: u64) -> u64 {
    debug_assert!(n >= 1);
    u64::from(63 - n.leading_zeros())
}
