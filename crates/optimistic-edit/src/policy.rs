//! # Edit Policy
//!
//! The seam that lets one controller serve every editable feature:
//! a policy supplies the domain type, its delta representation, and the
//! commit-detection predicate.

/// Feature-specific operations over an editable value.
pub trait EditPolicy {
    /// The edited domain value.
    type Value: Clone + PartialEq;

    /// A staged change between two values.
    type Delta: Clone;

    /// The delta that turns `original` into `edited`.
    fn diff(original: &Self::Value, edited: &Self::Value) -> Self::Delta;

    /// Reapply a staged delta onto a newer remote baseline.
    fn apply(base: &Self::Value, delta: &Self::Delta) -> Self::Value;

    /// Whether the remote change from `original` to `new_remote` is
    /// evidence that the user's own pending transaction landed.
    ///
    /// This predicate is intentionally heuristic: the controller has no
    /// reliable way to correlate a specific transaction with a specific
    /// state delta, only directional evidence. It can misfire when two
    /// independent actors mutate the same account's field within one
    /// block; callers should pick a `Value` that only the user's own
    /// transactions move.
    fn committed(original: &Self::Value, new_remote: &Self::Value) -> bool;
}
