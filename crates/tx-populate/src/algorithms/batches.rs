//! # Trial Batch Sizing
//!
//! Pure sizing for the randomized hint search, kept apart from the
//! network-calling loop so it is independently unit-testable.
//!
//! The trial budget is `ceil(10 * sqrt(collection_size))`, split into
//! batches capped at a fixed per-call limit to respect upstream rate
//! limits.

/// Default cap on trials per collaborator call.
pub const MAX_TRIALS_PER_CALL: u64 = 2500;

/// Total randomized trials for a collection of the given size.
#[must_use]
pub fn total_trials(collection_size: u64) -> u64 {
    if collection_size == 0 {
        return 0;
    }
    (10.0 * (collection_size as f64).sqrt()).ceil() as u64
}

/// Split a trial budget into per-call batches of at most `cap`.
#[must_use]
pub fn trial_batches(total: u64, cap: u64) -> Vec<u64> {
    if total == 0 || cap == 0 {
        return Vec::new();
    }
    let mut batches = Vec::with_capacity(total.div_ceil(cap) as usize);
    let mut remaining = total;
    while remaining > 0 {
        let batch = remaining.min(cap);
        batches.push(batch);
        remaining -= batch;
    }
    batches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_collection_zero_trials() {
        assert_eq!(total_trials(0), 0);
    }

    #[test]
    fn test_million_entries_ten_thousand_trials() {
        assert_eq!(total_trials(1_000_000), 10_000);
    }

    #[test]
    fn test_trials_round_up() {
        // sqrt(2) ~= 1.414, 10 * that rounds up to 15.
        assert_eq!(total_trials(2), 15);
    }

    #[test]
    fn test_million_entries_four_batches() {
        let batches = trial_batches(total_trials(1_000_000), MAX_TRIALS_PER_CALL);
        assert_eq!(batches, vec![2500, 2500, 2500, 2500]);
    }

    #[test]
    fn test_remainder_batch() {
        assert_eq!(trial_batches(5100, 2500), vec![2500, 2500, 100]);
    }

    #[test]
    fn test_small_budget_single_batch() {
        assert_eq!(trial_batches(10, 2500), vec![10]);
    }

    #[test]
    fn test_batches_sum_to_total() {
        for total in [1u64, 99, 2500, 2501, 7499, 10_000] {
            let sum: u64 = trial_batches(total, MAX_TRIALS_PER_CALL).iter().sum();
            assert_eq!(sum, total);
        }
    }
}
