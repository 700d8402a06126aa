//! # Population Configuration

use serde::{Deserialize, Serialize};

use crate::algorithms::MAX_TRIALS_PER_CALL;

/// Configuration for transaction population.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PopulateConfig {
    /// How many minutes a populated transaction may sit unmined and still
    /// carry enough gas.
    pub gas_tolerance_minutes: u64,

    /// Cap on randomized hint trials per collaborator call.
    pub trials_per_call: u64,
}

impl Default for PopulateConfig {
    fn default() -> Self {
        PopulateConfig {
            gas_tolerance_minutes: 10,
            trials_per_call: MAX_TRIALS_PER_CALL,
        }
    }
}

impl PopulateConfig {
    /// Configuration for tests.
    #[must_use]
    pub fn for_testing() -> Self {
        PopulateConfig::default()
    }
}
