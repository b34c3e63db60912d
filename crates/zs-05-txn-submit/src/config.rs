//! # Submit Configuration

use std::time::Duration;

/// Submission and fee lookup tuning.
#[derive(Clone, Debug)]
pub struct SubmitConfig {
    /// Percentage of the miner pool each transaction is posted to.
    pub min_submit: usize,
    /// Per-POST timeout.
    pub request_timeout: Duration,
    /// Percentage of miners asked for the fee table.
    pub fee_query_percent: usize,
    /// Floor on miners asked for the fee table.
    pub min_fee_miners: usize,
    /// How long a fetched fee table stays valid.
    pub fees_cache_ttl: Duration,
    /// Distinct miner sets whose tables are kept.
    pub fees_cache_capacity: usize,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            min_submit: 50,
            request_timeout: Duration::from_secs(5),
            fee_query_percent: 20,
            min_fee_miners: 3,
            fees_cache_ttl: Duration::from_secs(30 * 60 * 60),
            fees_cache_capacity: 4,
        }
    }
}

impl SubmitConfig {
    /// Short timeouts for tests.
    pub fn for_testing() -> Self {
        Self {
            request_timeout: Duration::from_millis(200),
            ..Self::default()
        }
    }
}
