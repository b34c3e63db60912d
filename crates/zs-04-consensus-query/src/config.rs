//! # Query Configuration

use std::time::Duration;

use crate::domain::CONSENSUS_THRESHOLD_PERCENT;

/// Consensus query tuning.
#[derive(Clone, Debug)]
pub struct QueryConfig {
    /// Per-request timeout for a sharder GET.
    pub request_timeout: Duration,
    /// Minimum `max_count * 100 / K` to accept an answer.
    pub threshold_percent: usize,
    /// Sharders asked for the current round.
    pub round_query_sharders: usize,
    /// Budget for round and hardfork queries.
    pub round_query_timeout: Duration,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(5),
            threshold_percent: CONSENSUS_THRESHOLD_PERCENT,
            round_query_sharders: 5,
            round_query_timeout: Duration::from_secs(10),
        }
    }
}

impl QueryConfig {
    /// Short timeouts for tests.
    pub fn for_testing() -> Self {
        Self {
            request_timeout: Duration::from_millis(200),
            round_query_timeout: Duration::from_millis(400),
            ..Self::default()
        }
    }
}
