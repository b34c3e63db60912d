//! # Verifier Configuration

use std::time::Duration;

/// Verification tuning.
#[derive(Clone, Debug)]
pub struct VerifierConfig {
    /// Percentage of sharders asked for a confirmation.
    pub min_confirmation: usize,
    /// Blocks in the accepted chain, the confirming block included.
    pub confirmation_chain_length: usize,
    /// Confirmation polls before giving up.
    pub confirmation_retries: usize,
    /// Pause between confirmation polls.
    pub retry_interval: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Outer verification attempts.
    pub max_txn_query: usize,
    /// Pause before and between outer attempts.
    pub query_sleep_time: Duration,
    /// Optimistic (true) or trusted (false) verification.
    pub verify_optimistic: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            min_confirmation: 50,
            confirmation_chain_length: 3,
            confirmation_retries: 30,
            retry_interval: Duration::from_secs(1),
            request_timeout: Duration::from_secs(5),
            max_txn_query: 5,
            query_sleep_time: Duration::from_secs(5),
            verify_optimistic: true,
        }
    }
}

impl VerifierConfig {
    /// Fast retries for tests.
    pub fn for_testing() -> Self {
        Self {
            retry_interval: Duration::from_millis(10),
            request_timeout: Duration::from_millis(200),
            query_sleep_time: Duration::from_millis(10),
            ..Self::default()
        }
    }
}
