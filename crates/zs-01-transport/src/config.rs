//! # Transport Configuration

use std::time::Duration;

/// Pooled client tuning.
#[derive(Clone, Debug)]
pub struct TransportConfig {
    /// TCP connect timeout.
    pub dial_timeout: Duration,
    /// TCP keep-alive interval.
    pub keep_alive: Duration,
    /// TLS handshake budget. reqwest folds the handshake into the connect
    /// phase, so the effective connect budget is the larger of the two.
    pub tls_handshake_timeout: Duration,
    /// Idle pooled connections kept per host.
    pub max_idle_per_host: usize,
    /// How long an idle pooled connection is kept.
    pub idle_timeout: Duration,
    /// Default per-request timeout for callers that do not pass one.
    pub request_timeout: Duration,
    /// `User-Agent` header.
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            dial_timeout: Duration::from_secs(180),
            keep_alive: Duration::from_secs(45),
            tls_handshake_timeout: Duration::from_secs(45),
            max_idle_per_host: 25,
            idle_timeout: Duration::from_secs(90),
            request_timeout: Duration::from_secs(5),
            user_agent: format!("zchain-sdk/{}", crate::VERSION),
        }
    }
}

impl TransportConfig {
    /// Short timeouts for tests.
    pub fn for_testing() -> Self {
        Self {
            dial_timeout: Duration::from_secs(1),
            keep_alive: Duration::from_secs(5),
            tls_handshake_timeout: Duration::from_secs(1),
            max_idle_per_host: 2,
            idle_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_millis(500),
            user_agent: "zchain-sdk-test".to_string(),
        }
    }

    /// Connect budget handed to the client.
    pub fn connect_timeout(&self) -> Duration {
        self.dial_timeout.max(self.tls_handshake_timeout)
    }
}
