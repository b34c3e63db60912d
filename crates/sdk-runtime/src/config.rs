//! # SDK Configuration
//!
//! One struct for every tunable of the SDK, convertible into the smaller
//! per-component configs.
//!
//! ## Environment overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `ZCN_BLOCK_WORKER` | `block_worker` |
//! | `ZCN_SIGNATURE_SCHEME` | `signature_scheme` |
//! | `ZCN_CHAIN_ID` | `chain_id` |
//! | `ZCN_MIN_SUBMIT` | `min_submit` |
//! | `ZCN_MIN_CONFIRMATION` | `min_confirmation` |
//! | `ZCN_CONFIRMATION_CHAIN_LENGTH` | `confirmation_chain_length` |
//! | `ZCN_MAX_TXN_QUERY` | `max_txn_query` |
//! | `ZCN_QUERY_SLEEP_TIME` | `query_sleep_time` (seconds) |
//! | `ZCN_SHARDER_CONSENSUS` | `sharder_consensus` |
//! | `ZCN_VERIFY_OPTIMISTIC` | `verify_optimistic` |

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use shared_types::SdkError;
use thiserror::Error;
use tracing::warn;
use zs_01_transport::{build_url, TransportConfig};
use zs_04_consensus_query::QueryConfig;
use zs_05_txn_submit::SubmitConfig;
use zs_06_txn_verify::VerifierConfig;

/// Healthy-view size used when the caller does not pick one.
pub const DEFAULT_SHARDER_CONSENSUS: usize = 3;

/// Signature scheme of the client wallet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureScheme {
    /// BLS on BN254, signer supplied by the host.
    #[default]
    #[serde(rename = "bls0chain")]
    Bls0Chain,
    /// Ed25519.
    #[serde(rename = "ed25519")]
    Ed25519,
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureScheme::Bls0Chain => write!(f, "bls0chain"),
            SignatureScheme::Ed25519 => write!(f, "ed25519"),
        }
    }
}

impl FromStr for SignatureScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bls0chain" => Ok(SignatureScheme::Bls0Chain),
            "ed25519" => Ok(SignatureScheme::Ed25519),
            other => Err(ConfigError::UnknownSignatureScheme(other.to_string())),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `block_worker` not set.
    #[error("block_worker is required")]
    MissingBlockWorker,

    /// `block_worker` is not an http(s) URL.
    #[error("block_worker is not a valid http(s) URL: {0}")]
    InvalidBlockWorker(String),

    /// Unsupported signature scheme.
    #[error("unknown signature scheme: {0}")]
    UnknownSignatureScheme(String),
}

impl From<ConfigError> for SdkError {
    fn from(err: ConfigError) -> Self {
        SdkError::InvalidConfig(err.to_string())
    }
}

/// Complete SDK configuration.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    /// Network directory URL.
    pub block_worker: String,
    /// Wallet signature scheme.
    pub signature_scheme: SignatureScheme,
    /// Chain identifier stamped on transactions.
    pub chain_id: String,
    /// Percentage of miners a transaction is posted to.
    pub min_submit: usize,
    /// Percentage of sharders asked for a confirmation.
    pub min_confirmation: usize,
    /// Blocks in an accepted confirmation chain.
    pub confirmation_chain_length: usize,
    /// Outer verification attempts.
    pub max_txn_query: usize,
    /// Pause before and between verification attempts.
    #[serde_as(as = "DurationSeconds<u64>")]
    pub query_sleep_time: Duration,
    /// Healthy-view size K. `None` uses [`DEFAULT_SHARDER_CONSENSUS`].
    pub sharder_consensus: Option<usize>,
    /// Optimistic (true) or trusted (false) verification.
    pub verify_optimistic: bool,
    /// Passed through to storage layers.
    pub preferred_blobbers: Vec<String>,
    /// Per-request timeout.
    #[serde_as(as = "DurationSeconds<u64>")]
    pub request_timeout: Duration,
    /// Interval between `/network` refreshes.
    #[serde_as(as = "DurationSeconds<u64>")]
    pub network_refresh_interval: Duration,
    /// Budget for one `/network` fetch.
    #[serde_as(as = "DurationSeconds<u64>")]
    pub network_timeout: Duration,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            block_worker: String::new(),
            signature_scheme: SignatureScheme::default(),
            chain_id: String::new(),
            min_submit: 50,
            min_confirmation: 50,
            confirmation_chain_length: 3,
            max_txn_query: 5,
            query_sleep_time: Duration::from_secs(5),
            sharder_consensus: None,
            verify_optimistic: true,
            preferred_blobbers: Vec::new(),
            request_timeout: Duration::from_secs(5),
            network_refresh_interval: Duration::from_secs(3600),
            network_timeout: Duration::from_secs(60),
        }
    }
}

impl SdkConfig {
    /// Defaults pointed at `block_worker`.
    pub fn new(block_worker: impl Into<String>, signature_scheme: SignatureScheme) -> Self {
        Self {
            block_worker: block_worker.into(),
            signature_scheme,
            ..Self::default()
        }
    }

    /// Short timeouts and pauses for tests.
    pub fn for_testing(block_worker: impl Into<String>) -> Self {
        Self {
            block_worker: block_worker.into(),
            signature_scheme: SignatureScheme::Ed25519,
            query_sleep_time: Duration::from_millis(10),
            request_timeout: Duration::from_millis(200),
            network_timeout: Duration::from_millis(500),
            ..Self::default()
        }
    }

    /// Check required fields and normalise out-of-range values.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let worker = self.block_worker.trim().trim_end_matches('/').to_string();
        if worker.is_empty() {
            return Err(ConfigError::MissingBlockWorker);
        }
        if !(worker.starts_with("http://") || worker.starts_with("https://")) {
            return Err(ConfigError::InvalidBlockWorker(worker));
        }
        if build_url(&worker, "/network", &[]).is_err() {
            return Err(ConfigError::InvalidBlockWorker(worker));
        }
        self.block_worker = worker;

        self.min_submit = self.min_submit.clamp(1, 100);
        self.min_confirmation = self.min_confirmation.clamp(1, 100);

        let defaults = Self::default();
        if self.max_txn_query == 0 {
            self.max_txn_query = defaults.max_txn_query;
        }
        if self.query_sleep_time.is_zero() {
            self.query_sleep_time = defaults.query_sleep_time;
        }
        if self.confirmation_chain_length == 0 {
            self.confirmation_chain_length = defaults.confirmation_chain_length;
        }
        if self.sharder_consensus == Some(0) {
            self.sharder_consensus = None;
        }
        Ok(())
    }

    /// Apply `ZCN_*` environment variables.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("ZCN_BLOCK_WORKER") {
            self.block_worker = v;
        }
        if let Some(v) = lookup("ZCN_CHAIN_ID") {
            self.chain_id = v;
        }
        if let Some(v) = lookup("ZCN_SIGNATURE_SCHEME") {
            match v.parse() {
                Ok(scheme) => self.signature_scheme = scheme,
                Err(e) => warn!("[sdk] ignoring ZCN_SIGNATURE_SCHEME: {}", e),
            }
        }

        override_parsed(&lookup, "ZCN_MIN_SUBMIT", &mut self.min_submit);
        override_parsed(&lookup, "ZCN_MIN_CONFIRMATION", &mut self.min_confirmation);
        override_parsed(
            &lookup,
            "ZCN_CONFIRMATION_CHAIN_LENGTH",
            &mut self.confirmation_chain_length,
        );
        override_parsed(&lookup, "ZCN_MAX_TXN_QUERY", &mut self.max_txn_query);
        override_parsed(&lookup, "ZCN_VERIFY_OPTIMISTIC", &mut self.verify_optimistic);

        let mut sleep_secs = self.query_sleep_time.as_secs();
        if override_parsed(&lookup, "ZCN_QUERY_SLEEP_TIME", &mut sleep_secs) {
            self.query_sleep_time = Duration::from_secs(sleep_secs);
        }
        let mut consensus = self.sharder_consensus.unwrap_or(DEFAULT_SHARDER_CONSENSUS);
        if override_parsed(&lookup, "ZCN_SHARDER_CONSENSUS", &mut consensus) {
            self.sharder_consensus = Some(consensus);
        }
    }

    /// Healthy-view size for a pool of `sharders` nodes.
    pub fn consensus_for(&self, sharders: usize) -> usize {
        self.sharder_consensus
            .unwrap_or(DEFAULT_SHARDER_CONSENSUS)
            .max(DEFAULT_SHARDER_CONSENSUS)
            .min(sharders)
    }

    /// Transport settings.
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            request_timeout: self.request_timeout,
            ..TransportConfig::default()
        }
    }

    /// Consensus query settings.
    pub fn query_config(&self) -> QueryConfig {
        QueryConfig {
            request_timeout: self.request_timeout,
            ..QueryConfig::default()
        }
    }

    /// Submitter settings.
    pub fn submit_config(&self) -> SubmitConfig {
        SubmitConfig {
            min_submit: self.min_submit,
            request_timeout: self.request_timeout,
            ..SubmitConfig::default()
        }
    }

    /// Verifier settings.
    pub fn verifier_config(&self) -> VerifierConfig {
        VerifierConfig {
            min_confirmation: self.min_confirmation,
            confirmation_chain_length: self.confirmation_chain_length,
            max_txn_query: self.max_txn_query,
            query_sleep_time: self.query_sleep_time,
            request_timeout: self.request_timeout,
            verify_optimistic: self.verify_optimistic,
            ..VerifierConfig::default()
        }
    }
}

fn override_parsed<F, T>(lookup: &F, key: &str, target: &mut T) -> bool
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = lookup(key) else {
        return false;
    };
    match raw.trim().parse() {
        Ok(value) => {
            *target = value;
            true
        }
        Err(_) => {
            warn!("[sdk] ignoring unparseable {}={}", key, raw);
            false
        }
    }
}
