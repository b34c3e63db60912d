//! # Response Documents
//!
//! Read-only documents served by the block worker, sharders and miners.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Tokens are stored on chain in units of 1e-10.
pub const TOKEN_UNIT: i64 = 10_000_000_000;

/// Miner and sharder directory served by the block worker at `/network`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// Miner base URLs.
    #[serde(default)]
    pub miners: Vec<String>,
    /// Sharder base URLs.
    #[serde(default)]
    pub sharders: Vec<String>,
}

impl Network {
    /// Same node sets, ignoring order.
    pub fn same_nodes(&self, other: &Network) -> bool {
        fn sorted(v: &[String]) -> Vec<&String> {
            let mut s: Vec<&String> = v.iter().collect();
            s.sort();
            s
        }
        sorted(&self.miners) == sorted(&other.miners)
            && sorted(&self.sharders) == sorted(&other.sharders)
    }
}

/// Body of `/v1/client/get/balance`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Last transaction touching the balance.
    #[serde(default)]
    pub txn: String,
    /// Round the balance was read at.
    #[serde(default)]
    pub round: i64,
    /// Balance in on-chain units.
    #[serde(default)]
    pub balance: i64,
    /// Last used nonce.
    #[serde(default)]
    pub nonce: i64,
}

impl Balance {
    /// Balance in whole tokens.
    pub fn tokens(&self) -> f64 {
        self.balance as f64 / TOKEN_UNIT as f64
    }
}

/// Body of `/v1/chain/get/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainStats {
    /// Block size.
    pub block_size: i64,
    /// Sample count.
    pub count: i64,
    /// Current round.
    pub current_round: i64,
    /// Delta between current and finalized round.
    pub delta: i64,
    /// Latest finalized round.
    pub latest_finalized_round: i64,
    /// Max finalization time.
    pub max: f64,
    /// Mean finalization time.
    pub mean: f64,
    /// Min finalization time.
    pub min: f64,
    /// 50th percentile.
    pub percentile_50: f64,
    /// 90th percentile.
    pub percentile_90: f64,
    /// 95th percentile.
    pub percentile_95: f64,
    /// 99th percentile.
    pub percentile_99: f64,
    /// 15 minute rate.
    pub rate_15_min: f64,
    /// 1 minute rate.
    pub rate_1_min: f64,
    /// 5 minute rate.
    pub rate_5_min: f64,
    /// Mean rate.
    pub rate_mean: f64,
    /// Standard deviation.
    pub std_dev: f64,
    /// Total transactions.
    pub total_txns: i64,
}

/// Body of `/v1/block/get/fee_stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeStats {
    /// Highest fee in recent blocks.
    pub max_fees: i64,
    /// Lowest fee in recent blocks.
    pub min_fees: i64,
    /// Mean fee in recent blocks.
    pub mean_fees: i64,
}

/// Miner fee table: `to_address -> txn_name -> fee`.
pub type FeesTable = HashMap<String, HashMap<String, i64>>;
