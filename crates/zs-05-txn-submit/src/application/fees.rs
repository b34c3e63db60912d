//! # Fee Estimation
//!
//! Miners agree on a fee table keyed by recipient address and lower-cased
//! transaction name. The most common 200 answer among a handful of random
//! miners is taken and cached per miner set.

use std::num::NonZeroUsize;
use std::sync::Arc;

use futures::future::join_all;
use lru::LruCache;
use parking_lot::Mutex;
use rand::seq::SliceRandom;
use shared_types::{FeesTable, SmartContractTxnData, Transaction, TXN_TYPE_SEND};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use zs_01_transport::{build_url, HttpTransport, TransportError};
use zs_04_consensus_query::{canonical_digest, Plurality};

use crate::algorithms::sample_size;
use crate::config::SubmitConfig;
use crate::domain::{SubmitError, FEES_TABLE_PATH};

const TRANSFER: &str = "transfer";

struct CachedTable {
    fetched_at: Instant,
    table: Arc<FeesTable>,
}

/// Fee table lookup with a TTL cache.
pub struct FeeEstimator {
    transport: Arc<dyn HttpTransport>,
    config: SubmitConfig,
    cache: Mutex<LruCache<String, CachedTable>>,
}

impl FeeEstimator {
    /// Create an estimator.
    pub fn new(transport: Arc<dyn HttpTransport>, config: SubmitConfig) -> Self {
        let capacity = NonZeroUsize::new(config.fees_cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            transport,
            config,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    fn cache_key(miners: &[String]) -> String {
        let mut sorted: Vec<&str> = miners.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted.join(",")
    }

    /// Fetch the fee table from a random share of `miners`.
    pub async fn get_fees_table(
        &self,
        miners: &[String],
        cancel: &CancellationToken,
    ) -> Result<FeesTable, SubmitError> {
        if miners.is_empty() {
            return Err(SubmitError::NoMiners);
        }

        let n = sample_size(self.config.fee_query_percent, miners.len())
            .max(self.config.min_fee_miners)
            .min(miners.len());
        let chosen: Vec<&String> = miners.choose_multiple(&mut rand::thread_rng(), n).collect();

        let requests = chosen.iter().map(|miner| async move {
            match build_url(miner, FEES_TABLE_PATH, &[]) {
                Ok(url) => {
                    self.transport
                        .get(&url, self.config.request_timeout, cancel)
                        .await
                }
                Err(err) => Err(err),
            }
        });
        let results = join_all(requests).await;
        if cancel.is_cancelled() {
            return Err(SubmitError::Cancelled);
        }

        let mut vote = Plurality::new();
        let mut errors = Vec::new();
        for result in results {
            match result {
                Ok(resp) if resp.status == 200 => {
                    vote.add(canonical_digest(&resp.body), resp.body);
                }
                Ok(resp) => errors.push(format!("{}: status {}", resp.url, resp.status)),
                Err(TransportError::Cancelled) => return Err(SubmitError::Cancelled),
                Err(err) => errors.push(err.to_string()),
            }
        }

        let (body, count) = vote
            .into_winner()
            .ok_or_else(|| SubmitError::FeesTable(errors.join(",")))?;
        debug!(count, asked = n, "[zs-05] fee table agreed");
        serde_json::from_str(&body).map_err(|e| SubmitError::FeesTable(e.to_string()))
    }

    async fn table(
        &self,
        miners: &[String],
        cancel: &CancellationToken,
    ) -> Result<Arc<FeesTable>, SubmitError> {
        let key = Self::cache_key(miners);
        {
            let mut cache = self.cache.lock();
            if let Some(cached) = cache.get(&key) {
                if cached.fetched_at.elapsed() < self.config.fees_cache_ttl {
                    return Ok(Arc::clone(&cached.table));
                }
            }
        }

        let table = Arc::new(self.get_fees_table(miners, cancel).await?);
        self.cache.lock().put(
            key,
            CachedTable {
                fetched_at: Instant::now(),
                table: Arc::clone(&table),
            },
        );
        Ok(table)
    }

    /// Fee for `txn` according to the agreed table.
    pub async fn estimate_fee(
        &self,
        txn: &Transaction,
        miners: &[String],
        cancel: &CancellationToken,
    ) -> Result<u64, SubmitError> {
        let name = match serde_json::from_str::<SmartContractTxnData>(&txn.transaction_data) {
            Ok(data) => data.name.to_lowercase(),
            Err(_) if txn.transaction_type == TXN_TYPE_SEND => TRANSFER.to_string(),
            Err(e) => return Err(SubmitError::Serialization(e.to_string())),
        };

        let table = self.table(miners, cancel).await?;
        lookup_fee(&table, &name, &txn.to_client_id).ok_or_else(|| {
            warn!("[zs-05] no fee entry for {} to {}", name, txn.to_client_id);
            SubmitError::UnknownFee {
                name,
                to: txn.to_client_id.clone(),
            }
        })
    }
}

fn lookup_fee(table: &FeesTable, name: &str, to: &str) -> Option<u64> {
    let fee = match table.get(to).and_then(|fees| fees.get(name)) {
        Some(fee) => *fee,
        None if name == TRANSFER => *table.get(TRANSFER)?.get(TRANSFER)?,
        None => return None,
    };
    u64::try_from(fee).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use zs_01_transport::MockTransport;

    const SC: &str = "6dba10422e368813802877a85039d3985d96760ed844092319743fb3a76712d7";

    fn miners(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("http://m{i}")).collect()
    }

    fn table_body() -> String {
        json!({
            SC: {"new_allocation_request": 1000, "update_settings": 7},
            "transfer": {"transfer": 10},
        })
        .to_string()
    }

    fn sc_txn(name: &str) -> Transaction {
        let data = serde_json::to_string(&SmartContractTxnData::new(name, json!({}))).unwrap();
        let mut txn = Transaction::new("c", SC, 0, data);
        txn.transaction_type = shared_types::TXN_TYPE_SMART_CONTRACT;
        txn
    }

    #[tokio::test]
    async fn test_estimate_sc_fee_case_insensitive() {
        let mock = Arc::new(MockTransport::new());
        mock.on("http://m", 200, table_body());
        let estimator = FeeEstimator::new(mock.clone(), SubmitConfig::for_testing());

        let fee = estimator
            .estimate_fee(&sc_txn("New_Allocation_Request"), &miners(3), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(fee, 1000);
    }

    #[tokio::test]
    async fn test_plain_transfer_falls_back() {
        let mock = Arc::new(MockTransport::new());
        mock.on("http://m", 200, table_body());
        let estimator = FeeEstimator::new(mock.clone(), SubmitConfig::for_testing());

        let txn = Transaction::new("c", "some-wallet", 5, "");
        let fee = estimator
            .estimate_fee(&txn, &miners(3), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(fee, 10);
    }

    #[tokio::test]
    async fn test_unknown_entry_is_error() {
        let mock = Arc::new(MockTransport::new());
        mock.on("http://m", 200, table_body());
        let estimator = FeeEstimator::new(mock.clone(), SubmitConfig::for_testing());

        let err = estimator
            .estimate_fee(&sc_txn("lock"), &miners(3), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::UnknownFee { name, .. } if name == "lock"));
    }

    #[tokio::test]
    async fn test_table_cached() {
        let mock = Arc::new(MockTransport::new());
        mock.on("http://m", 200, table_body());
        let estimator = FeeEstimator::new(mock.clone(), SubmitConfig::for_testing());
        let pool = miners(3);

        for _ in 0..3 {
            estimator
                .estimate_fee(&sc_txn("update_settings"), &pool, &CancellationToken::new())
                .await
                .unwrap();
        }
        assert_eq!(mock.call_count(FEES_TABLE_PATH), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_table_refetched_after_ttl() {
        let mock = Arc::new(MockTransport::new());
        mock.on("http://m", 200, table_body());
        let estimator = FeeEstimator::new(mock.clone(), SubmitConfig::for_testing());
        let pool = miners(1);

        estimator
            .estimate_fee(&sc_txn("update_settings"), &pool, &CancellationToken::new())
            .await
            .unwrap();
        tokio::time::advance(SubmitConfig::default().fees_cache_ttl).await;
        estimator
            .estimate_fee(&sc_txn("update_settings"), &pool, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(mock.call_count(FEES_TABLE_PATH), 2);
    }

    #[tokio::test]
    async fn test_majority_table_wins() {
        let mock = Arc::new(MockTransport::new());
        mock.on("http://m1/", 200, json!({"transfer": {"transfer": 99}}).to_string());
        mock.on("http://m2/", 200, table_body());
        mock.on("http://m3/", 200, table_body());
        let estimator = FeeEstimator::new(mock.clone(), SubmitConfig::for_testing());

        let table = estimator
            .get_fees_table(&miners(3), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(table["transfer"]["transfer"], 10);
    }

    #[tokio::test]
    async fn test_all_miners_down() {
        let mock = Arc::new(MockTransport::new());
        let estimator = FeeEstimator::new(mock.clone(), SubmitConfig::for_testing());

        let err = estimator
            .get_fees_table(&miners(2), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::FeesTable(_)));
    }
}
