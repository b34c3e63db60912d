//! # Transaction Submitter
//!
//! Every POST of one submission runs concurrently. The first 2xx answer is
//! returned and the remaining POSTs are left to finish in the background;
//! miners dedupe by hash so duplicates are harmless.

use std::sync::Arc;

use async_trait::async_trait;
use shared_crypto::Signer;
use shared_types::Transaction;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use zs_01_transport::{build_url, HttpResponse, HttpTransport, TransportError};
use zs_03_nonce_cache::NonceCache;

use super::fees::FeeEstimator;
use crate::algorithms::select_miners;
use crate::config::SubmitConfig;
use crate::domain::value_objects::INVALID_NONCE_MARKER;
use crate::domain::{SubmitError, SubmitReceipt, TXN_SUBMIT_PATH};
use crate::ports::TransactionSubmitApi;

/// Signs transactions and posts them to miners.
pub struct TransactionSubmitter {
    transport: Arc<dyn HttpTransport>,
    nonces: Arc<NonceCache>,
    signer: Arc<dyn Signer>,
    fees: FeeEstimator,
    config: SubmitConfig,
}

impl TransactionSubmitter {
    /// Create a submitter.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        nonces: Arc<NonceCache>,
        signer: Arc<dyn Signer>,
        config: SubmitConfig,
    ) -> Self {
        let fees = FeeEstimator::new(Arc::clone(&transport), config.clone());
        Self {
            transport,
            nonces,
            signer,
            fees,
            config,
        }
    }

    /// Nonce cache used for allocation.
    pub fn nonces(&self) -> &Arc<NonceCache> {
        &self.nonces
    }

    /// Fee estimator sharing this submitter's transport.
    pub fn fees(&self) -> &FeeEstimator {
        &self.fees
    }

    /// Assign the nonce and sign if needed. Assigning a nonce always
    /// re-signs.
    pub async fn prepare(&self, txn: &mut Transaction) -> Result<(), SubmitError> {
        if txn.nonce < 1 {
            txn.nonce = self.nonces.next_nonce(&txn.client_id).await;
            // a fresh nonce invalidates any earlier hash and signature
            txn.hash.clear();
            txn.signature.clear();
        } else {
            self.nonces.set(&txn.client_id, txn.nonce).await;
        }

        if !txn.is_signed() {
            if txn.public_key.is_empty() {
                txn.public_key = self.signer.public_key();
            }
            txn.compute_hash();
            txn.signature = self.signer.sign(&txn.hash).await?;
        }
        Ok(())
    }

    /// POST an already prepared `txn` to every miner in `miners`.
    pub async fn broadcast(
        &self,
        txn: &Transaction,
        miners: &[String],
        cancel: &CancellationToken,
    ) -> Result<SubmitReceipt, SubmitError> {
        if miners.is_empty() {
            return Err(SubmitError::NoMiners);
        }
        let body =
            serde_json::to_string(txn).map_err(|e| SubmitError::Serialization(e.to_string()))?;

        let (tx, mut rx) = mpsc::channel(miners.len());
        for miner in miners {
            let url = match build_url(miner, TXN_SUBMIT_PATH, &[]) {
                Ok(url) => url,
                Err(err) => {
                    let _ = tx.send((miner.clone(), Err(err))).await;
                    continue;
                }
            };
            let transport = Arc::clone(&self.transport);
            let body = body.clone();
            let tx = tx.clone();
            let cancel = cancel.clone();
            let timeout = self.config.request_timeout;
            let miner = miner.clone();

            tokio::spawn(async move {
                let result = transport.post_json(&url, &body, timeout, &cancel).await;
                let _ = tx.send((miner, result)).await;
            });
        }
        drop(tx);

        let mut failures = 0usize;
        let mut last_reason = String::new();
        let mut nonce_rejected = None;

        while let Some((miner, result)) = rx.recv().await {
            match result {
                Ok(resp) if resp.is_success() => {
                    info!(hash = %txn.hash, "[zs-05] transaction accepted by {}", miner);
                    return Ok(SubmitReceipt {
                        miner,
                        hash: txn.hash.clone(),
                        status: resp.status,
                        body: resp.body,
                    });
                }
                Ok(resp) => {
                    failures += 1;
                    let reason = rejection_reason(&resp);
                    warn!(status = resp.status, "[zs-05] {} rejected transaction: {}", miner, reason);
                    if reason.contains(INVALID_NONCE_MARKER) {
                        nonce_rejected = Some(reason.clone());
                    }
                    last_reason = reason;
                }
                Err(TransportError::Cancelled) => return Err(SubmitError::Cancelled),
                Err(err) => {
                    failures += 1;
                    warn!("[zs-05] posting to {} failed: {}", miner, err);
                    last_reason = err.to_string();
                }
            }
        }

        debug!(failures, "[zs-05] no miner accepted {}", txn.hash);
        match nonce_rejected {
            Some(reason) => Err(SubmitError::InvalidNonce {
                nonce: txn.nonce,
                reason,
            }),
            None => Err(SubmitError::Rejected {
                attempted: failures,
                reason: last_reason,
            }),
        }
    }
}

fn rejection_reason(resp: &HttpResponse) -> String {
    resp.error_message()
        .unwrap_or_else(|| format!("status {}: {}", resp.status, resp.body.trim()))
}

#[async_trait]
impl TransactionSubmitApi for TransactionSubmitter {
    async fn submit(
        &self,
        txn: &mut Transaction,
        pool: &[String],
        cancel: &CancellationToken,
    ) -> Result<SubmitReceipt, SubmitError> {
        let miners = select_miners(pool, self.config.min_submit);
        self.submit_to(txn, &miners, cancel).await
    }

    async fn submit_to(
        &self,
        txn: &mut Transaction,
        miners: &[String],
        cancel: &CancellationToken,
    ) -> Result<SubmitReceipt, SubmitError> {
        let result = match self.prepare(txn).await {
            Ok(()) => self.broadcast(txn, miners, cancel).await,
            Err(err) => Err(err),
        };
        if let Err(err) = &result {
            debug!("[zs-05] evicting nonce of {} after: {}", txn.client_id, err);
            self.nonces.evict(&txn.client_id).await;
        }
        result
    }

    async fn estimate_fee(
        &self,
        txn: &Transaction,
        miners: &[String],
        cancel: &CancellationToken,
    ) -> Result<u64, SubmitError> {
        self.fees.estimate_fee(txn, miners, cancel).await
    }
}
