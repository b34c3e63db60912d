//! # Optimistic Verifier
//!
//! One cryptographically valid confirmation plus a chain of blocks on top of
//! it, each block served by a sharder that has not contributed before.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use rand::seq::SliceRandom;
use shared_types::{BlockHeader, Confirmation, ConfirmationEnvelope, Transaction};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use zs_01_transport::HttpTransport;
use zs_05_txn_submit::sample_size;

use super::{fetch_ok, pause};
use crate::config::VerifierConfig;
use crate::domain::{
    parse_block_header, validate_block, validate_confirmation, VerifyError, VerifyPhase,
    BLOCK_PATH, CONFIRMATION_PATH,
};
use crate::ports::TransactionVerifier;

/// Everything an accepted optimistic verification established.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimisticProof {
    /// Confirmed transaction.
    pub txn: Transaction,
    /// Sharder whose confirmation was accepted.
    pub confirmed_by: String,
    /// Confirming block followed by the extension blocks.
    pub chain: Vec<BlockHeader>,
    /// Sharders that served the extension blocks, in order.
    pub extended_by: Vec<String>,
    /// Sharders never used for the chain.
    pub remaining_pool: Vec<String>,
}

/// Confirmation-chain verifier over a fixed sharder list.
pub struct OptimisticVerifier {
    transport: Arc<dyn HttpTransport>,
    sharders: Vec<String>,
    config: VerifierConfig,
}

impl OptimisticVerifier {
    /// Create a verifier.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        sharders: Vec<String>,
        config: VerifierConfig,
    ) -> Self {
        Self {
            transport,
            sharders,
            config,
        }
    }

    /// Verify `hash`, returning the full proof.
    pub async fn verify_with_proof(
        &self,
        hash: &str,
        cancel: &CancellationToken,
    ) -> Result<OptimisticProof, VerifyError> {
        if self.sharders.is_empty() {
            return Err(VerifyError::BlockchainStuck);
        }

        let count = sample_size(self.config.min_confirmation, self.sharders.len());
        let chosen: Vec<String> = self
            .sharders
            .choose_multiple(&mut rand::thread_rng(), count)
            .cloned()
            .collect();
        debug!(phase = %VerifyPhase::Init, hash, asked = count, "[zs-06] polling for confirmation");

        let retries = self.config.confirmation_retries.max(1);
        for attempt in 1..=retries {
            if let Some((sharder, confirmation, txn)) =
                self.poll_confirmation(&chosen, hash, cancel).await?
            {
                info!(
                    phase = %VerifyPhase::Confirmed,
                    hash,
                    round = confirmation.round,
                    attempt,
                    "[zs-06] confirmation from {}",
                    sharder
                );
                let pool: Vec<String> = self
                    .sharders
                    .iter()
                    .filter(|s| **s != sharder)
                    .cloned()
                    .collect();

                let (chain, extended_by, remaining_pool) =
                    match self.extend(confirmation.header(), pool, cancel).await {
                        Ok(result) => result,
                        Err(err) => {
                            warn!(phase = %VerifyPhase::Rejected, hash, "[zs-06] {}", err);
                            return Err(err);
                        }
                    };
                info!(phase = %VerifyPhase::Accepted, hash, "[zs-06] transaction accepted");
                return Ok(OptimisticProof {
                    txn,
                    confirmed_by: sharder,
                    chain,
                    extended_by,
                    remaining_pool,
                });
            }
            if attempt < retries {
                pause(self.config.retry_interval, cancel).await?;
            }
        }

        warn!(phase = %VerifyPhase::Rejected, hash, retries, "[zs-06] no valid confirmation");
        Err(VerifyError::NotFound(hash.to_string()))
    }

    async fn poll_confirmation(
        &self,
        chosen: &[String],
        hash: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<(String, Confirmation, Transaction)>, VerifyError> {
        let params = [("hash", hash)];
        let mut pending: FuturesUnordered<_> = chosen
            .iter()
            .map(|sharder| {
                let params = &params;
                async move {
                    let body = fetch_ok(
                        self.transport.as_ref(),
                        sharder,
                        CONFIRMATION_PATH,
                        params,
                        self.config.request_timeout,
                        cancel,
                    )
                    .await;
                    (sharder, body)
                }
            })
            .collect();

        while let Some((sharder, body)) = pending.next().await {
            let Some(body) = body? else {
                continue;
            };
            let envelope = match ConfirmationEnvelope::from_body(&body) {
                Ok(envelope) => envelope,
                Err(err) => {
                    debug!("[zs-06] unparseable confirmation from {}: {}", sharder, err);
                    continue;
                }
            };
            if let Some(lfb) = &envelope.latest_finalized_block {
                debug!("[zs-06] {} finalized up to round {}", sharder, lfb.round);
            }
            let confirmation = envelope.confirmation.unwrap_or_default();
            match validate_confirmation(&confirmation, hash) {
                Ok(txn) => {
                    let txn = txn.clone();
                    return Ok(Some((sharder.clone(), confirmation, txn)));
                }
                Err(err) => warn!("[zs-06] ignoring confirmation from {}: {}", sharder, err),
            }
        }
        Ok(None)
    }

    async fn extend(
        &self,
        confirmed: BlockHeader,
        mut pool: Vec<String>,
        cancel: &CancellationToken,
    ) -> Result<(Vec<BlockHeader>, Vec<String>, Vec<String>), VerifyError> {
        let length = self.config.confirmation_chain_length.max(1);
        let mut chain = vec![confirmed];
        let mut extended_by = Vec::new();

        while chain.len() < length {
            if pool.is_empty() {
                return Err(VerifyError::BlockchainStuck);
            }
            pool.shuffle(&mut rand::thread_rng());

            let tail = chain[chain.len() - 1].clone();
            let round = (tail.round + 1).to_string();
            debug!(phase = %VerifyPhase::Extending, round = %round, candidates = pool.len(), "[zs-06] fetching next block");

            let mut found = None;
            for (index, sharder) in pool.iter().enumerate() {
                let Some(body) = fetch_ok(
                    self.transport.as_ref(),
                    sharder,
                    BLOCK_PATH,
                    &[("round", &round), ("content", "header")],
                    self.config.request_timeout,
                    cancel,
                )
                .await?
                else {
                    continue;
                };
                let Some(header) = parse_block_header(&body) else {
                    continue;
                };
                match validate_block(&header, &tail) {
                    Ok(()) => {
                        found = Some((index, header));
                        break;
                    }
                    Err(err) => warn!("[zs-06] block from {} rejected: {}", sharder, err),
                }
            }

            match found {
                Some((index, header)) => {
                    extended_by.push(pool.remove(index));
                    chain.push(header);
                }
                None => return Err(VerifyError::BlockchainStuck),
            }
        }

        Ok((chain, extended_by, pool))
    }
}

#[async_trait]
impl TransactionVerifier for OptimisticVerifier {
    async fn verify(
        &self,
        hash: &str,
        cancel: &CancellationToken,
    ) -> Result<Transaction, VerifyError> {
        Ok(self.verify_with_proof(hash, cancel).await?.txn)
    }
}
