//! # Transaction Executor
//!
//! Fee, submit, confirm. The end-to-end path a wallet call takes.

use std::sync::Arc;

use shared_types::{SdkError, Transaction};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use zs_05_txn_submit::{SubmitError, SubmitReceipt, TransactionSubmitApi};

use crate::context::SdkContext;

/// Outcome of an executed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// Miner that accepted the submission.
    pub receipt: SubmitReceipt,
    /// Transaction as confirmed by the sharders.
    pub confirmed: Transaction,
}

/// Runs transactions against the network held by an [`SdkContext`].
pub struct TransactionExecutor {
    ctx: Arc<SdkContext>,
}

impl TransactionExecutor {
    /// Executor over `ctx`.
    pub fn new(ctx: Arc<SdkContext>) -> Self {
        Self { ctx }
    }

    /// Submit `txn` to the stable miners and wait for its confirmation.
    ///
    /// A zero fee is replaced by the miners' fee table entry. A submission
    /// rejected for its nonce is retried once with a nonce re-read from the
    /// chain.
    pub async fn execute(
        &self,
        mut txn: Transaction,
        cancel: &CancellationToken,
    ) -> Result<Execution, SdkError> {
        if txn.chain_id.is_empty() {
            txn.chain_id = self.ctx.config().chain_id.clone();
        }
        if txn.fee == 0 {
            let miners = self.ctx.stable_miners();
            txn.fee = self
                .ctx
                .submitter()
                .estimate_fee(&txn, &miners, cancel)
                .await?;
            debug!(fee = txn.fee, "[sdk] fee estimated");
        }

        let receipt = match self.submit(&mut txn, cancel).await {
            Ok(receipt) => receipt,
            Err(err) if err.is_invalid_nonce() => {
                warn!("[sdk] nonce {} rejected, retrying with a fresh one", txn.nonce);
                txn.nonce = 0;
                txn.hash.clear();
                txn.signature.clear();
                self.submit(&mut txn, cancel).await?
            }
            Err(err) => return Err(err.into()),
        };
        info!(hash = %receipt.hash, miner = %receipt.miner, "[sdk] transaction submitted");

        let confirmed = self
            .ctx
            .verification_service()
            .confirm(&receipt.hash, cancel)
            .await?;
        Ok(Execution { receipt, confirmed })
    }

    async fn submit(
        &self,
        txn: &mut Transaction,
        cancel: &CancellationToken,
    ) -> Result<SubmitReceipt, SubmitError> {
        let miners = self.ctx.stable_miners();
        let result = self.ctx.submitter().submit_to(txn, &miners, cancel).await;
        if result.is_err() {
            self.ctx.reset_stable_miners();
        }
        result
    }
}
