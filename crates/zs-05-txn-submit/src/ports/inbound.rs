//! # Inbound Ports (Driving Ports)

use async_trait::async_trait;
use shared_types::Transaction;
use tokio_util::sync::CancellationToken;

use crate::domain::{SubmitError, SubmitReceipt};

/// Primary API of the transaction submitter.
#[async_trait]
pub trait TransactionSubmitApi: Send + Sync {
    /// Assign a nonce, sign, and post to a random share of `pool`.
    ///
    /// On any error the sender's cached nonce is evicted.
    async fn submit(
        &self,
        txn: &mut Transaction,
        pool: &[String],
        cancel: &CancellationToken,
    ) -> Result<SubmitReceipt, SubmitError>;

    /// Same as [`submit`](Self::submit) but posts to exactly `miners`.
    async fn submit_to(
        &self,
        txn: &mut Transaction,
        miners: &[String],
        cancel: &CancellationToken,
    ) -> Result<SubmitReceipt, SubmitError>;

    /// Fee the miners charge for `txn`.
    async fn estimate_fee(
        &self,
        txn: &Transaction,
        miners: &[String],
        cancel: &CancellationToken,
    ) -> Result<u64, SubmitError>;
}
