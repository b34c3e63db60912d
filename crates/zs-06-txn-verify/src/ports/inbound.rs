//! # Inbound Ports (Driving Ports)

use async_trait::async_trait;
use shared_types::Transaction;
use tokio_util::sync::CancellationToken;

use crate::domain::VerifyError;

/// One verification attempt for a transaction hash.
#[async_trait]
pub trait TransactionVerifier: Send + Sync {
    /// The confirmed transaction, as reported by the network.
    async fn verify(
        &self,
        hash: &str,
        cancel: &CancellationToken,
    ) -> Result<Transaction, VerifyError>;
}
