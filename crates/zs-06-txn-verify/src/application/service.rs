//! # Verification Service
//!
//! Outer confirmation loop around a [`TransactionVerifier`]. Gives the
//! network `query_sleep_time` to include the transaction, then retries
//! transient failures up to `max_txn_query` times.

use std::sync::Arc;

use shared_types::{Transaction, TxnStatus};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use zs_01_transport::HttpTransport;

use super::{pause, OptimisticVerifier, TrustedVerifier};
use crate::config::VerifierConfig;
use crate::domain::VerifyError;
use crate::ports::TransactionVerifier;

/// Confirms transactions and maps their on-chain status.
pub struct VerificationService {
    verifier: Arc<dyn TransactionVerifier>,
    config: VerifierConfig,
}

impl VerificationService {
    /// Wrap an existing verifier.
    pub fn new(verifier: Arc<dyn TransactionVerifier>, config: VerifierConfig) -> Self {
        Self { verifier, config }
    }

    /// Optimistic or trusted verifier over `sharders`, per `verify_optimistic`.
    pub fn for_sharders(
        transport: Arc<dyn HttpTransport>,
        sharders: Vec<String>,
        config: VerifierConfig,
    ) -> Self {
        let verifier: Arc<dyn TransactionVerifier> = if config.verify_optimistic {
            Arc::new(OptimisticVerifier::new(transport, sharders, config.clone()))
        } else {
            Arc::new(TrustedVerifier::new(transport, sharders, config.clone()))
        };
        Self::new(verifier, config)
    }

    /// Wait for `hash` to be confirmed and check that it executed.
    pub async fn confirm(
        &self,
        hash: &str,
        cancel: &CancellationToken,
    ) -> Result<Transaction, VerifyError> {
        pause(self.config.query_sleep_time, cancel).await?;

        let attempts = self.config.max_txn_query.max(1);
        let mut last = VerifyError::NotFound(hash.to_string());
        for attempt in 1..=attempts {
            match self.verifier.verify(hash, cancel).await {
                Ok(txn) => return check_status(txn),
                Err(err) if err.is_terminal() => return Err(err),
                Err(err) => {
                    warn!(attempt, attempts, hash, "[zs-06] verification failed: {}", err);
                    last = err;
                }
            }
            if attempt < attempts {
                pause(self.config.query_sleep_time, cancel).await?;
            }
        }
        Err(last)
    }
}

fn check_status(txn: Transaction) -> Result<Transaction, VerifyError> {
    match txn.txn_status() {
        TxnStatus::ChargeableError | TxnStatus::Failure => Err(VerifyError::TransactionFailed {
            status: txn.status,
            output: txn.transaction_output,
        }),
        TxnStatus::Success | TxnStatus::Unknown => {
            info!(hash = %txn.hash, status = txn.status, "[zs-06] transaction confirmed");
            Ok(txn)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Replays scripted outcomes and counts calls.
    struct Scripted {
        outcomes: Mutex<VecDeque<Result<Transaction, VerifyError>>>,
        calls: Mutex<usize>,
    }

    impl Scripted {
        fn new(outcomes: Vec<Result<Transaction, VerifyError>>) -> Arc<Self> {
            Arc::new(Self {
                outcomes: Mutex::new(outcomes.into()),
                calls: Mutex::new(0),
            })
        }

        fn calls(&self) -> usize {
            *self.calls.lock()
        }
    }

    #[async_trait]
    impl TransactionVerifier for Scripted {
        async fn verify(
            &self,
            hash: &str,
            _cancel: &CancellationToken,
        ) -> Result<Transaction, VerifyError> {
            *self.calls.lock() += 1;
            self.outcomes
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(VerifyError::NotFound(hash.to_string())))
        }
    }

    fn txn(status: i32) -> Transaction {
        Transaction {
            hash: "h".into(),
            status,
            transaction_output: "out".into(),
            ..Default::default()
        }
    }

    fn service(scripted: &Arc<Scripted>) -> VerificationService {
        VerificationService::new(scripted.clone(), VerifierConfig::for_testing())
    }

    #[tokio::test]
    async fn test_transient_errors_retried() {
        let scripted = Scripted::new(vec![
            Err(VerifyError::BlockchainStuck),
            Err(VerifyError::InvalidBlockHash),
            Ok(txn(1)),
        ]);
        let confirmed = service(&scripted)
            .confirm("h", &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(confirmed.status, 1);
        assert_eq!(scripted.calls(), 3);
    }

    #[tokio::test]
    async fn test_not_found_is_terminal() {
        let scripted = Scripted::new(vec![Err(VerifyError::NotFound("h".into())), Ok(txn(1))]);
        let err = service(&scripted)
            .confirm("h", &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err, VerifyError::NotFound("h".into()));
        assert_eq!(scripted.calls(), 1);
    }

    #[tokio::test]
    async fn test_attempts_bounded() {
        let scripted = Scripted::new(vec![Err(VerifyError::BlockchainStuck); 10]);
        let err = service(&scripted)
            .confirm("h", &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err, VerifyError::BlockchainStuck);
        assert_eq!(scripted.calls(), VerifierConfig::for_testing().max_txn_query);
    }

    #[tokio::test]
    async fn test_failed_status_mapped() {
        for status in [2, 3] {
            let scripted = Scripted::new(vec![Ok(txn(status))]);
            let err = service(&scripted)
                .confirm("h", &CancellationToken::new())
                .await
                .unwrap_err();
            assert_eq!(
                err,
                VerifyError::TransactionFailed {
                    status,
                    output: "out".into()
                }
            );
        }
    }

    #[tokio::test]
    async fn test_cancel_during_initial_sleep() {
        let scripted = Scripted::new(vec![Ok(txn(1))]);
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = service(&scripted).confirm("h", &cancel).await.unwrap_err();
        assert_eq!(err, VerifyError::Cancelled);
        assert_eq!(scripted.calls(), 0);
    }

    #[tokio::test]
    async fn test_trusted_mode_selected() {
        let mock = Arc::new(zs_01_transport::MockTransport::new());
        mock.on(
            "http://s",
            200,
            r#"{"txn":{"hash":"h","signature":"sig","transaction_status":1}}"#,
        );
        let config = VerifierConfig {
            verify_optimistic: false,
            ..VerifierConfig::for_testing()
        };
        let sharders = vec!["http://s1".to_string(), "http://s2".to_string()];
        let service = VerificationService::for_sharders(mock.clone(), sharders, config);

        let confirmed = service.confirm("h", &CancellationToken::new()).await.unwrap();
        assert_eq!(confirmed.signature, "sig");
    }
}
