//! # Trusted Verifier
//!
//! Counts sharders that return a signed record of the transaction. No block
//! or Merkle checks are made, so it is only as strong as the sharder majority.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use rand::seq::SliceRandom;
use shared_types::{Confirmation, Transaction};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use zs_01_transport::HttpTransport;
use zs_05_txn_submit::sample_size;

use super::fetch_ok;
use crate::config::VerifierConfig;
use crate::domain::{VerifyError, VerifyPhase, CONFIRMATION_PATH};
use crate::ports::TransactionVerifier;

/// Majority-of-sharders verifier.
pub struct TrustedVerifier {
    transport: Arc<dyn HttpTransport>,
    sharders: Vec<String>,
    config: VerifierConfig,
}

impl TrustedVerifier {
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

    async fn ask(
        &self,
        sharder: &str,
        hash: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Transaction>, VerifyError> {
        let Some(body) = fetch_ok(
            self.transport.as_ref(),
            sharder,
            CONFIRMATION_PATH,
            &[("hash", hash)],
            self.config.request_timeout,
            cancel,
        )
        .await?
        else {
            return Ok(None);
        };

        let txn = Confirmation::from_body(&body)
            .ok()
            .and_then(|c| c.txn)
            .filter(|t| t.hash == hash && !t.signature.is_empty());
        if txn.is_none() {
            debug!("[zs-06] {} has no signed record of {}", sharder, hash);
        }
        Ok(txn)
    }
}

#[async_trait]
impl TransactionVerifier for TrustedVerifier {
    async fn verify(
        &self,
        hash: &str,
        cancel: &CancellationToken,
    ) -> Result<Transaction, VerifyError> {
        let total = self.sharders.len();
        if total == 0 {
            return Err(VerifyError::TooFewConfirmations {
                got: 0,
                required: 1,
            });
        }

        let required = sample_size(self.config.min_confirmation, total);
        let mut order = self.sharders.clone();
        order.shuffle(&mut rand::thread_rng());

        let initial = (required + 1).min(total);
        debug!(phase = %VerifyPhase::Init, hash, asked = initial, required, "[zs-06] trusted verification");

        let answers = join_all(
            order[..initial]
                .iter()
                .map(|sharder| self.ask(sharder, hash, cancel)),
        )
        .await;

        let mut confirmed = None;
        let mut success = 0usize;
        for answer in answers {
            if let Some(txn) = answer? {
                success += 1;
                confirmed.get_or_insert(txn);
            }
        }

        let mut queried = initial;
        loop {
            if success >= required && success * 2 > queried {
                if let Some(txn) = confirmed.take() {
                    info!(phase = %VerifyPhase::Accepted, hash, success, queried, "[zs-06] transaction accepted");
                    return Ok(txn);
                }
            }
            let Some(next) = order.get(queried) else {
                break;
            };
            queried += 1;
            if let Some(txn) = self.ask(next, hash, cancel).await? {
                success += 1;
                confirmed.get_or_insert(txn);
            }
        }

        warn!(phase = %VerifyPhase::Rejected, hash, success, queried, "[zs-06] not enough sharders hold the transaction");
        Err(VerifyError::TooFewConfirmations {
            got: success,
            required,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use zs_01_transport::MockTransport;

    const HASH: &str = "abc123";

    fn sharders(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("http://s{i}")).collect()
    }

    fn record(signature: &str) -> String {
        json!({"txn": {"hash": HASH, "signature": signature, "transaction_status": 1}}).to_string()
    }

    fn verifier(mock: &Arc<MockTransport>, n: usize, min_confirmation: usize) -> TrustedVerifier {
        TrustedVerifier::new(
            mock.clone(),
            sharders(n),
            VerifierConfig {
                min_confirmation,
                verify_optimistic: false,
                ..VerifierConfig::for_testing()
            },
        )
    }

    #[tokio::test]
    async fn test_majority_of_signed_records_accepts() {
        let mock = Arc::new(MockTransport::new());
        mock.on("http://s", 200, record("sig"));

        let txn = verifier(&mock, 4, 50)
            .verify(HASH, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(txn.hash, HASH);
        // 50 % of 4 plus one
        assert_eq!(mock.call_count(CONFIRMATION_PATH), 3);
    }

    #[tokio::test]
    async fn test_unsigned_records_do_not_count() {
        let mock = Arc::new(MockTransport::new());
        mock.on("http://s", 200, record(""));

        let err = verifier(&mock, 4, 50)
            .verify(HASH, &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            VerifyError::TooFewConfirmations {
                got: 0,
                required: 2
            }
        );
        assert_eq!(mock.call_count(CONFIRMATION_PATH), 4);
    }

    #[tokio::test]
    async fn test_extra_sharders_asked_until_majority() {
        let mock = Arc::new(MockTransport::new());
        mock.on("http://s1/", 200, record("sig"));
        mock.on("http://s2/", 200, record("sig"));
        mock.on("http://s3/", 200, record("sig"));
        mock.on("http://s4/", 404, "{}");

        // 3 of 4 hold the record: whatever the order, a majority is reachable
        let txn = verifier(&mock, 4, 50)
            .verify(HASH, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(txn.signature, "sig");
    }

    #[tokio::test]
    async fn test_wrong_hash_ignored() {
        let mock = Arc::new(MockTransport::new());
        mock.on(
            "http://s",
            200,
            json!({"txn": {"hash": "other", "signature": "sig"}}).to_string(),
        );
        let err = verifier(&mock, 2, 50)
            .verify(HASH, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, VerifyError::TooFewConfirmations { got: 0, .. }));
    }

    #[tokio::test]
    async fn test_empty_pool() {
        let mock = Arc::new(MockTransport::new());
        let err = verifier(&mock, 0, 50)
            .verify(HASH, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, VerifyError::TooFewConfirmations { got: 0, .. }));
    }
}
