//! # End-to-End Scenarios
//!
//! Balance reads, optimistic verification, stale nonces and status
//! tie-breaks, each driven through an `SdkContext` built from a mock
//! block worker.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;
    use shared_crypto::hash;
    use shared_types::Transaction;
    use tokio_util::sync::CancellationToken;
    use zs_01_transport::{MockReply, MockTransport};
    use zs_04_consensus_query::ShardersQueryApi;
    use zs_05_txn_submit::TransactionSubmitApi;
    use zs_06_txn_verify::{OptimisticVerifier, TransactionVerifier, VerifierConfig, VerifyError};

    use crate::integration::fixtures::{config, context, urls, ChainFixture};

    // =========================================================================
    // BALANCE READS
    // =========================================================================

    #[tokio::test]
    async fn test_balance_read_happy_path() {
        let mock = Arc::new(MockTransport::new());
        let body = json!({"txn": "t9", "round": 500, "balance": 100, "nonce": 7}).to_string();
        for url in urls("s", 3) {
            mock.on(format!("{url}/v1/client/get/balance"), 200, body.clone());
        }
        mock.on("http://s4/v1/client/get/balance", 502, "bad gateway");
        let ctx = context(&mock, 2, 4, config(4)).await;

        let balance = ctx
            .sharders_client()
            .get_balance("alice", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(balance.balance, 100);
        assert_eq!(balance.nonce, 7);
        // fresh weight 1, then one failure at position 2
        assert_eq!(ctx.sharders().weight("http://s4"), Some(-1));
        assert_eq!(ctx.sharders().weight("http://s1"), Some(3));
        assert_eq!(ctx.sharders().healthy().last().map(String::as_str), Some("http://s4"));
    }

    #[tokio::test]
    async fn test_balance_read_missing_client() {
        let mock = Arc::new(MockTransport::new());
        mock.on("http://s", 400, r#"{"error":"value not present"}"#);
        let ctx = context(&mock, 2, 4, config(4)).await;

        let balance = ctx
            .sharders_client()
            .get_balance("newcomer", &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(balance.balance, 0);
        assert_eq!(balance.nonce, 0);
    }

    // =========================================================================
    // OPTIMISTIC VERIFICATION
    // =========================================================================

    #[tokio::test]
    async fn test_optimistic_verify_success() {
        let h = hash("scenario-3");
        let chain = ChainFixture::for_hash(&h, 100, 2);

        let mock = Arc::new(MockTransport::new());
        mock.on(
            "http://s1/v1/transaction/get/confirmation",
            200,
            chain.confirmation_body(),
        );
        mock.on("http://s2/v1/transaction", 400, r#"{"error":"not found"}"#);
        mock.on("http://s3/v1/transaction", 400, r#"{"error":"not found"}"#);
        mock.on(
            "http://s2/v1/block/get?round=101",
            200,
            chain.block_body(101).unwrap(),
        );
        mock.on(
            "http://s3/v1/block/get?round=102",
            200,
            chain.block_body(102).unwrap(),
        );
        let ctx = context(&mock, 1, 3, config(3)).await;

        let verifier = OptimisticVerifier::new(
            ctx.transport().clone(),
            ctx.sharders().all(),
            VerifierConfig {
                min_confirmation: 100,
                ..ctx.config().verifier_config()
            },
        );
        let proof = verifier
            .verify_with_proof(&h, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(proof.txn, chain.txn);
        assert_eq!(proof.confirmed_by, "http://s1");
        assert_eq!(proof.extended_by, urls("s", 3)[1..].to_vec());
        assert!(proof.remaining_pool.is_empty());
        assert_eq!(
            proof.chain.iter().map(|b| b.round).collect::<Vec<_>>(),
            vec![100, 101, 102]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_optimistic_verify_rejects_forged_confirmation() {
        let h = hash("scenario-4");
        let forged = ChainFixture::for_hash(&hash("somebody-else"), 100, 0);

        let mock = Arc::new(MockTransport::new());
        mock.on(
            "http://s1/v1/transaction/get/confirmation",
            200,
            forged.confirmation_body(),
        );
        let ctx = context(&mock, 1, 3, config(3)).await;

        let verifier = OptimisticVerifier::new(
            ctx.transport().clone(),
            ctx.sharders().all(),
            VerifierConfig {
                min_confirmation: 100,
                retry_interval: Duration::from_secs(1),
                ..ctx.config().verifier_config()
            },
        );
        let started = tokio::time::Instant::now();
        let err = verifier
            .verify(&h, &CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(err, VerifyError::NotFound(h.clone()));
        assert_eq!(mock.call_count("http://s1/v1/transaction"), 30);
        assert!(started.elapsed() >= Duration::from_secs(29));
        assert_eq!(mock.call_count("/v1/block/get"), 0);
    }

    // =========================================================================
    // NONCES
    // =========================================================================

    #[tokio::test]
    async fn test_submit_with_stale_nonce_evicts() {
        let mock = Arc::new(MockTransport::new());
        mock.on("http://s", 200, r#"{"balance":10,"nonce":41}"#);
        mock.on_post(
            "http://m",
            400,
            r#"{"error":"invalid transaction nonce: expected 45"}"#,
        );
        let ctx = context(&mock, 2, 3, config(3)).await;

        let mut txn = Transaction::new("alice", "bob", 1, "");
        txn.fee = 1;
        let err = ctx
            .submitter()
            .submit_to(&mut txn, &ctx.stable_miners(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(txn.nonce, 42);
        assert!(err.is_invalid_nonce());
        assert_eq!(ctx.nonces().peek("alice").await, None);
        assert_eq!(mock.call_count("/v1/client/get/balance"), 3);

        assert_eq!(ctx.nonces().next_nonce("alice").await, 42);
        assert_eq!(mock.call_count("/v1/client/get/balance"), 6);
    }

    #[tokio::test]
    async fn test_unreachable_sharders_start_nonce_at_one() {
        let mock = Arc::new(MockTransport::new());
        let ctx = context(&mock, 1, 3, config(3)).await;
        assert_eq!(ctx.nonces().next_nonce("alice").await, 1);
        assert_eq!(ctx.nonces().next_nonce("alice").await, 2);
    }

    // =========================================================================
    // TALLY
    // =========================================================================

    #[tokio::test]
    async fn test_status_tie_break_prefers_success() {
        let stats = r#"{"current_round":900,"latest_finalized_round":898}"#;
        let mock = Arc::new(MockTransport::new());
        mock.on("http://s1/", 200, stats);
        mock.on("http://s2/", 500, r#"{"error":"internal"}"#);
        mock.on("http://s3/", 200, stats);
        mock.on("http://s4/", 500, r#"{"error":"internal"}"#);
        let ctx = context(&mock, 1, 4, config(4)).await;

        let chain_stats = ctx
            .sharders_client()
            .get_chain_stats(&CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(chain_stats.current_round, 900);
        assert_eq!(chain_stats.latest_finalized_round, 898);
    }

    #[tokio::test]
    async fn test_single_sharder_network() {
        let mock = Arc::new(MockTransport::new());
        mock.on("http://s1/v1/current-round", 200, "1234");
        let ctx = context(&mock, 1, 1, config(1)).await;
        assert_eq!(ctx.sharders().consensus(), 1);

        let round = ctx
            .sharders_client()
            .get_current_round(&CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(round, 1234);
    }

    #[tokio::test]
    async fn test_failed_sharder_leaves_healthy_view() {
        let mock = Arc::new(MockTransport::new());
        let body = json!({"balance": 5, "nonce": 1}).to_string();
        for url in urls("s", 5) {
            mock.on(format!("{url}/"), 200, body.clone());
        }
        mock.on_sequence(
            "http://s4/",
            vec![
                MockReply::respond(503, "busy"),
                MockReply::respond(200, body.clone()),
            ],
        );
        let ctx = context(&mock, 1, 5, config(4)).await;
        let client = ctx.sharders_client();

        for _ in 0..3 {
            client
                .get_balance("alice", &CancellationToken::new())
                .await
                .unwrap();
        }

        // s5 took the vacated slot and kept it
        assert_eq!(mock.call_count("http://s4/"), 1);
        assert_eq!(mock.call_count("http://s5/"), 2);
        assert!(!ctx.sharders().healthy().contains(&"http://s4".to_string()));
    }
}
