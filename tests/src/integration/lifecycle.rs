//! # SDK Lifecycle
//!
//! Bootstrap from the block worker, directory refresh, and a transaction
//! taken from submission to optimistic acceptance.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shared_types::{SdkError, Transaction};
    use sdk_runtime::{SdkConfig, TransactionExecutor};
    use tokio_util::sync::CancellationToken;
    use zs_01_transport::{MockReply, MockTransport};

    use crate::integration::fixtures::{config, context, network_body, ChainFixture, BLOCK_WORKER};

    #[tokio::test]
    async fn test_bootstrap_sizes_pools() {
        let mock = Arc::new(MockTransport::new());
        let ctx = context(&mock, 2, 5, SdkConfig::for_testing(BLOCK_WORKER)).await;

        assert_eq!(ctx.sharders().len(), 5);
        assert_eq!(ctx.sharders().consensus(), 3);
        assert_eq!(ctx.sharders().healthy().len(), 3);
        assert_eq!(ctx.stable_miners().len(), 1);
        assert_eq!(ctx.min_sharders_verify(), 3);
        assert_eq!(mock.call_count("/network"), 1);
    }

    #[tokio::test]
    async fn test_consensus_capped_by_pool() {
        let mock = Arc::new(MockTransport::new());
        let ctx = context(&mock, 1, 2, config(7)).await;
        assert_eq!(ctx.sharders().consensus(), 2);
    }

    #[tokio::test]
    async fn test_refresh_replaces_pool_once() {
        let mock = Arc::new(MockTransport::new());
        let ctx = context(&mock, 2, 4, config(3)).await;
        let cancel = CancellationToken::new();

        mock.on(format!("{BLOCK_WORKER}/network"), 200, network_body(3, 2));
        assert!(ctx.refresh_network(&cancel).await.unwrap());
        assert_eq!(ctx.sharders().len(), 2);
        assert_eq!(ctx.sharders().consensus(), 2);
        assert_eq!(ctx.network().miners.len(), 3);

        assert!(!ctx.refresh_network(&cancel).await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_state() {
        let mock = Arc::new(MockTransport::new());
        let ctx = context(&mock, 2, 4, config(3)).await;
        let before = ctx.network();

        mock.on(format!("{BLOCK_WORKER}/network"), 502, "bad gateway");
        let err = ctx
            .refresh_network(&CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, SdkError::BadResponse { status: 502, .. }));
        assert_eq!(ctx.network(), before);
        assert_eq!(ctx.sharders().len(), 4);
    }

    #[tokio::test]
    async fn test_execute_confirms_optimistically() {
        let mock = Arc::new(MockTransport::new());
        let ctx = context(&mock, 2, 3, config(3)).await;
        assert!(ctx.config().verify_optimistic);

        let mut txn = Transaction::new("alice", "bob", 25, "");
        txn.nonce = 8;
        txn.fee = 1;
        let expected = txn.hash_data();

        let chain = ChainFixture::for_hash(&expected, 100, 2);
        let expected_txn = chain.txn.clone();
        mock.on_fn("http://s", move |url| {
            if url.contains("/v1/transaction/get/confirmation") {
                return MockReply::respond(200, chain.confirmation_body());
            }
            match ChainFixture::round_in(url).and_then(|round| chain.block_body(round)) {
                Some(body) => MockReply::respond(200, body),
                None => MockReply::respond(404, r#"{"error":"not found"}"#),
            }
        });
        mock.on_post("http://m", 200, "{}");

        let execution = TransactionExecutor::new(Arc::clone(&ctx))
            .execute(txn, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(execution.receipt.hash, expected);
        assert_eq!(execution.confirmed, expected_txn);
        assert_eq!(mock.call_count("/v1/transaction/put"), 1);
        assert_eq!(mock.call_count("/v1/block/get"), 2);
        assert_eq!(ctx.nonces().peek("alice").await, Some(8));
    }

    #[tokio::test]
    async fn test_execute_reports_failed_transaction() {
        let mock = Arc::new(MockTransport::new());
        let ctx = context(&mock, 1, 3, config(3)).await;

        let mut txn = Transaction::new("alice", "bob", 25, "");
        txn.nonce = 3;
        txn.fee = 1;
        let expected = txn.hash_data();

        let mut chain = ChainFixture::for_hash(&expected, 40, 2);
        if let Some(included) = chain.confirmation.txn.as_mut() {
            included.status = 2;
            included.transaction_output = "insufficient balance".into();
        }
        mock.on_fn("http://s", move |url| {
            if url.contains("/v1/transaction/get/confirmation") {
                return MockReply::respond(200, chain.confirmation_body());
            }
            match ChainFixture::round_in(url).and_then(|round| chain.block_body(round)) {
                Some(body) => MockReply::respond(200, body),
                None => MockReply::respond(404, r#"{"error":"not found"}"#),
            }
        });
        mock.on_post("http://m", 200, "{}");

        let err = TransactionExecutor::new(ctx)
            .execute(txn, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::TransactionFailed { status: 2, .. }));
    }
}
