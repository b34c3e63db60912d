//! Nonce lookups served by sharder consensus.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use zs_03_nonce_cache::{NonceError, NonceSource};
use zs_04_consensus_query::{ShardersClient, ShardersQueryApi};

/// Reads `balance.nonce` through a [`ShardersClient`].
pub struct ShardersNonceSource {
    client: ShardersClient,
}

impl ShardersNonceSource {
    /// Source over `client`'s sharder pool.
    pub fn new(client: ShardersClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NonceSource for ShardersNonceSource {
    async fn fetch_nonce(&self, client_id: &str) -> Result<i64, NonceError> {
        self.client
            .get_nonce(client_id, &CancellationToken::new())
            .await
            .map_err(|e| NonceError::LookupFailed {
                client_id: client_id.to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use zs_01_transport::MockTransport;
    use zs_02_node_health::NodeHolder;
    use zs_04_consensus_query::QueryConfig;

    fn source(mock: &Arc<MockTransport>) -> ShardersNonceSource {
        let sharders: Vec<String> = (1..=3).map(|i| format!("http://s{i}")).collect();
        let holder = Arc::new(NodeHolder::new(sharders, 3).unwrap());
        ShardersNonceSource::new(ShardersClient::new(
            mock.clone(),
            holder,
            QueryConfig::for_testing(),
        ))
    }

    #[tokio::test]
    async fn test_nonce_from_balance() {
        let mock = Arc::new(MockTransport::new());
        mock.on(
            "http://s",
            200,
            r#"{"txn":"t","round":9,"balance":100,"nonce":12}"#,
        );
        assert_eq!(source(&mock).fetch_nonce("alice").await, Ok(12));
    }

    #[tokio::test]
    async fn test_unreachable_sharders_fail_lookup() {
        let mock = Arc::new(MockTransport::new());
        let err = source(&mock).fetch_nonce("alice").await.unwrap_err();
        assert!(matches!(err, NonceError::LookupFailed { client_id, .. } if client_id == "alice"));
    }
}
