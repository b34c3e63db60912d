//! # Outbound Ports

use async_trait::async_trait;

use crate::domain::NonceError;

/// Authoritative nonce lookup - outbound port.
///
/// The production implementation reads the client's balance document
/// through sharder consensus.
#[async_trait]
pub trait NonceSource: Send + Sync {
    /// Last nonce used on chain by `client_id`.
    async fn fetch_nonce(&self, client_id: &str) -> Result<i64, NonceError>;
}
