//! # Outbound Ports
//!
//! The transport every fan-out in the SDK goes through.

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::{HttpResponse, TransportError};

/// HTTP transport - outbound port.
///
/// Implementations return `Ok` for every completed exchange, including
/// non-2xx statuses. `Err` means no status was obtained.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// GET `url` within `timeout`, abandoning the request if `cancel` fires.
    async fn get(
        &self,
        url: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError>;

    /// POST a JSON `body` to `url`.
    async fn post_json(
        &self,
        url: &str,
        body: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError>;
}
