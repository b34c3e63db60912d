//! # Application Layer

pub mod optimistic;
pub mod service;
pub mod trusted;

pub use optimistic::{OptimisticProof, OptimisticVerifier};
pub use service::VerificationService;
pub use trusted::TrustedVerifier;

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;
use zs_01_transport::{build_url, HttpTransport, TransportError};

use crate::domain::VerifyError;

/// Body of a 200 answer; `None` for any other status or a failed request.
pub(crate) async fn fetch_ok(
    transport: &dyn HttpTransport,
    base: &str,
    path: &str,
    params: &[(&str, &str)],
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<Option<String>, VerifyError> {
    let url = match build_url(base, path, params) {
        Ok(url) => url,
        Err(err) => {
            debug!("[zs-06] skipping {}: {}", base, err);
            return Ok(None);
        }
    };
    match transport.get(&url, timeout, cancel).await {
        Ok(resp) if resp.status == 200 => Ok(Some(resp.body)),
        Ok(resp) => {
            debug!(status = resp.status, "[zs-06] {} answered without data", url);
            Ok(None)
        }
        Err(TransportError::Cancelled) => Err(VerifyError::Cancelled),
        Err(err) => {
            debug!("[zs-06] {} unreachable: {}", url, err);
            Ok(None)
        }
    }
}

pub(crate) async fn pause(duration: Duration, cancel: &CancellationToken) -> Result<(), VerifyError> {
    tokio::select! {
        _ = cancel.cancelled() => Err(VerifyError::Cancelled),
        _ = tokio::time::sleep(duration) => Ok(()),
    }
}
