//! # Reqwest Transport
//!
//! Production `HttpTransport` backed by one pooled `reqwest::Client`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use tokio_util::sync::CancellationToken;

use super::proxy::EnvProxy;
use crate::config::TransportConfig;
use crate::domain::{HttpResponse, TransportError};
use crate::ports::HttpTransport;

/// Pooled HTTP client.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a client with proxy settings from the environment.
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        Self::with_proxy(config, EnvProxy::from_env())
    }

    /// Build a client with explicit proxy settings.
    pub fn with_proxy(config: &TransportConfig, proxy: EnvProxy) -> Result<Self, TransportError> {
        let mut builder = Client::builder()
            .connect_timeout(config.connect_timeout())
            .tcp_keepalive(config.keep_alive)
            .pool_max_idle_per_host(config.max_idle_per_host)
            .pool_idle_timeout(config.idle_timeout)
            .user_agent(config.user_agent.clone());

        let proxies = proxy.proxies()?;
        if proxies.is_empty() {
            builder = builder.no_proxy();
        } else {
            tracing::debug!(
                bypass = %proxy.no_proxy_list(),
                "[zs-01] using proxy settings from environment"
            );
            for p in proxies {
                builder = builder.proxy(p);
            }
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;
        Ok(Self { client })
    }

    async fn execute(
        &self,
        request: RequestBuilder,
        url: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        let exchange = async {
            let response = request
                .timeout(timeout)
                .send()
                .await
                .map_err(|e| map_error(url, e))?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(|e| map_error(url, e))?;
            Ok(HttpResponse::new(url, status, body))
        };

        tokio::select! {
            _ = cancel.cancelled() => Err(TransportError::Cancelled),
            result = exchange => result,
        }
    }
}

fn map_error(url: &str, err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
        }
    } else if err.is_body() || err.is_decode() {
        TransportError::Body {
            url: url.to_string(),
            reason: err.to_string(),
        }
    } else if err.is_builder() {
        TransportError::InvalidUrl(url.to_string())
    } else {
        TransportError::Connect {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        let request = self.client.get(url);
        self.execute(request, url, timeout, cancel).await
    }

    async fn post_json(
        &self,
        url: &str,
        body: &str,
        timeout: Duration,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        let request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json; charset=utf-8")
            .header("Access-Control-Allow-Origin", "*")
            .body(body.to_string());
        self.execute(request, url, timeout, cancel).await
    }
}
