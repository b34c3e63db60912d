//! # Environment Proxy
//!
//! Proxy settings from `HTTP_PROXY`, `HTTPS_PROXY` and `NO_PROXY` (upper or
//! lower case), turned into `reqwest` proxies. Loopback hosts always go direct.

use std::env;

use reqwest::{NoProxy, Proxy};

use crate::domain::TransportError;

/// Hosts that never go through a proxy.
pub const LOOPBACK_NO_PROXY: &str = "localhost,127.0.0.1,::1";

/// Proxy settings read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvProxy {
    http: Option<String>,
    https: Option<String>,
    no_proxy: Option<String>,
}

fn env_value(name: &str) -> Option<String> {
    env::var(name)
        .or_else(|_| env::var(name.to_ascii_lowercase()))
        .ok()
        .filter(|v| !v.trim().is_empty())
}

impl EnvProxy {
    /// Build from explicit values.
    pub fn new(http: Option<&str>, https: Option<&str>, no_proxy: Option<&str>) -> Self {
        Self {
            http: http.map(str::to_string),
            https: https.map(str::to_string),
            no_proxy: no_proxy.map(str::to_string),
        }
    }

    /// Read the process environment.
    pub fn from_env() -> Self {
        Self {
            http: env_value("HTTP_PROXY"),
            https: env_value("HTTPS_PROXY"),
            no_proxy: env_value("NO_PROXY"),
        }
    }

    /// Any proxy configured at all.
    pub fn is_configured(&self) -> bool {
        self.http.is_some() || self.https.is_some()
    }

    /// `NO_PROXY` entries plus the loopback hosts.
    pub fn no_proxy_list(&self) -> String {
        match self.no_proxy.as_deref().map(str::trim) {
            Some(list) if !list.is_empty() => format!("{list},{LOOPBACK_NO_PROXY}"),
            _ => LOOPBACK_NO_PROXY.to_string(),
        }
    }

    /// Proxies to install on the client, in match order.
    ///
    /// Without an `HTTPS_PROXY`, https traffic uses the http proxy.
    pub fn proxies(&self) -> Result<Vec<Proxy>, TransportError> {
        let build = |e: reqwest::Error| TransportError::Build(format!("proxy: {e}"));
        let no_proxy = || NoProxy::from_string(&self.no_proxy_list());

        let mut proxies = Vec::with_capacity(2);
        if let Some(https) = &self.https {
            proxies.push(Proxy::https(https.as_str()).map_err(build)?.no_proxy(no_proxy()));
        }
        if let Some(http) = &self.http {
            let proxy = if self.https.is_some() {
                Proxy::http(http.as_str())
            } else {
                Proxy::all(http.as_str())
            };
            proxies.push(proxy.map_err(build)?.no_proxy(no_proxy()));
        }
        Ok(proxies)
    }
}
