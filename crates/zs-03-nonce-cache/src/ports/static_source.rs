//! # Static Nonce Source
//!
//! Fixed nonces for tests (`test-utils`).

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::outbound::NonceSource;
use crate::domain::NonceError;

/// Fixed nonces.
#[derive(Debug, Default)]
pub struct StaticNonceSource {
    nonces: Mutex<HashMap<String, i64>>,
    failing: AtomicBool,
    lookups: AtomicUsize,
}

impl StaticNonceSource {
    /// Source that answers 0 for unknown clients.
    pub fn new() -> Self {
        Self::default()
    }

    /// Source whose lookups always fail.
    pub fn failing() -> Self {
        let source = Self::default();
        source.failing.store(true, Ordering::SeqCst);
        source
    }

    /// Set the on-chain nonce of `client_id`.
    pub fn set(&self, client_id: &str, nonce: i64) {
        self.nonces.lock().insert(client_id.to_string(), nonce);
    }

    /// Lookups served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NonceSource for StaticNonceSource {
    async fn fetch_nonce(&self, client_id: &str) -> Result<i64, NonceError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(NonceError::LookupFailed {
                client_id: client_id.to_string(),
                reason: "static source configured to fail".to_string(),
            });
        }
        Ok(self.nonces.lock().get(client_id).copied().unwrap_or(0))
    }
}
