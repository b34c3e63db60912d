//! # Nonce Cache Service

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::Mutex;

use crate::ports::NonceSource;

/// Thread-safe `client_id -> last allocated nonce` map.
pub struct NonceCache {
    /// Held across the first-touch lookup.
    cache: Mutex<HashMap<String, i64>>,
    source: RwLock<Arc<dyn NonceSource>>,
}

impl NonceCache {
    /// Cache backed by `source`.
    pub fn new(source: Arc<dyn NonceSource>) -> Self {
        Self {
            cache: Mutex::new(HashMap::new()),
            source: RwLock::new(source),
        }
    }

    /// Allocate the next nonce for `client_id`.
    ///
    /// An unknown client is seeded from the source first; a failed lookup
    /// seeds 0 so the first allocation is 1.
    pub async fn next_nonce(&self, client_id: &str) -> i64 {
        let mut cache = self.cache.lock().await;

        if !cache.contains_key(client_id) {
            let source = Arc::clone(&*self.source.read());
            let seed = match source.fetch_nonce(client_id).await {
                Ok(nonce) => nonce,
                Err(e) => {
                    tracing::warn!("[zs-03] seeding nonce for {} with 0: {}", client_id, e);
                    0
                }
            };
            tracing::debug!("[zs-03] seeded nonce for {} at {}", client_id, seed);
            cache.insert(client_id.to_string(), seed);
        }

        let entry = cache.entry(client_id.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// Overwrite the entry for `client_id`.
    pub async fn set(&self, client_id: &str, nonce: i64) {
        self.cache.lock().await.insert(client_id.to_string(), nonce);
    }

    /// Drop the entry so the next allocation re-reads the chain.
    pub async fn evict(&self, client_id: &str) {
        if self.cache.lock().await.remove(client_id).is_some() {
            tracing::debug!("[zs-03] evicted nonce for {}", client_id);
        }
    }

    /// Last allocated nonce, without allocating.
    pub async fn peek(&self, client_id: &str) -> Option<i64> {
        self.cache.lock().await.get(client_id).copied()
    }

    /// Read nonces from a different source from now on.
    pub fn repoint(&self, source: Arc<dyn NonceSource>) {
        *self.source.write() = source;
    }
}
