//! # Node Holder
//!
//! Pool of node URLs kept sorted by descending weight.
//!
//! ## Re-ranking
//!
//! On every outcome the node is removed, its weight recomputed, and it is
//! re-inserted at the lowest index `i` with `weight(list[i]) < new_weight`.
//! Nodes of equal weight keep their relative order.

use std::collections::HashMap;

use parking_lot::Mutex;
use rand::seq::SliceRandom;

use crate::domain::{HealthError, NodeStats};

#[derive(Debug)]
struct HolderState {
    order: Vec<String>,
    stats: HashMap<String, NodeStats>,
}

impl HolderState {
    fn weight(&self, url: &str) -> i64 {
        self.stats.get(url).map_or(0, NodeStats::weight)
    }
}

/// Weighted, health-ranked node pool with a healthy view of size K.
#[derive(Debug)]
pub struct NodeHolder {
    consensus: usize,
    inner: Mutex<HolderState>,
}

impl NodeHolder {
    /// Build a pool. Fails if fewer than `consensus` distinct URLs are given.
    pub fn new(urls: Vec<String>, consensus: usize) -> Result<Self, HealthError> {
        if consensus == 0 {
            return Err(HealthError::ZeroConsensus);
        }

        let mut order = Vec::with_capacity(urls.len());
        let mut stats = HashMap::with_capacity(urls.len());
        for url in urls {
            if stats.insert(url.clone(), NodeStats::default()).is_none() {
                order.push(url);
            }
        }

        if order.len() < consensus {
            return Err(HealthError::InsufficientNodes {
                nodes: order.len(),
                consensus,
            });
        }

        Ok(Self {
            consensus,
            inner: Mutex::new(HolderState { order, stats }),
        })
    }

    /// Record a successful request to `url`.
    pub fn success(&self, url: &str) {
        self.adjust(url, true);
    }

    /// Record a failed request to `url`.
    pub fn fail(&self, url: &str) {
        self.adjust(url, false);
    }

    fn adjust(&self, url: &str, success: bool) {
        let mut state = self.inner.lock();

        let new_weight = match state.stats.get_mut(url) {
            Some(stats) => {
                stats.record(success);
                stats.weight()
            }
            None => {
                tracing::debug!("[zs-02] outcome for unknown node {} ignored", url);
                return;
            }
        };

        if let Some(pos) = state.order.iter().position(|u| u == url) {
            let node = state.order.remove(pos);
            let insert_at = state
                .order
                .iter()
                .position(|u| state.weight(u) < new_weight)
                .unwrap_or(state.order.len());
            state.order.insert(insert_at, node);
        }
    }

    /// First K nodes by weight.
    pub fn healthy(&self) -> Vec<String> {
        let state = self.inner.lock();
        state.order.iter().take(self.consensus).cloned().collect()
    }

    /// `n` nodes drawn at random from the healthy view (all of it if `n`
    /// exceeds K).
    pub fn random_healthy(&self, n: usize) -> Vec<String> {
        let mut healthy = self.healthy();
        healthy.shuffle(&mut rand::thread_rng());
        healthy.truncate(n);
        healthy
    }

    /// Every node, best first.
    pub fn all(&self) -> Vec<String> {
        self.inner.lock().order.clone()
    }

    /// Healthy-view size K.
    pub fn consensus(&self) -> usize {
        self.consensus
    }

    /// Total nodes N.
    pub fn len(&self) -> usize {
        self.inner.lock().order.len()
    }

    /// Never true for a constructed holder.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().order.is_empty()
    }

    /// Current weight of `url`.
    pub fn weight(&self, url: &str) -> Option<i64> {
        self.inner.lock().stats.get(url).map(NodeStats::weight)
    }
}
