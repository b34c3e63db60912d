//! # Domain Errors

use thiserror::Error;

/// Node health errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HealthError {
    /// Fewer nodes than the requested healthy-view size.
    #[error("Not enough nodes for consensus: {nodes} < {consensus}")]
    InsufficientNodes {
        /// Nodes supplied
        nodes: usize,
        /// Requested healthy-view size
        consensus: usize,
    },

    /// Healthy-view size of zero.
    #[error("Consensus count must be at least 1")]
    ZeroConsensus,
}
