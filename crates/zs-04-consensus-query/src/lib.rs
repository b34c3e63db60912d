//! # ZS-04 Consensus Query
//!
//! Broadcast a read to many untrusted sharders and distil one answer.
//!
//! **Subsystem ID:** 04  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Algorithm
//!
//! 1. One task per selected sharder (the healthy view, or a random subset)
//! 2. Each task GETs with a per-request timeout, feeds the outcome into the
//!    `NodeHolder` and emits `{url, status, body}` on a channel
//! 3. The caller tallies statuses and canonical body digests
//! 4. `rate = max_count * 100 / K`; below 25 % the query fails
//!
//! ## Tie-break
//!
//! | Situation | Dominant |
//! |-----------|----------|
//! | 200 ties any other status | 200 |
//! | other status strictly ahead of 200 | that status |
//!
//! ## Module Structure
//!
//! ```text
//! zs-04-consensus-query/
//! ├── domain/          # ConsensusTally, canonical digests, SharderResponse
//! ├── algorithms/      # plurality, median, whoami parsing
//! ├── ports/           # ShardersQueryApi (inbound)
//! ├── application/     # ShardersClient
//! └── config.rs        # QueryConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use algorithms::{lower_median, parse_whoami, Plurality};
pub use application::ShardersClient;
pub use config::QueryConfig;
pub use domain::{
    canonical_digest, ConsensusTally, SharderResponse, CONSENSUS_THRESHOLD_PERCENT,
    FAUCET_SC_ADDRESS, MINER_SC_ADDRESS, STORAGE_SC_ADDRESS, VALUE_NOT_PRESENT,
    ZCNSC_SC_ADDRESS,
};
pub use ports::ShardersQueryApi;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
