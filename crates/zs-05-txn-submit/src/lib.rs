//! # ZS-05 Transaction Submit
//!
//! Nonce assignment, signing and broadcast of transactions to miners.
//!
//! **Subsystem ID:** 05  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Submission flow
//!
//! ```text
//! Transaction ──→ [nonce from NonceCache] ──→ [hash + sign] ──→ POST to M miners
//!                                                                   │
//!                          first 2xx wins ←─────────────────────────┤
//!                          all fail → evict nonce, SubmitFailed ←───┘
//! ```
//!
//! `M = max(1, ceil(min_submit% * |miners| / 100))`, drawn at random.
//!
//! ## Fees
//!
//! Miners publish a fee table at `/v1/fees_table`. A few random miners are
//! asked, the most common answer wins, and the table is cached for 30 hours.
//!
//! ## Module Structure
//!
//! ```text
//! zs-05-txn-submit/
//! ├── domain/          # SubmitError, SubmitReceipt, endpoint paths
//! ├── algorithms/      # miner sampling
//! ├── ports/           # TransactionSubmitApi (inbound)
//! ├── application/     # TransactionSubmitter, FeeEstimator
//! └── config.rs        # SubmitConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use algorithms::{sample_size, select_miners};
pub use application::{FeeEstimator, TransactionSubmitter};
pub use config::SubmitConfig;
pub use domain::{SubmitError, SubmitReceipt, FEES_TABLE_PATH, TXN_SUBMIT_PATH};
pub use ports::TransactionSubmitApi;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
