//! # SDK Runtime
//!
//! Entry point of the SDK. Turns an [`SdkConfig`] into a ready
//! [`SdkContext`] and keeps it in step with the network.
//!
//! ## Bootstrap
//!
//! ```text
//! SdkConfig ──validate──→ GET <block_worker>/network ──→ NodeHolder (K)
//!                                                   └──→ stable miners
//!                                                   └──→ NonceCache ← sharder nonce source
//! ```
//!
//! `K = min(|sharders|, max(sharder_consensus, 3))`. Every hour the directory
//! is fetched again; a changed miner or sharder set replaces the pool, the
//! stable miners and the nonce source in one write.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sdk_runtime::{init_logging, LogConfig, SdkConfig, SdkContext, TransactionExecutor};
//!
//! init_logging(&LogConfig::from_env())?;
//! let mut config = SdkConfig::new("https://bw.example/dns", SignatureScheme::Ed25519);
//! config.apply_env_overrides();
//! let ctx = SdkContext::init(config, signer).await?;
//! let _refresh = ctx.spawn_network_refresh(cancel.clone());
//! let execution = TransactionExecutor::new(ctx).execute(txn, &cancel).await?;
//!
//! // elsewhere; SdkError::NotInitialized before init
//! let ctx = SdkContext::current()?;
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! sdk-runtime/
//! ├── config.rs        # SdkConfig, SignatureScheme, env overrides
//! ├── telemetry.rs     # tracing-subscriber setup
//! ├── context.rs       # SdkContext, network refresh
//! ├── adapters/        # sharder-backed NonceSource
//! └── application/     # TransactionExecutor
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod context;
pub mod telemetry;

// Re-exports
pub use adapters::ShardersNonceSource;
pub use application::{Execution, TransactionExecutor};
pub use config::{ConfigError, SdkConfig, SignatureScheme, DEFAULT_SHARDER_CONSENSUS};
pub use context::{NetworkState, SdkContext, NETWORK_PATH};
pub use telemetry::{init_logging, LogConfig, TelemetryError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
