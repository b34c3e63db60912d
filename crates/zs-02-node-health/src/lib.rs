//! # ZS-02 Node Health
//!
//! Weighted, health-ranked pool of sharder endpoints.
//!
//! **Subsystem ID:** 02  
//! **Architecture:** Hexagonal (DDD)
//!
//! ## Purpose
//!
//! Every outbound sharder request reports success or failure here. Each
//! sharder keeps its last 20 outcomes as `+1`/`-1`; its weight is
//! `Σ i·s[i]` so recent outcomes dominate. The pool stays sorted by weight
//! and the first K entries form the *healthy view* used as fan-out target.
//!
//! ## Module Structure
//!
//! ```text
//! zs-02-node-health/
//! ├── domain/          # NodeStats sample ring, errors
//! └── algorithms/      # NodeHolder ordered pool
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod domain;

// Re-exports
pub use algorithms::NodeHolder;
pub use domain::{HealthError, NodeStats, STAT_SIZE};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
