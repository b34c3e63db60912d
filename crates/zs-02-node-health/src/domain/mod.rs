//! # Domain Layer

pub mod errors;
pub mod node_stats;

pub use errors::HealthError;
pub use node_stats::{NodeStats, STAT_SIZE};
