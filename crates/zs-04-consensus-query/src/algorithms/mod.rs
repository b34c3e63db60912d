//! # Algorithms
//!
//! Reductions over answers gathered from many nodes.

pub mod median;
pub mod node_identity;
pub mod plurality;

pub use median::lower_median;
pub use node_identity::parse_whoami;
pub use plurality::Plurality;
