//! # Adapters
//!
//! Bridges between component ports.

pub mod nonce_source;

pub use nonce_source::ShardersNonceSource;
