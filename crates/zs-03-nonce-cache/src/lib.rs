//! # ZS-03 Nonce Cache
//!
//! Per-client, strictly increasing transaction nonce allocation.
//!
//! **Subsystem ID:** 03  
//! **Architecture:** Hexagonal (Ports/Application)
//!
//! ## Lifecycle of an entry
//!
//! | Event | Effect |
//! |-------|--------|
//! | first `next_nonce` | seeded from the on-chain nonce (0 on any error), then +1 |
//! | `next_nonce` | +1 |
//! | `set` | overwritten |
//! | `evict` | removed; the next allocation re-reads the chain |
//!
//! One lock covers the map and the first-touch lookup, so concurrent first
//! callers for a client see a single seed.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod application;
pub mod domain;
pub mod ports;

// Re-exports
pub use application::NonceCache;
pub use domain::NonceError;
pub use ports::NonceSource;
#[cfg(any(test, feature = "test-utils"))]
pub use ports::StaticNonceSource;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
