//! # Ports Layer
//!
//! - Outbound: `NonceSource`
//! - `StaticNonceSource`: fixed nonces for tests (`test-utils`)

pub mod outbound;
#[cfg(any(test, feature = "test-utils"))]
pub mod static_source;

pub use outbound::NonceSource;
#[cfg(any(test, feature = "test-utils"))]
pub use static_source::StaticNonceSource;
