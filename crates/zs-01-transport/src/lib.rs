//! # ZS-01 Transport
//!
//! Low-level HTTP transport shared by every fan-out in the SDK.
//!
//! **Subsystem ID:** 01  
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Purpose
//!
//! One pooled client tuned for talking to many hosts at once:
//! - 3 min dial timeout, 45 s TCP keep-alive, 25 idle connections per host
//! - Proxy taken from `HTTP_PROXY` / `HTTPS_PROXY` / `NO_PROXY`, never for
//!   loopback addresses
//! - Every request carries its own timeout and a cancellation token
//!
//! ## Failure kinds
//!
//! | Kind | Variant |
//! |------|---------|
//! | dial / timeout | `TransportError::Connect`, `TransportError::Timeout` |
//! | non-2xx | surfaced as a normal `HttpResponse`, callers decide |
//! | body | `TransportError::Body` |
//!
//! ## Module Structure
//!
//! ```text
//! zs-01-transport/
//! ├── domain/          # HttpResponse, URL building, errors
//! ├── ports/           # HttpTransport (outbound)
//! ├── adapters/        # reqwest client, env proxy, MockTransport
//! └── config.rs        # TransportConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{EnvProxy, ReqwestTransport};
#[cfg(any(test, feature = "test-utils"))]
pub use adapters::{MockReply, MockTransport, RecordedCall};
pub use config::TransportConfig;
pub use domain::{build_url, HttpMethod, HttpResponse, TransportError};
pub use ports::HttpTransport;

pub use tokio_util::sync::CancellationToken;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
