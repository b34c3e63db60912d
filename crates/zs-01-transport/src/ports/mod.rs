//! # Ports Layer
//!
//! - Outbound: `HttpTransport`

pub mod outbound;

pub use outbound::HttpTransport;
