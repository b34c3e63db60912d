//! # Adapters Layer
//!
//! - `ReqwestTransport`: production client
//! - `EnvProxy`: reqwest proxies from the environment, loopback bypassed
//! - `MockTransport`: canned responses for tests (`test-utils`)

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod proxy;
pub mod reqwest_client;

#[cfg(any(test, feature = "test-utils"))]
pub use mock::{MockReply, MockTransport, RecordedCall};
pub use proxy::EnvProxy;
pub use reqwest_client::ReqwestTransport;
