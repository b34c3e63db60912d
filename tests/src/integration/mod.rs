//! # Integration Tests
//!
//! Cross-crate flows exercised through the public SDK surface.

#[cfg(test)]
pub mod fixtures;
pub mod lifecycle;
pub mod scenarios;
