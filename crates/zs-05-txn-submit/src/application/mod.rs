//! # Application Layer

pub mod fees;
pub mod service;

pub use fees::FeeEstimator;
pub use service::TransactionSubmitter;
