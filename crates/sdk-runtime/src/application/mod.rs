//! # Application Layer

pub mod executor;

pub use executor::{Execution, TransactionExecutor};
