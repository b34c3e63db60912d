//! # Domain Layer

pub mod errors;
pub mod value_objects;

pub use errors::SubmitError;
pub use value_objects::{SubmitReceipt, FEES_TABLE_PATH, TXN_SUBMIT_PATH};
