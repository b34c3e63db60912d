//! # Domain Layer
//!
//! Tally state, canonical digests and well-known addresses.

pub mod canonical;
pub mod tally;
pub mod value_objects;

pub use canonical::{canonical_digest, canonical_json};
pub use tally::ConsensusTally;
pub use value_objects::*;
