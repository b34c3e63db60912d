//! # Shared Types Crate
//!
//! Wire entities exchanged with the network and the error type surfaced to
//! SDK callers.
//!
//! ## Design Principles
//!
//! - **Bit-compatible JSON**: field names match what miners and sharders
//!   emit, including the aliases sharders use in confirmation envelopes.
//! - **Hashes are recomputed, never trusted**: `Transaction::compute_hash`
//!   and `BlockHeader::recompute_hash` are the only way a hash is produced.
//! - **Unknown fields survive**: a transaction keeps fields it does not know
//!   about, so re-serialising a sharder reply loses nothing.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entities;
pub mod errors;
pub mod responses;

pub use entities::*;
pub use errors::*;
pub use responses::*;
