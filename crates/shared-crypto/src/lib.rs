//! # Shared Crypto - System Hash, Merkle Paths, Signing
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA3-256, SHA-1 | Transaction/block hashes, tally digests |
//! | `merkle` | Binary Merkle path | Transaction and receipt inclusion proofs |
//! | `signatures` | Ed25519 | Default `Signer` capability |
//!
//! All network-facing hashes are lowercase hex strings of SHA3-256 applied to
//! ASCII `:`-joined preimages. SHA-1 is used only to cluster identical sharder
//! replies and never leaves the process.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod merkle;
pub mod signatures;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{hash, sha1_digest, sha3_256};
pub use merkle::{verify_merkle_path, MerkleTree};
pub use signatures::{verify_ed25519, Ed25519Signer, Signer};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
