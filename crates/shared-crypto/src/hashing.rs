//! # System Hashing
//!
//! SHA3-256 is the network-wide hash for transaction hashes, block hashes and
//! Merkle nodes. Values are exchanged as lowercase hex strings, so the helpers
//! here return hex rather than raw bytes.

use sha1::Sha1;
use sha3::{Digest, Sha3_256};

/// Raw SHA3-256 digest (256-bit).
pub type Hash = [u8; 32];

/// SHA3-256 of `data` (one-shot).
pub fn sha3_256(data: &[u8]) -> Hash {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// System hash: hex-encoded SHA3-256 of `data`.
pub fn hash(data: impl AsRef<[u8]>) -> String {
    hex::encode(sha3_256(data.as_ref()))
}

/// Hash of the `:`-joined parts, e.g. `hash_joined(&["a", "b"])` hashes `a:b`.
pub fn hash_joined(parts: &[&str]) -> String {
    hash(parts.join(":"))
}

/// Hex-encoded SHA-1 used to cluster identical sharder replies.
pub fn sha1_digest(data: impl AsRef<[u8]>) -> String {
    let mut hasher = Sha1::new();
    hasher.update(data.as_ref());
    hex::encode(hasher.finalize())
}
