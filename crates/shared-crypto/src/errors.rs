//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Hash to be signed is not valid hex
    #[error("Invalid hash encoding: {0}")]
    InvalidHashEncoding(String),

    /// Invalid key length
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Invalid signature format
    #[error("Invalid signature format")]
    InvalidSignatureFormat,

    /// Invalid public key
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Signature scheme not supported by this signer
    #[error("Unsupported signature scheme: {0}")]
    UnsupportedScheme(String),

    /// Remote or external signer failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}
