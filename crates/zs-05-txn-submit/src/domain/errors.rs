//! # Error Types

use shared_crypto::CryptoError;
use shared_types::SdkError;
use thiserror::Error;

/// Submission errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The miner pool is empty.
    #[error("No miners available")]
    NoMiners,

    /// Every selected miner refused or was unreachable.
    #[error("Transaction rejected by all {attempted} miners: {reason}")]
    Rejected {
        /// Miners posted to.
        attempted: usize,
        /// Last failure seen.
        reason: String,
    },

    /// A miner rejected the nonce.
    #[error("Invalid transaction nonce {nonce}: {reason}")]
    InvalidNonce {
        /// Nonce that was used.
        nonce: i64,
        /// Miner's message.
        reason: String,
    },

    /// The signer failed.
    #[error("Signing failed: {0}")]
    Signing(#[from] CryptoError),

    /// The transaction could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// No usable fee table could be fetched.
    #[error("Failed to get fees table: {0}")]
    FeesTable(String),

    /// The fee table has no entry for the transaction.
    #[error("No fee for {name} to {to}")]
    UnknownFee {
        /// Lower-cased transaction name.
        name: String,
        /// Recipient address.
        to: String,
    },

    /// Caller cancelled.
    #[error("Submission cancelled")]
    Cancelled,
}

impl SubmitError {
    /// Whether a fresh nonce might make a retry succeed.
    pub fn is_invalid_nonce(&self) -> bool {
        matches!(self, SubmitError::InvalidNonce { .. })
    }
}

impl From<SubmitError> for SdkError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Signing(e) => SdkError::SigningFailed(e.to_string()),
            SubmitError::Serialization(msg) => SdkError::Serialization(msg),
            SubmitError::Cancelled => SdkError::Cancelled,
            other => SdkError::SubmitFailed(other.to_string()),
        }
    }
}
