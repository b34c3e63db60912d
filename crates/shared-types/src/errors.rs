//! # Error Types
//!
//! The tagged error every public SDK operation returns. Component crates keep
//! their own error enums and convert into this one at their boundary.

use thiserror::Error;

/// Errors surfaced to SDK callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdkError {
    /// Dial, timeout or DNS failure.
    #[error("Network unreachable: {0}")]
    NetworkUnreachable(String),

    /// Non-2xx status or unparseable body.
    #[error("Bad response (status {status}): {body}")]
    BadResponse {
        /// HTTP status, 0 when the body could not be parsed.
        status: u16,
        /// Raw body or the server's error message.
        body: String,
    },

    /// Not enough sharders agreed.
    #[error("Consensus failed: {0}")]
    ConsensusFailed(String),

    /// A Merkle inclusion proof did not verify.
    #[error("Invalid merkle path")]
    InvalidMerklePath,

    /// A recomputed block hash differs from the reported one.
    #[error("Invalid block hash")]
    InvalidBlockHash,

    /// A block does not extend the expected tail.
    #[error("Wrong block: {0}")]
    WrongBlock(String),

    /// Sharder pool exhausted before the confirmation chain was complete.
    #[error("Blockchain might be stuck")]
    BlockchainStuck,

    /// All sharders agree the record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// No miner accepted the transaction.
    #[error("Submit failed: {0}")]
    SubmitFailed(String),

    /// The transaction was included with a failure status.
    #[error("Transaction failed (status {status}): {output}")]
    TransactionFailed {
        /// On-chain status code.
        status: i32,
        /// Transaction output reported by the network.
        output: String,
    },

    /// The signer could not sign the transaction hash.
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// The operation was cancelled by the caller.
    #[error("Operation cancelled")]
    Cancelled,

    /// SDK used before `init`.
    #[error("SDK not initialized")]
    NotInitialized,

    /// Configuration rejected by validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON encode/decode failure on a locally built value.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SdkError {
    /// Whether a caller may retry the operation.
    ///
    /// `NotFound` after all verifier retries is terminal, as are usage and
    /// on-chain failures. Everything else is transient.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            SdkError::NotFound(_)
                | SdkError::TransactionFailed { .. }
                | SdkError::NotInitialized
                | SdkError::InvalidConfig(_)
                | SdkError::SigningFailed(_)
                | SdkError::Cancelled
        )
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::Serialization(err.to_string())
    }
}

impl From<shared_crypto::CryptoError> for SdkError {
    fn from(err: shared_crypto::CryptoError) -> Self {
        SdkError::SigningFailed(err.to_string())
    }
}
