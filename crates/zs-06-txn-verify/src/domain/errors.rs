//! # Error Types

use shared_types::SdkError;
use thiserror::Error;

/// Verification errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// No sharder produced a valid confirmation in time.
    #[error("Transaction {0} not found")]
    NotFound(String),

    /// Confirmation carries a different transaction.
    #[error("Confirmation is for {actual}, expected {expected}")]
    HashMismatch {
        /// Hash asked for.
        expected: String,
        /// Hash returned.
        actual: String,
    },

    /// Confirmation lacks its transaction or proofs.
    #[error("Malformed confirmation: {0}")]
    Malformed(String),

    /// A Merkle proof did not verify.
    #[error("Invalid merkle path")]
    InvalidMerklePath,

    /// A recomputed block hash differs from the reported one.
    #[error("Invalid block hash")]
    InvalidBlockHash,

    /// Block does not extend the chain tail.
    #[error("Wrong block: {0}")]
    WrongBlock(String),

    /// Sharders ran out before the chain reached the required length.
    #[error("Blockchain might be stuck")]
    BlockchainStuck,

    /// Trusted mode could not gather enough signed confirmations.
    #[error("Too few confirmations: {got} of {required}")]
    TooFewConfirmations {
        /// Successful answers.
        got: usize,
        /// Required answers.
        required: usize,
    },

    /// Included with a failure status.
    #[error("Transaction failed (status {status}): {output}")]
    TransactionFailed {
        /// On-chain status.
        status: i32,
        /// Output reported by the network.
        output: String,
    },

    /// Caller cancelled.
    #[error("Verification cancelled")]
    Cancelled,
}

impl VerifyError {
    /// Terminal errors stop the outer retry loop.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            VerifyError::NotFound(_) | VerifyError::TransactionFailed { .. } | VerifyError::Cancelled
        )
    }
}

impl From<VerifyError> for SdkError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::NotFound(hash) => SdkError::NotFound(hash),
            VerifyError::InvalidMerklePath => SdkError::InvalidMerklePath,
            VerifyError::InvalidBlockHash => SdkError::InvalidBlockHash,
            VerifyError::WrongBlock(msg) => SdkError::WrongBlock(msg),
            VerifyError::BlockchainStuck => SdkError::BlockchainStuck,
            VerifyError::TransactionFailed { status, output } => {
                SdkError::TransactionFailed { status, output }
            }
            VerifyError::Cancelled => SdkError::Cancelled,
            other @ (VerifyError::HashMismatch { .. }
            | VerifyError::Malformed(_)
            | VerifyError::TooFewConfirmations { .. }) => {
                SdkError::ConsensusFailed(other.to_string())
            }
        }
    }
}
