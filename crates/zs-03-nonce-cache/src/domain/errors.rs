//! # Domain Errors

use thiserror::Error;

/// Failure to read a client's on-chain nonce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NonceError {
    /// Sharders did not produce an answer.
    #[error("Nonce lookup failed for {client_id}: {reason}")]
    LookupFailed {
        /// Client queried
        client_id: String,
        /// Underlying cause
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_failed_message() {
        let err = NonceError::LookupFailed {
            client_id: "c1".into(),
            reason: "consensus".into(),
        };
        assert!(err.to_string().contains("c1"));
    }
}
