//! # ZS-06 Transaction Verify
//!
//! Decide whether a submitted transaction made it on chain without trusting
//! any single sharder.
//!
//! **Subsystem ID:** 06  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Optimistic verification
//!
//! ```text
//! INIT ──valid confirmation──→ CONFIRMED ──→ EXTENDING ──L blocks──→ ACCEPTED
//!   │                                           │
//!   └── 30 attempts, nothing valid → NotFound   └── pool empty → BlockchainStuck
//! ```
//!
//! A confirmation is only accepted when the transaction hash, the recomputed
//! block hash and both Merkle proofs check out. Each block of the extension
//! chain must come from a different sharder than the ones before it.
//!
//! ## Trusted verification
//!
//! Ask `C + 1` sharders and accept once at least `C` of them, and more than
//! half of those asked, return a signed transaction.
//!
//! ## Module Structure
//!
//! ```text
//! zs-06-txn-verify/
//! ├── domain/          # validation rules, VerifyPhase, VerifyError
//! ├── ports/           # TransactionVerifier (inbound)
//! ├── application/     # OptimisticVerifier, TrustedVerifier, VerificationService
//! └── config.rs        # VerifierConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use application::{OptimisticProof, OptimisticVerifier, TrustedVerifier, VerificationService};
pub use config::VerifierConfig;
pub use domain::{
    validate_block, validate_confirmation, VerifyError, VerifyPhase, BLOCK_PATH,
    CONFIRMATION_PATH,
};
pub use ports::TransactionVerifier;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
