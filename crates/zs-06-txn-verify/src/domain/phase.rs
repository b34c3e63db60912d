//! # Verification Phases

use std::fmt;

/// Where an optimistic verification currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyPhase {
    /// Polling for a confirmation.
    Init,
    /// A valid confirmation was found.
    Confirmed,
    /// Collecting blocks on top of the confirming block.
    Extending,
    /// Chain complete; transaction accepted.
    Accepted,
    /// Gave up.
    Rejected,
}

impl fmt::Display for VerifyPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VerifyPhase::Init => "init",
            VerifyPhase::Confirmed => "confirmed",
            VerifyPhase::Extending => "extending",
            VerifyPhase::Accepted => "accepted",
            VerifyPhase::Rejected => "rejected",
        };
        f.write_str(name)
    }
}
