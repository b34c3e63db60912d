//! # Domain Layer

pub mod errors;
pub mod phase;
pub mod validation;

pub use errors::VerifyError;
pub use phase::VerifyPhase;
pub use validation::{
    parse_block_header, validate_block, validate_confirmation, BLOCK_PATH, CONFIRMATION_PATH,
};
