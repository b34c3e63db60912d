//! # Validation Rules
//!
//! Pure checks over sharder answers. A failed check discards the answer; it
//! never aborts the verification on its own.

use shared_types::{Block, BlockHeader, BlockResponse, Confirmation, Transaction};

use super::VerifyError;

/// Sharder endpoint serving transaction confirmations.
pub const CONFIRMATION_PATH: &str = "/v1/transaction/get/confirmation";

/// Sharder endpoint serving blocks by round.
pub const BLOCK_PATH: &str = "/v1/block/get";

/// Check a confirmation for `hash`, returning the confirmed transaction.
///
/// In order: transaction hash, recomputed block hash, transaction Merkle
/// proof (leaf `hash`), receipt Merkle proof (leaf `txn_output_hash`).
pub fn validate_confirmation<'a>(
    confirmation: &'a Confirmation,
    hash: &str,
) -> Result<&'a Transaction, VerifyError> {
    let txn = confirmation
        .txn
        .as_ref()
        .ok_or_else(|| VerifyError::Malformed("missing txn".to_string()))?;
    if txn.hash != hash {
        return Err(VerifyError::HashMismatch {
            expected: hash.to_string(),
            actual: txn.hash.clone(),
        });
    }

    if !confirmation.header().has_valid_hash() {
        return Err(VerifyError::InvalidBlockHash);
    }

    let path = confirmation
        .merkle_tree_path
        .as_ref()
        .ok_or(VerifyError::InvalidMerklePath)?;
    if !path.verify(hash, &confirmation.merkle_tree_root) {
        return Err(VerifyError::InvalidMerklePath);
    }

    let receipt_path = confirmation
        .receipt_merkle_tree_path
        .as_ref()
        .ok_or(VerifyError::InvalidMerklePath)?;
    if !receipt_path.verify(&txn.output_hash, &confirmation.receipt_merkle_tree_root) {
        return Err(VerifyError::InvalidMerklePath);
    }

    Ok(txn)
}

/// Check that `block` directly follows `tail` and hashes correctly.
pub fn validate_block(block: &BlockHeader, tail: &BlockHeader) -> Result<(), VerifyError> {
    if !block.extends(tail) {
        return Err(VerifyError::WrongBlock(format!(
            "round {} ({}) does not extend round {} ({})",
            block.round, block.prev_hash, tail.round, tail.hash
        )));
    }
    if !block.has_valid_hash() {
        return Err(VerifyError::InvalidBlockHash);
    }
    Ok(())
}

/// Header from a `/v1/block/get` body, wrapped or bare.
pub fn parse_block_header(body: &str) -> Option<BlockHeader> {
    if let Some(header) = serde_json::from_str::<BlockResponse>(body)
        .ok()
        .and_then(BlockResponse::into_header)
    {
        return Some(header);
    }
    serde_json::from_str::<Block>(body)
        .ok()
        .filter(|b| !b.hash.is_empty())
        .map(|b| b.header())
}
