//! # Value Objects

/// Miner endpoint accepting transactions.
pub const TXN_SUBMIT_PATH: &str = "/v1/transaction/put";

/// Miner endpoint serving the fee table.
pub const FEES_TABLE_PATH: &str = "/v1/fees_table";

/// Miners reject replays and gaps with this text.
pub(crate) const INVALID_NONCE_MARKER: &str = "invalid transaction nonce";

/// The miner that accepted a transaction and what it answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// Accepting miner base URL.
    pub miner: String,
    /// Hash of the submitted transaction.
    pub hash: String,
    /// HTTP status.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}
