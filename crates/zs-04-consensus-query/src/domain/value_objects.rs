//! # Value Objects

/// Fixed quorum: refuse answers fewer than 25 % of K agree on.
pub const CONSENSUS_THRESHOLD_PERCENT: usize = 25;

/// Error string sharders return for a client that has no state yet.
pub const VALUE_NOT_PRESENT: &str = "value not present";

/// Storage smart contract.
pub const STORAGE_SC_ADDRESS: &str =
    "6dba10422e368813802877a85039d3985d96760ed844092319743fb3a76712d7";
/// Faucet smart contract.
pub const FAUCET_SC_ADDRESS: &str =
    "6dba10422e368813802877a85039d3985d96760ed844092319743fb3a76712d3";
/// Miner smart contract.
pub const MINER_SC_ADDRESS: &str =
    "6dba10422e368813802877a85039d3985d96760ed844092319743fb3a76712d9";
/// Bridge smart contract.
pub const ZCNSC_SC_ADDRESS: &str =
    "6dba10422e368813802877a85039d3985d96760ed844092319743fb3a76712e0";

/// One sharder's answer in a fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharderResponse {
    /// Sharder base URL.
    pub sharder: String,
    /// Full request URL.
    pub url: String,
    /// HTTP status; `None` when the request failed before a status arrived.
    pub status: Option<u16>,
    /// Raw body, or the transport error text.
    pub body: String,
}

impl SharderResponse {
    /// 200 with a body.
    pub fn is_ok(&self) -> bool {
        self.status == Some(200)
    }
}
