//! # Inbound Ports (Driving Ports)
//!
//! Reads answered by sharder consensus. Every call fans out to the healthy
//! view (or a random part of it) and refuses answers below the 25 % quorum.

use async_trait::async_trait;
use serde_json::Value;
use shared_types::{Balance, Block, BlockHeader, ChainStats, FeeStats, SdkError};
use tokio_util::sync::CancellationToken;

/// Primary API of the consensus query engine.
#[async_trait]
pub trait ShardersQueryApi: Send + Sync {
    /// GET `/v1/screst/<sc_address><relative_path>` with status consensus.
    ///
    /// ## Errors
    ///
    /// - `ConsensusFailed`: fewer than 25 % of K agree on a status
    /// - `BadResponse`: the agreed status is not 200; carries the body's
    ///   `error` message when there is one
    async fn query_sc_rest(
        &self,
        sc_address: &str,
        relative_path: &str,
        params: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> Result<String, SdkError>;

    /// On-chain balance document of `client_id`.
    ///
    /// A client every sharder reports as `value not present` has a zero
    /// balance and nonce.
    async fn get_balance(
        &self,
        client_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Balance, SdkError>;

    /// Last used nonce of `client_id`.
    async fn get_nonce(&self, client_id: &str, cancel: &CancellationToken)
        -> Result<i64, SdkError>;

    /// Full block at `round`, by plurality of block hash.
    async fn get_block_by_round(
        &self,
        round: i64,
        cancel: &CancellationToken,
    ) -> Result<Block, SdkError>;

    /// Median current round across a handful of sharders.
    async fn get_current_round(&self, cancel: &CancellationToken) -> Result<i64, SdkError>;

    /// Activation round of the named hardfork; `i64::MAX` when unknown.
    async fn get_hardfork_round(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<i64, SdkError>;

    /// Chain statistics.
    async fn get_chain_stats(&self, cancel: &CancellationToken) -> Result<ChainStats, SdkError>;

    /// Header of the latest finalized block.
    async fn get_latest_finalized_block(
        &self,
        cancel: &CancellationToken,
    ) -> Result<BlockHeader, SdkError>;

    /// Latest finalized magic block, as served.
    async fn get_latest_finalized_magic_block(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Value, SdkError>;

    /// Fee statistics of recent blocks.
    async fn get_fee_stats(&self, cancel: &CancellationToken) -> Result<FeeStats, SdkError>;
}
