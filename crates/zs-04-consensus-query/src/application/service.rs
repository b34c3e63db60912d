//! # Sharders Client
//!
//! Fan-out reads over the sharder pool with health feedback.
//!
//! Every selected sharder gets its own task. Tasks never abort each other:
//! each one is bounded by the per-request timeout and reports its outcome to
//! the `NodeHolder` before emitting on the results channel, so rankings see
//! every answer. Cancelling the caller's token stops the tasks without
//! recording anything and the partial tally is dropped.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use shared_types::{Balance, Block, BlockHeader, BlockResponse, ChainStats, FeeStats, SdkError};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;
use zs_01_transport::{build_url, HttpResponse, HttpTransport, TransportError};
use zs_02_node_health::NodeHolder;

use crate::algorithms::{lower_median, parse_whoami, Plurality};
use crate::config::QueryConfig;
use crate::domain::{ConsensusTally, SharderResponse, MINER_SC_ADDRESS, VALUE_NOT_PRESENT};
use crate::ports::ShardersQueryApi;

const BALANCE_PATH: &str = "/v1/client/get/balance";
const BLOCK_PATH: &str = "/v1/block/get";
const CURRENT_ROUND_PATH: &str = "/v1/current-round";
const CHAIN_STATS_PATH: &str = "/v1/chain/get/stats";
const LATEST_FINALIZED_PATH: &str = "/v1/block/get/latest_finalized";
const LATEST_MAGIC_BLOCK_PATH: &str = "/v1/block/get/latest_finalized_magic_block";
const FEE_STATS_PATH: &str = "/v1/block/get/fee_stats";
const WHOAMI_PATH: &str = "/_nh/whoami";

/// Consensus query engine over one sharder pool.
pub struct ShardersClient {
    transport: Arc<dyn HttpTransport>,
    sharders: Arc<NodeHolder>,
    config: QueryConfig,
}

impl ShardersClient {
    /// Create a client over `sharders`.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        sharders: Arc<NodeHolder>,
        config: QueryConfig,
    ) -> Self {
        Self {
            transport,
            sharders,
            config,
        }
    }

    /// The pool this client reads from.
    pub fn sharders(&self) -> &Arc<NodeHolder> {
        &self.sharders
    }

    /// Query tuning.
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Fan `path` out to the healthy view, or to `num_sharders` random
    /// members of it, and stream the answers.
    ///
    /// The channel closes once every task has finished.
    pub fn query_sharders(
        &self,
        num_sharders: Option<usize>,
        path: &str,
        params: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> mpsc::Receiver<SharderResponse> {
        let targets = self.select(num_sharders);
        self.fan_out(targets, path, params, cancel)
    }

    fn select(&self, num_sharders: Option<usize>) -> Vec<String> {
        match num_sharders {
            Some(n) => self.sharders.random_healthy(n),
            None => self.sharders.healthy(),
        }
    }

    fn fan_out(
        &self,
        targets: Vec<String>,
        path: &str,
        params: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> mpsc::Receiver<SharderResponse> {
        let (tx, rx) = mpsc::channel(targets.len().max(1));

        for sharder in targets {
            let url = match build_url(&sharder, path, params) {
                Ok(url) => url,
                Err(err) => {
                    warn!("[zs-04] cannot build url for {}: {}", sharder, err);
                    self.sharders.fail(&sharder);
                    continue;
                }
            };

            let transport = Arc::clone(&self.transport);
            let holder = Arc::clone(&self.sharders);
            let tx = tx.clone();
            let cancel = cancel.clone();
            let timeout = self.config.request_timeout;

            tokio::spawn(async move {
                let response = match transport.get(&url, timeout, &cancel).await {
                    Ok(HttpResponse { status, body, .. }) => {
                        if status >= 400 {
                            debug!(status, "[zs-04] {} answered with failure status", url);
                            holder.fail(&sharder);
                        } else {
                            holder.success(&sharder);
                        }
                        SharderResponse {
                            sharder,
                            url,
                            status: Some(status),
                            body,
                        }
                    }
                    Err(TransportError::Cancelled) => {
                        debug!("[zs-04] request to {} cancelled", url);
                        return;
                    }
                    Err(err) => {
                        warn!("[zs-04] request to {} failed: {}", url, err);
                        holder.fail(&sharder);
                        SharderResponse {
                            sharder,
                            url,
                            status: None,
                            body: err.to_string(),
                        }
                    }
                };
                // Receiver gone means the caller stopped listening
                let _ = tx.send(response).await;
            });
        }

        rx
    }

    async fn collect(
        mut rx: mpsc::Receiver<SharderResponse>,
        cancel: &CancellationToken,
    ) -> Result<Vec<SharderResponse>, SdkError> {
        let mut responses = Vec::new();
        while let Some(response) = rx.recv().await {
            responses.push(response);
        }
        if cancel.is_cancelled() {
            return Err(SdkError::Cancelled);
        }
        Ok(responses)
    }

    async fn collect_until(
        mut rx: mpsc::Receiver<SharderResponse>,
        deadline: Instant,
        cancel: &CancellationToken,
    ) -> Result<Vec<SharderResponse>, SdkError> {
        let mut responses = Vec::new();
        while let Ok(Some(response)) = tokio::time::timeout_at(deadline, rx.recv()).await {
            responses.push(response);
        }
        if cancel.is_cancelled() {
            return Err(SdkError::Cancelled);
        }
        Ok(responses)
    }

    async fn tally(
        &self,
        path: &str,
        params: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> Result<ConsensusTally, SdkError> {
        let rx = self.query_sharders(None, path, params, cancel);
        let mut tally = ConsensusTally::new();
        for response in Self::collect(rx, cancel).await? {
            if let Some(status) = response.status {
                tally.add(status, &response.body);
            }
        }
        Ok(tally)
    }

    fn rate(&self, count: usize) -> usize {
        count * 100 / self.sharders.consensus().max(1)
    }

    /// Status-consensus GET against the healthy view.
    pub async fn consensus_get(
        &self,
        path: &str,
        params: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> Result<String, SdkError> {
        let query_id = Uuid::new_v4();
        debug!(%query_id, "[zs-04] consensus query {}", path);

        let tally = self.tally(path, params, cancel).await?;
        let rate = tally.rate(self.sharders.consensus());
        if rate < self.config.threshold_percent {
            warn!(
                %query_id,
                rate,
                responses = tally.responses(),
                "[zs-04] consensus not reached for {}",
                path
            );
            return Err(SdkError::ConsensusFailed(format!(
                "{path}: {rate}% agreement, {}% required",
                self.config.threshold_percent
            )));
        }

        let body = tally.winning_body().unwrap_or_default().to_string();
        match tally.dominant_status() {
            Some(200) => {
                debug!(%query_id, rate, "[zs-04] consensus reached for {}", path);
                Ok(body)
            }
            Some(status) => {
                let message = HttpResponse::new(path, status, body.as_str())
                    .error_message()
                    .unwrap_or(body);
                Err(SdkError::BadResponse {
                    status,
                    body: message,
                })
            }
            None => Err(SdkError::ConsensusFailed(format!("{path}: no responses"))),
        }
    }

    async fn consensus_get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<T, SdkError> {
        let body = self.consensus_get(path, &[], cancel).await?;
        parse_body(&body)
    }

    async fn median_round<F>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        parse: F,
        cancel: &CancellationToken,
    ) -> Result<Option<i64>, SdkError>
    where
        F: Fn(&str) -> Option<i64>,
    {
        let targets = self.select(Some(self.config.round_query_sharders));
        let selected = targets.len();
        if selected == 0 {
            return Ok(None);
        }

        let deadline = Instant::now() + self.config.round_query_timeout;
        let rx = self.fan_out(targets, path, params, cancel);
        let mut rounds: Vec<i64> = Self::collect_until(rx, deadline, cancel)
            .await?
            .into_iter()
            .filter(SharderResponse::is_ok)
            .filter_map(|r| parse(&r.body))
            .collect();

        let rate = rounds.len() * 100 / selected;
        if rate < self.config.threshold_percent {
            debug!(rate, "[zs-04] round quorum not reached for {}", path);
            return Ok(None);
        }
        Ok(lower_median(&mut rounds))
    }

    /// Node id of the node at `base_url`, from its whoami record.
    pub async fn get_node_id(
        &self,
        base_url: &str,
        cancel: &CancellationToken,
    ) -> Result<String, SdkError> {
        let url = build_url(base_url, WHOAMI_PATH, &[])?;
        let response = self
            .transport
            .get(&url, self.config.request_timeout, cancel)
            .await?;
        if !response.is_success() {
            return Err(SdkError::BadResponse {
                status: response.status,
                body: response.body,
            });
        }
        parse_whoami(&response.body).ok_or_else(|| SdkError::BadResponse {
            status: response.status,
            body: format!("malformed whoami record: {}", response.body),
        })
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, SdkError> {
    serde_json::from_str(body).map_err(|e| SdkError::BadResponse {
        status: 200,
        body: format!("{e}: {body}"),
    })
}

fn parse_round(body: &str) -> Option<i64> {
    serde_json::from_str::<i64>(body.trim()).ok()
}

fn parse_hardfork_round(body: &str) -> Option<i64> {
    #[derive(Deserialize)]
    struct HardforkRound {
        round: Value,
    }
    match serde_json::from_str::<HardforkRound>(body).ok()?.round {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

#[async_trait]
impl ShardersQueryApi for ShardersClient {
    async fn query_sc_rest(
        &self,
        sc_address: &str,
        relative_path: &str,
        params: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> Result<String, SdkError> {
        let path = format!("/v1/screst/{sc_address}{relative_path}");
        self.consensus_get(&path, params, cancel).await
    }

    async fn get_balance(
        &self,
        client_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Balance, SdkError> {
        let tally = self
            .tally(BALANCE_PATH, &[("client_id", client_id)], cancel)
            .await?;

        let rate = self.rate(tally.success_agreement());
        if rate >= self.config.threshold_percent {
            if let Some(body) = tally.success_body() {
                return parse_body(body);
            }
        }

        let not_present = tally
            .winning_error_body()
            .and_then(|body| HttpResponse::new(BALANCE_PATH, 400, body).error_message())
            .is_some_and(|msg| msg == VALUE_NOT_PRESENT);
        if not_present {
            info!("[zs-04] client {} has no balance on chain yet", client_id);
            return Ok(Balance::default());
        }

        Err(SdkError::ConsensusFailed(format!(
            "balance of {client_id}: {rate}% agreement"
        )))
    }

    async fn get_nonce(
        &self,
        client_id: &str,
        cancel: &CancellationToken,
    ) -> Result<i64, SdkError> {
        Ok(self.get_balance(client_id, cancel).await?.nonce)
    }

    async fn get_block_by_round(
        &self,
        round: i64,
        cancel: &CancellationToken,
    ) -> Result<Block, SdkError> {
        let round_param = round.to_string();
        let rx = self.query_sharders(
            None,
            BLOCK_PATH,
            &[("round", &round_param), ("content", "full,header")],
            cancel,
        );

        let mut vote = Plurality::new();
        for response in Self::collect(rx, cancel).await? {
            if !response.is_ok() {
                continue;
            }
            let parsed: BlockResponse = match serde_json::from_str(&response.body) {
                Ok(parsed) => parsed,
                Err(err) => {
                    debug!("[zs-04] bad block body from {}: {}", response.sharder, err);
                    continue;
                }
            };
            let (Some(block), Some(header)) = (parsed.block, parsed.header) else {
                continue;
            };
            if header.hash != block.hash {
                warn!(
                    "[zs-04] block header/body hash mismatch from {}",
                    response.sharder
                );
                continue;
            }
            vote.add(block.hash.clone(), block);
        }

        let rate = self.rate(vote.max_count());
        if rate < self.config.threshold_percent {
            return Err(SdkError::ConsensusFailed(format!(
                "block at round {round}: {rate}% agreement"
            )));
        }
        vote.into_winner()
            .map(|(block, _)| block)
            .ok_or_else(|| SdkError::NotFound(format!("block at round {round}")))
    }

    async fn get_current_round(&self, cancel: &CancellationToken) -> Result<i64, SdkError> {
        self.median_round(CURRENT_ROUND_PATH, &[], parse_round, cancel)
            .await?
            .ok_or_else(|| SdkError::ConsensusFailed("current round".to_string()))
    }

    async fn get_hardfork_round(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<i64, SdkError> {
        let path = format!("/v1/screst/{MINER_SC_ADDRESS}/hardfork");
        let round = self
            .median_round(&path, &[("name", name)], parse_hardfork_round, cancel)
            .await?;
        Ok(round.unwrap_or(i64::MAX))
    }

    async fn get_chain_stats(&self, cancel: &CancellationToken) -> Result<ChainStats, SdkError> {
        self.consensus_get_json(CHAIN_STATS_PATH, cancel).await
    }

    async fn get_latest_finalized_block(
        &self,
        cancel: &CancellationToken,
    ) -> Result<BlockHeader, SdkError> {
        self.consensus_get_json(LATEST_FINALIZED_PATH, cancel).await
    }

    async fn get_latest_finalized_magic_block(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Value, SdkError> {
        let mut body: Value = self
            .consensus_get_json(LATEST_MAGIC_BLOCK_PATH, cancel)
            .await?;
        match body.get_mut("magic_block") {
            Some(inner) => Ok(inner.take()),
            None => Ok(body),
        }
    }

    async fn get_fee_stats(&self, cancel: &CancellationToken) -> Result<FeeStats, SdkError> {
        self.consensus_get_json(FEE_STATS_PATH, cancel).await
    }
}
