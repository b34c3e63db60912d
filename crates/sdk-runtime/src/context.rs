//! # SDK Context
//!
//! The registry every component is reached through. Built once by
//! [`SdkContext::init`], which also installs it as the process-wide context
//! returned by [`SdkContext::current`]. The network half is swapped in place
//! when the block worker reports a different miner or sharder set.
//!
//! ## Thread Safety
//!
//! - Network state sits behind one `RwLock`, written only by a refresh or a
//!   stable-miner reset
//! - Readers clone out what they need (`Arc<NodeHolder>`, miner lists) and
//!   never hold the lock across an await

use std::sync::Arc;

use parking_lot::{const_rwlock, RwLock};
use shared_crypto::Signer;
use shared_types::{Network, SdkError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use zs_01_transport::{build_url, HttpTransport, ReqwestTransport};
use zs_02_node_health::NodeHolder;
use zs_03_nonce_cache::NonceCache;
use zs_04_consensus_query::ShardersClient;
use zs_05_txn_submit::{sample_size, select_miners, TransactionSubmitter};
use zs_06_txn_verify::VerificationService;

use crate::adapters::ShardersNonceSource;
use crate::config::SdkConfig;

/// Block worker endpoint listing miners and sharders.
pub const NETWORK_PATH: &str = "/network";

/// Context installed by [`SdkContext::init`].
static CURRENT: RwLock<Option<Arc<SdkContext>>> = const_rwlock(None);

/// Miner and sharder view of the network.
#[derive(Debug, Clone)]
pub struct NetworkState {
    /// Directory as served by the block worker.
    pub network: Network,
    /// Health-ranked sharder pool.
    pub sharders: Arc<NodeHolder>,
    /// Miners transactions are posted to until a submission fails.
    pub stable_miners: Vec<String>,
}

/// Process-wide SDK state.
pub struct SdkContext {
    config: SdkConfig,
    transport: Arc<dyn HttpTransport>,
    state: RwLock<NetworkState>,
    nonces: Arc<NonceCache>,
    submitter: TransactionSubmitter,
}

impl SdkContext {
    /// Validate `config`, discover the network, wire the components over
    /// a pooled HTTP client and install the result as the current context.
    pub async fn init(config: SdkConfig, signer: Arc<dyn Signer>) -> Result<Arc<Self>, SdkError> {
        let transport = ReqwestTransport::new(&config.transport_config())?;
        let ctx = Self::init_with_transport(config, Arc::new(transport), signer).await?;
        ctx.install();
        Ok(ctx)
    }

    /// The installed context.
    ///
    /// Fails with [`SdkError::NotInitialized`] until [`init`](Self::init)
    /// or [`install`](Self::install) has run.
    pub fn current() -> Result<Arc<Self>, SdkError> {
        CURRENT.read().clone().ok_or(SdkError::NotInitialized)
    }

    /// Make this context the one [`current`](Self::current) returns.
    pub fn install(self: &Arc<Self>) {
        *CURRENT.write() = Some(Arc::clone(self));
        debug!("[sdk] context installed");
    }

    /// Drop the installed context, returning it.
    pub fn uninstall() -> Option<Arc<Self>> {
        CURRENT.write().take()
    }

    /// Apply a directory to the installed context.
    pub fn update_current_network(network: Network) -> Result<(), SdkError> {
        Self::current()?.update_network(network)
    }

    /// Built but not installed; see [`init`](Self::init).
    pub async fn init_with_transport(
        mut config: SdkConfig,
        transport: Arc<dyn HttpTransport>,
        signer: Arc<dyn Signer>,
    ) -> Result<Arc<Self>, SdkError> {
        config.validate()?;

        let network = fetch_network(transport.as_ref(), &config, &CancellationToken::new()).await?;
        let state = build_state(&config, network)?;
        info!(
            miners = state.network.miners.len(),
            sharders = state.network.sharders.len(),
            consensus = state.sharders.consensus(),
            "[sdk] network discovered via {}",
            config.block_worker
        );

        let client = ShardersClient::new(
            Arc::clone(&transport),
            Arc::clone(&state.sharders),
            config.query_config(),
        );
        let nonces = Arc::new(NonceCache::new(Arc::new(ShardersNonceSource::new(client))));
        let submitter = TransactionSubmitter::new(
            Arc::clone(&transport),
            Arc::clone(&nonces),
            signer,
            config.submit_config(),
        );

        Ok(Arc::new(Self {
            config,
            transport,
            state: RwLock::new(state),
            nonces,
            submitter,
        }))
    }

    /// Validated configuration.
    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Shared HTTP transport.
    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    /// Snapshot of the network view.
    pub fn network_state(&self) -> NetworkState {
        self.state.read().clone()
    }

    /// Current directory.
    pub fn network(&self) -> Network {
        self.state.read().network.clone()
    }

    /// Current sharder pool.
    pub fn sharders(&self) -> Arc<NodeHolder> {
        Arc::clone(&self.state.read().sharders)
    }

    /// Current stable miners.
    pub fn stable_miners(&self) -> Vec<String> {
        self.state.read().stable_miners.clone()
    }

    /// Draw a fresh stable miner set.
    pub fn reset_stable_miners(&self) {
        let mut state = self.state.write();
        state.stable_miners = select_miners(&state.network.miners, self.config.min_submit);
        debug!(miners = ?state.stable_miners, "[sdk] stable miners reset");
    }

    /// Sharders a trusted verification needs to agree.
    pub fn min_sharders_verify(&self) -> usize {
        let sharders = self.state.read().network.sharders.len();
        sample_size(self.config.min_confirmation, sharders)
    }

    /// Shared nonce cache.
    pub fn nonces(&self) -> &Arc<NonceCache> {
        &self.nonces
    }

    /// Transaction submitter.
    pub fn submitter(&self) -> &TransactionSubmitter {
        &self.submitter
    }

    /// Consensus query client over the current sharder pool.
    pub fn sharders_client(&self) -> ShardersClient {
        ShardersClient::new(
            Arc::clone(&self.transport),
            self.sharders(),
            self.config.query_config(),
        )
    }

    /// Verifier over the current sharder list.
    pub fn verification_service(&self) -> VerificationService {
        VerificationService::for_sharders(
            Arc::clone(&self.transport),
            self.sharders().all(),
            self.config.verifier_config(),
        )
    }

    /// Whether `network` differs from the current directory.
    pub fn should_update_network(&self, network: &Network) -> bool {
        !self.state.read().network.same_nodes(network)
    }

    /// Replace the network view and point nonce lookups at the new pool.
    ///
    /// The nonce source is swapped while the state write lock is held.
    pub fn update_network(&self, network: Network) -> Result<(), SdkError> {
        let next = build_state(&self.config, network)?;
        let client = ShardersClient::new(
            Arc::clone(&self.transport),
            Arc::clone(&next.sharders),
            self.config.query_config(),
        );

        let mut state = self.state.write();
        self.nonces
            .repoint(Arc::new(ShardersNonceSource::new(client)));
        info!(
            miners = next.network.miners.len(),
            sharders = next.network.sharders.len(),
            "[sdk] network updated"
        );
        *state = next;
        Ok(())
    }

    /// Fetch the directory and apply it if it changed.
    pub async fn refresh_network(&self, cancel: &CancellationToken) -> Result<bool, SdkError> {
        let network = fetch_network(self.transport.as_ref(), &self.config, cancel).await?;
        if !self.should_update_network(&network) {
            debug!("[sdk] network unchanged");
            return Ok(false);
        }
        self.update_network(network)?;
        Ok(true)
    }

    /// Refresh the directory every `network_refresh_interval` until
    /// `cancel` fires.
    pub fn spawn_network_refresh(self: &Arc<Self>, cancel: CancellationToken) -> JoinHandle<()> {
        let ctx = Arc::clone(self);
        tokio::spawn(async move {
            let interval = ctx.config.network_refresh_interval;
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        debug!("[sdk] network refresh stopped");
                        return;
                    }
                    _ = tokio::time::sleep(interval) => {}
                }
                if let Err(e) = ctx.refresh_network(&cancel).await {
                    warn!("[sdk] network refresh failed: {}", e);
                }
            }
        })
    }
}

async fn fetch_network(
    transport: &dyn HttpTransport,
    config: &SdkConfig,
    cancel: &CancellationToken,
) -> Result<Network, SdkError> {
    let url = build_url(&config.block_worker, NETWORK_PATH, &[])?;
    let resp = transport.get(&url, config.network_timeout, cancel).await?;
    if resp.status != 200 {
        return Err(SdkError::BadResponse {
            status: resp.status,
            body: resp.error_message().unwrap_or(resp.body),
        });
    }
    Ok(serde_json::from_str(&resp.body)?)
}

fn build_state(config: &SdkConfig, network: Network) -> Result<NetworkState, SdkError> {
    let consensus = config.consensus_for(network.sharders.len());
    let sharders = NodeHolder::new(network.sharders.clone(), consensus)
        .map_err(|e| SdkError::InvalidConfig(format!("sharder pool: {e}")))?;
    let stable_miners = select_miners(&network.miners, config.min_submit);
    Ok(NetworkState {
        network,
        sharders: Arc::new(sharders),
        stable_miners,
    })
}
