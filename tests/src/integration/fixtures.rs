//! Mock network builders shared by the integration tests.

use std::sync::Arc;

use serde_json::json;
use shared_crypto::{hash, Ed25519Signer, MerkleTree};
use shared_types::{BlockHeader, Confirmation, MerklePath, Transaction};
use sdk_runtime::{SdkConfig, SdkContext};
use zs_01_transport::MockTransport;

/// Block worker used by every fixture.
pub const BLOCK_WORKER: &str = "http://bw";

/// `http://<prefix>1 .. http://<prefix>n`.
pub fn urls(prefix: &str, n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("http://{prefix}{i}")).collect()
}

/// `/network` body with `miners` miners and `sharders` sharders.
pub fn network_body(miners: usize, sharders: usize) -> String {
    json!({ "miners": urls("m", miners), "sharders": urls("s", sharders) }).to_string()
}

/// Register the directory and build a context over it.
pub async fn context(
    mock: &Arc<MockTransport>,
    miners: usize,
    sharders: usize,
    config: SdkConfig,
) -> Arc<SdkContext> {
    mock.on(
        format!("{BLOCK_WORKER}/network"),
        200,
        network_body(miners, sharders),
    );
    SdkContext::init_with_transport(
        config,
        mock.clone(),
        Arc::new(Ed25519Signer::from_seed([9u8; 32])),
    )
    .await
    .expect("context")
}

/// Test config with consensus over exactly `k` sharders.
pub fn config(k: usize) -> SdkConfig {
    SdkConfig {
        sharder_consensus: Some(k),
        chain_id: "test-chain".into(),
        ..SdkConfig::for_testing(BLOCK_WORKER)
    }
}

/// A transaction included at some round plus the blocks built on top.
pub struct ChainFixture {
    /// The included transaction.
    pub txn: Transaction,
    /// Confirmation as a sharder would serve it.
    pub confirmation: Confirmation,
    /// Extension blocks, in round order.
    pub blocks: Vec<BlockHeader>,
}

impl ChainFixture {
    /// Include a signed transaction with `hash` at `round` and build
    /// `extension` blocks after it.
    pub fn for_hash(hash_hex: &str, round: i64, extension: usize) -> Self {
        let txn = Transaction {
            hash: hash_hex.to_string(),
            signature: "sig".into(),
            output_hash: hash(format!("{hash_hex}:output")),
            status: 1,
            ..Default::default()
        };

        let leaves = vec![hash("l0"), txn.hash.clone(), hash("l2"), hash("l3")];
        let receipts = vec![hash("r0"), txn.output_hash.clone(), hash("r2"), hash("r3")];
        let tree = MerkleTree::from_leaves(&leaves);
        let receipt_tree = MerkleTree::from_leaves(&receipts);

        let mut confirmation = Confirmation {
            version: "1.0".into(),
            hash: txn.hash.clone(),
            previous_block_hash: hash(format!("block-{}", round - 1)),
            creation_date: 1_700_000_000 + round,
            miner_id: "miner-1".into(),
            round,
            round_random_seed: 77,
            num_txns: leaves.len() as i64,
            merkle_tree_root: tree.root(),
            receipt_merkle_tree_root: receipt_tree.root(),
            txn: Some(txn.clone()),
            merkle_tree_path: tree.path(1).map(|nodes| MerklePath {
                nodes,
                leaf_index: 1,
            }),
            receipt_merkle_tree_path: receipt_tree.path(1).map(|nodes| MerklePath {
                nodes,
                leaf_index: 1,
            }),
            ..Default::default()
        };
        confirmation.block_hash = confirmation.header().recompute_hash();

        let mut blocks = Vec::with_capacity(extension);
        let mut tail = confirmation.header();
        for _ in 0..extension {
            let mut next = BlockHeader {
                version: "1.0".into(),
                miner_id: "miner-2".into(),
                prev_hash: tail.hash.clone(),
                round: tail.round + 1,
                creation_date: tail.creation_date + 1,
                ..Default::default()
            };
            next.hash = next.recompute_hash();
            blocks.push(next.clone());
            tail = next;
        }

        Self {
            txn,
            confirmation,
            blocks,
        }
    }

    /// `/v1/transaction/get/confirmation` body with an lfb envelope.
    pub fn confirmation_body(&self) -> String {
        json!({
            "confirmation": self.confirmation,
            "latest_finalized_block": self.blocks.last(),
        })
        .to_string()
    }

    /// `/v1/block/get` body for `round`, if the fixture has that block.
    pub fn block_body(&self, round: i64) -> Option<String> {
        self.blocks
            .iter()
            .find(|b| b.round == round)
            .map(|b| json!({ "header": b }).to_string())
    }

    /// Round carried in a `/v1/block/get` URL.
    pub fn round_in(url: &str) -> Option<i64> {
        url.split(['?', '&'])
            .find_map(|part| part.strip_prefix("round="))
            .and_then(|r| r.parse().ok())
    }
}
