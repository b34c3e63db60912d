//! # Core Domain Entities
//!
//! Transactions, blocks and confirmation envelopes as they appear on the wire.
//!
//! ## Clusters
//!
//! - **Transactions**: `Transaction`, `MobileTransaction`, `SmartContractTxnData`
//! - **Blocks**: `BlockHeader`, `Block`, `BlockResponse`
//! - **Proofs**: `MerklePath`, `Confirmation`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{serde_as, DisplayFromStr};
use shared_crypto::{hash, verify_merkle_path};

// =============================================================================
// CLUSTER A: TRANSACTIONS
// =============================================================================

/// Plain value transfer.
pub const TXN_TYPE_SEND: i32 = 0;
/// Data-only transaction.
pub const TXN_TYPE_DATA: i32 = 10;
/// Smart-contract call.
pub const TXN_TYPE_SMART_CONTRACT: i32 = 1000;

/// On-chain execution status of an included transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnStatus {
    /// Executed successfully.
    Success,
    /// Failed, fee still charged.
    ChargeableError,
    /// Failed.
    Failure,
    /// Not yet known (0 or any unrecognised code).
    Unknown,
}

impl From<i32> for TxnStatus {
    fn from(code: i32) -> Self {
        match code {
            1 => TxnStatus::Success,
            2 => TxnStatus::ChargeableError,
            3 => TxnStatus::Failure,
            _ => TxnStatus::Unknown,
        }
    }
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

/// Signed transaction, desktop wire variant (`u64` value and fee).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// `hash(creation_date:nonce:client_id:to_client_id:value:hash(data))`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hash: String,
    /// Protocol version.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    /// Sender.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_id: String,
    /// Sender public key (hex).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub public_key: String,
    /// Recipient, or smart-contract address.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub to_client_id: String,
    /// Chain the transaction is bound to.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub chain_id: String,
    /// Opaque payload, usually a JSON-encoded `SmartContractTxnData`.
    #[serde(default)]
    pub transaction_data: String,
    /// Transferred value.
    #[serde(rename = "transaction_value", default)]
    pub value: u64,
    /// Signature over `hash`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub signature: String,
    /// Unix seconds.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub creation_date: i64,
    /// One of the `TXN_TYPE_*` constants.
    #[serde(default)]
    pub transaction_type: i32,
    /// Execution output reported by the network.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub transaction_output: String,
    /// Fee paid.
    #[serde(rename = "transaction_fee", default)]
    pub fee: u64,
    /// Per-client sequence number.
    #[serde(rename = "transaction_nonce", default)]
    pub nonce: i64,
    /// Hash of the execution output; the receipt Merkle leaf.
    #[serde(rename = "txn_output_hash", default)]
    pub output_hash: String,
    /// Raw on-chain status code, see [`TxnStatus`].
    #[serde(rename = "transaction_status", default)]
    pub status: i32,
    /// Fields this SDK does not model, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transaction {
    /// New unsigned transaction stamped with the current time.
    pub fn new(
        client_id: impl Into<String>,
        to_client_id: impl Into<String>,
        value: u64,
        transaction_data: impl Into<String>,
    ) -> Self {
        let creation_date = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();
        Self {
            version: "1.0".to_string(),
            client_id: client_id.into(),
            to_client_id: to_client_id.into(),
            value,
            transaction_data: transaction_data.into(),
            creation_date,
            ..Default::default()
        }
    }

    /// Hash over the signed fields; does not modify `self`.
    pub fn hash_data(&self) -> String {
        let preimage = format!(
            "{}:{}:{}:{}:{}:{}",
            self.creation_date,
            self.nonce,
            self.client_id,
            self.to_client_id,
            self.value,
            hash(&self.transaction_data)
        );
        hash(preimage)
    }

    /// Recompute and store `hash`.
    pub fn compute_hash(&mut self) -> &str {
        self.hash = self.hash_data();
        &self.hash
    }

    /// Decoded status.
    pub fn txn_status(&self) -> TxnStatus {
        TxnStatus::from(self.status)
    }

    /// Whether the record carries a signature.
    pub fn is_signed(&self) -> bool {
        !self.signature.is_empty()
    }
}

/// Mobile wire variant: value and fee are decimal strings.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobileTransaction {
    /// See [`Transaction::hash`].
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hash: String,
    /// Protocol version.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    /// Sender.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_id: String,
    /// Sender public key.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub public_key: String,
    /// Recipient.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub to_client_id: String,
    /// Chain id.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub chain_id: String,
    /// Opaque payload.
    #[serde(default)]
    pub transaction_data: String,
    /// Transferred value, string encoded.
    #[serde_as(as = "DisplayFromStr")]
    #[serde(rename = "transaction_value")]
    pub value: u64,
    /// Signature.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub signature: String,
    /// Unix seconds.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub creation_date: i64,
    /// Transaction type.
    #[serde(default)]
    pub transaction_type: i32,
    /// Execution output.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub transaction_output: String,
    /// Fee, string encoded.
    #[serde_as(as = "DisplayFromStr")]
    #[serde(rename = "transaction_fee")]
    pub fee: u64,
    /// Nonce.
    #[serde(rename = "transaction_nonce", default)]
    pub nonce: i64,
    /// Output hash.
    #[serde(rename = "txn_output_hash", default)]
    pub output_hash: String,
    /// Status code.
    #[serde(rename = "transaction_status", default)]
    pub status: i32,
}

impl From<Transaction> for MobileTransaction {
    fn from(t: Transaction) -> Self {
        Self {
            hash: t.hash,
            version: t.version,
            client_id: t.client_id,
            public_key: t.public_key,
            to_client_id: t.to_client_id,
            chain_id: t.chain_id,
            transaction_data: t.transaction_data,
            value: t.value,
            signature: t.signature,
            creation_date: t.creation_date,
            transaction_type: t.transaction_type,
            transaction_output: t.transaction_output,
            fee: t.fee,
            nonce: t.nonce,
            output_hash: t.output_hash,
            status: t.status,
        }
    }
}

impl From<MobileTransaction> for Transaction {
    fn from(t: MobileTransaction) -> Self {
        Self {
            hash: t.hash,
            version: t.version,
            client_id: t.client_id,
            public_key: t.public_key,
            to_client_id: t.to_client_id,
            chain_id: t.chain_id,
            transaction_data: t.transaction_data,
            value: t.value,
            signature: t.signature,
            creation_date: t.creation_date,
            transaction_type: t.transaction_type,
            transaction_output: t.transaction_output,
            fee: t.fee,
            nonce: t.nonce,
            output_hash: t.output_hash,
            status: t.status,
            extra: Map::new(),
        }
    }
}

/// Payload of a smart-contract call, carried in `transaction_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmartContractTxnData {
    /// Method name.
    pub name: String,
    /// Method input, passed through untouched.
    #[serde(rename = "input", default)]
    pub input: Value,
}

impl SmartContractTxnData {
    /// Build a payload.
    pub fn new(name: impl Into<String>, input: Value) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }
}

// =============================================================================
// CLUSTER B: BLOCKS
// =============================================================================

/// Block header fields needed to recompute and chain block hashes.
///
/// Sharders name the hash fields `block_hash`/`previous_block_hash` inside
/// confirmations and `hash`/`prev_hash` inside blocks; both are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Protocol version.
    #[serde(default)]
    pub version: String,
    /// Unix seconds.
    #[serde(default)]
    pub creation_date: i64,
    /// Reported block hash.
    #[serde(default, alias = "block_hash")]
    pub hash: String,
    /// Hash of the previous block.
    #[serde(default, alias = "previous_block_hash")]
    pub prev_hash: String,
    /// Generating miner.
    #[serde(default)]
    pub miner_id: String,
    /// Block number.
    #[serde(default)]
    pub round: i64,
    /// Round seed.
    #[serde(default)]
    pub round_random_seed: i64,
    /// Number of state changes applied by the block.
    #[serde(default)]
    pub state_changes_count: i64,
    /// Root of the transaction Merkle tree.
    #[serde(default)]
    pub merkle_tree_root: String,
    /// State root after the block.
    #[serde(default)]
    pub state_hash: String,
    /// Root of the receipt Merkle tree.
    #[serde(default)]
    pub receipt_merkle_tree_root: String,
    /// Transaction count.
    #[serde(default)]
    pub num_txns: i64,
}

impl BlockHeader {
    /// `hash(miner_id:prev_hash:creation_date:round:round_random_seed:
    /// state_changes_count:merkle_root:receipt_merkle_root)`.
    pub fn recompute_hash(&self) -> String {
        let preimage = format!(
            "{}:{}:{}:{}:{}:{}:{}:{}",
            self.miner_id,
            self.prev_hash,
            self.creation_date,
            self.round,
            self.round_random_seed,
            self.state_changes_count,
            self.merkle_tree_root,
            self.receipt_merkle_tree_root
        );
        hash(preimage)
    }

    /// Reported hash matches the recomputed one.
    pub fn has_valid_hash(&self) -> bool {
        !self.hash.is_empty() && self.recompute_hash() == self.hash
    }

    /// `self` directly follows `tail`.
    pub fn extends(&self, tail: &BlockHeader) -> bool {
        self.prev_hash == tail.hash && self.round == tail.round + 1
    }
}

/// Full block as served by `/v1/block/get`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Reported hash.
    #[serde(default)]
    pub hash: String,
    /// Protocol version.
    #[serde(default)]
    pub version: String,
    /// Unix seconds.
    #[serde(default)]
    pub creation_date: i64,
    /// Block number.
    #[serde(default)]
    pub round: i64,
    /// Generating miner.
    #[serde(default)]
    pub miner_id: String,
    /// Round seed.
    #[serde(default)]
    pub round_random_seed: i64,
    /// Transaction Merkle root.
    #[serde(default)]
    pub merkle_tree_root: String,
    /// State root.
    #[serde(default)]
    pub state_hash: String,
    /// Receipt Merkle root.
    #[serde(default)]
    pub receipt_merkle_tree_root: String,
    /// Transaction count.
    #[serde(default)]
    pub num_txns: i64,
    /// Magic block this block belongs to.
    #[serde(default)]
    pub magic_block_hash: String,
    /// Previous block hash.
    #[serde(default)]
    pub prev_hash: String,
    /// Miner signature.
    #[serde(default)]
    pub signature: String,
    /// Chain id.
    #[serde(default)]
    pub chain_id: String,
    /// State changes applied.
    #[serde(default)]
    pub state_changes_count: i64,
    /// Running transaction count.
    #[serde(default)]
    pub running_txn_count: i64,
    /// Round timeouts before the block was produced.
    #[serde(default)]
    pub round_timeout_count: i64,
    /// Included transactions (present with `content=full`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Header view of the block.
    pub fn header(&self) -> BlockHeader {
        BlockHeader {
            version: self.version.clone(),
            creation_date: self.creation_date,
            hash: self.hash.clone(),
            prev_hash: self.prev_hash.clone(),
            miner_id: self.miner_id.clone(),
            round: self.round,
            round_random_seed: self.round_random_seed,
            state_changes_count: self.state_changes_count,
            merkle_tree_root: self.merkle_tree_root.clone(),
            state_hash: self.state_hash.clone(),
            receipt_merkle_tree_root: self.receipt_merkle_tree_root.clone(),
            num_txns: self.num_txns,
        }
    }
}

/// Body of `/v1/block/get`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockResponse {
    /// Full block (with `content=full`).
    #[serde(default)]
    pub block: Option<Block>,
    /// Header (with `content=header`).
    #[serde(default)]
    pub header: Option<BlockHeader>,
}

impl BlockResponse {
    /// Header from whichever part is present, preferring `header`.
    pub fn into_header(self) -> Option<BlockHeader> {
        match (self.header, self.block) {
            (Some(h), _) => Some(h),
            (None, Some(b)) => Some(b.header()),
            (None, None) => None,
        }
    }
}

// =============================================================================
// CLUSTER C: PROOFS
// =============================================================================

/// Sibling hashes from a leaf to the root plus the leaf index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerklePath {
    /// Sibling hashes, leaf level first.
    #[serde(default)]
    pub nodes: Vec<String>,
    /// Position of the leaf; its bits give the side of each sibling.
    #[serde(default)]
    pub leaf_index: u64,
}

impl MerklePath {
    /// Verify `leaf` against `root`.
    pub fn verify(&self, leaf: &str, root: &str) -> bool {
        verify_merkle_path(leaf, &self.nodes, self.leaf_index, root)
    }
}

/// Transaction-in-block evidence returned by a sharder.
///
/// The top-level `hash` is the transaction hash; the enclosing block's hash
/// travels as `block_hash`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Confirmation {
    /// Protocol version.
    pub version: String,
    /// Confirmed transaction hash.
    pub hash: String,
    /// Enclosing block hash.
    pub block_hash: String,
    /// Hash of the block before it.
    pub previous_block_hash: String,
    /// Block creation time, unix seconds.
    pub creation_date: i64,
    /// Generating miner.
    pub miner_id: String,
    /// Block number.
    pub round: i64,
    /// Round seed.
    pub round_random_seed: i64,
    /// State changes applied by the block.
    pub state_changes_count: i64,
    /// Root of the transaction Merkle tree.
    pub merkle_tree_root: String,
    /// State root after the block.
    pub state_hash: String,
    /// Root of the receipt Merkle tree.
    pub receipt_merkle_tree_root: String,
    /// Transaction count.
    pub num_txns: i64,
    /// The included transaction.
    pub txn: Option<Transaction>,
    /// Proof that `txn.hash` is under `merkle_tree_root`.
    pub merkle_tree_path: Option<MerklePath>,
    /// Proof that the receipt is under `receipt_merkle_tree_root`.
    pub receipt_merkle_tree_path: Option<MerklePath>,
}

/// Confirmation endpoint reply with `content=lfb`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationEnvelope {
    /// The confirmation.
    #[serde(default)]
    pub confirmation: Option<Confirmation>,
    /// Latest finalized block header at the answering sharder.
    #[serde(default)]
    pub latest_finalized_block: Option<BlockHeader>,
}

impl Confirmation {
    /// Header of the enclosing block.
    pub fn header(&self) -> BlockHeader {
        BlockHeader {
            version: self.version.clone(),
            creation_date: self.creation_date,
            hash: self.block_hash.clone(),
            prev_hash: self.previous_block_hash.clone(),
            miner_id: self.miner_id.clone(),
            round: self.round,
            round_random_seed: self.round_random_seed,
            state_changes_count: self.state_changes_count,
            merkle_tree_root: self.merkle_tree_root.clone(),
            state_hash: self.state_hash.clone(),
            receipt_merkle_tree_root: self.receipt_merkle_tree_root.clone(),
            num_txns: self.num_txns,
        }
    }

    /// Parse either the bare confirmation or the `{confirmation, ...}`
    /// envelope.
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        ConfirmationEnvelope::from_body(body).map(|envelope| envelope.confirmation.unwrap_or_default())
    }
}

impl ConfirmationEnvelope {
    /// Parse a confirmation reply. A bare confirmation is wrapped with no
    /// finalized block.
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        let envelope: Self = serde_json::from_str(body)?;
        if envelope.confirmation.is_some() {
            return Ok(envelope);
        }
        Ok(Self {
            confirmation: Some(serde_json::from_str(body)?),
            latest_finalized_block: envelope.latest_finalized_block,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_crypto::MerkleTree;

    fn sample_txn() -> Transaction {
        Transaction {
            hash: "ab".repeat(32),
            version: "1.0".into(),
            client_id: "client".into(),
            public_key: "pk".into(),
            to_client_id: "to".into(),
            chain_id: "chain".into(),
            transaction_data: "{\"name\":\"transfer\"}".into(),
            value: 10_000_000_000,
            signature: "sig".into(),
            creation_date: 1_700_000_000,
            transaction_type: TXN_TYPE_SMART_CONTRACT,
            transaction_output: String::new(),
            fee: 42,
            nonce: 7,
            output_hash: "out".into(),
            status: 1,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_txn_hash_formula() {
        let t = sample_txn();
        let expected = hash(format!(
            "1700000000:7:client:to:10000000000:{}",
            hash("{\"name\":\"transfer\"}")
        ));
        assert_eq!(t.hash_data(), expected);
    }

    #[test]
    fn test_txn_hash_covers_nonce() {
        let mut a = sample_txn();
        let b = sample_txn();
        a.nonce += 1;
        assert_ne!(a.hash_data(), b.hash_data());
    }

    #[test]
    fn test_desktop_wire_roundtrip() {
        let t = sample_txn();
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"transaction_value\":10000000000"));
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_mobile_wire_roundtrip() {
        let m = MobileTransaction::from(sample_txn());
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"transaction_value\":\"10000000000\""));
        assert!(json.contains("\"transaction_fee\":\"42\""));
        let back: MobileTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
        assert_eq!(Transaction::from(back), sample_txn());
    }

    #[test]
    fn test_unknown_fields_preserved() {
        let json = r#"{"hash":"h","transaction_data":"","transaction_value":1,
            "transaction_type":0,"transaction_fee":0,"transaction_nonce":1,
            "txn_output_hash":"","transaction_status":0,"block_hash":"b1"}"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t.extra.get("block_hash"), Some(&Value::from("b1")));
        let again = serde_json::to_string(&t).unwrap();
        assert!(again.contains("\"block_hash\":\"b1\""));
    }

    #[test]
    fn test_txn_status_mapping() {
        assert_eq!(TxnStatus::from(1), TxnStatus::Success);
        assert_eq!(TxnStatus::from(2), TxnStatus::ChargeableError);
        assert_eq!(TxnStatus::from(3), TxnStatus::Failure);
        assert_eq!(TxnStatus::from(0), TxnStatus::Unknown);
    }

    fn header(round: i64, prev: &str) -> BlockHeader {
        let mut h = BlockHeader {
            version: "1.0".into(),
            creation_date: 1_700_000_000 + round,
            prev_hash: prev.into(),
            miner_id: "miner-1".into(),
            round,
            round_random_seed: 99,
            state_changes_count: 3,
            merkle_tree_root: "mroot".into(),
            receipt_merkle_tree_root: "rroot".into(),
            ..Default::default()
        };
        h.hash = h.recompute_hash();
        h
    }

    #[test]
    fn test_block_hash_formula() {
        let h = header(100, "p");
        let expected = hash("miner-1:p:1700000100:100:99:3:mroot:rroot");
        assert_eq!(h.recompute_hash(), expected);
        assert!(h.has_valid_hash());
    }

    #[test]
    fn test_tampered_header_invalid() {
        let mut h = header(100, "p");
        h.state_changes_count += 1;
        assert!(!h.has_valid_hash());
    }

    #[test]
    fn test_extends() {
        let a = header(100, "p");
        let b = header(101, &a.hash);
        let c = header(103, &b.hash);
        assert!(b.extends(&a));
        assert!(!c.extends(&b));
        assert!(!a.extends(&b));
    }

    #[test]
    fn test_header_aliases() {
        let json = r#"{"block_hash":"bh","previous_block_hash":"ph","round":5}"#;
        let h: BlockHeader = serde_json::from_str(json).unwrap();
        assert_eq!(h.hash, "bh");
        assert_eq!(h.prev_hash, "ph");
        assert_eq!(h.round, 5);
    }

    #[test]
    fn test_block_response_prefers_header() {
        let block = Block {
            hash: "from-block".into(),
            ..Default::default()
        };
        let resp = BlockResponse {
            block: Some(block.clone()),
            header: None,
        };
        assert_eq!(resp.into_header().unwrap().hash, "from-block");

        let resp = BlockResponse {
            block: Some(block),
            header: Some(BlockHeader {
                hash: "from-header".into(),
                ..Default::default()
            }),
        };
        assert_eq!(resp.into_header().unwrap().hash, "from-header");
    }

    #[test]
    fn test_confirmation_bare_and_wrapped() {
        let leaves = vec![hash("t0"), hash("t1")];
        let tree = MerkleTree::from_leaves(&leaves);
        let path = MerklePath {
            nodes: tree.path(1).unwrap(),
            leaf_index: 1,
        };
        let conf = serde_json::json!({
            "hash": leaves[1],
            "block_hash": "bh",
            "previous_block_hash": "ph",
            "round": 9,
            "merkle_tree_root": tree.root(),
            "txn": {"hash": leaves[1]},
            "merkle_tree_path": path,
        });

        let bare = Confirmation::from_body(&conf.to_string()).unwrap();
        let header = bare.header();
        assert_eq!(bare.hash, leaves[1]);
        assert_eq!(header.hash, "bh");
        assert_eq!(header.prev_hash, "ph");
        assert_eq!(header.round, 9);
        assert!(bare
            .merkle_tree_path
            .as_ref()
            .unwrap()
            .verify(&leaves[1], &header.merkle_tree_root));

        let wrapped = serde_json::json!({
            "confirmation": conf,
            "latest_finalized_block": {"hash": "lfb"},
        });
        let parsed = Confirmation::from_body(&wrapped.to_string()).unwrap();
        assert_eq!(parsed, bare);
    }

    #[test]
    fn test_confirmation_envelope_keeps_lfb() {
        let conf = serde_json::json!({"hash": "h1", "block_hash": "bh", "round": 9});

        let wrapped = serde_json::json!({
            "confirmation": conf,
            "latest_finalized_block": {"hash": "lfb", "round": 12},
        });
        let envelope = ConfirmationEnvelope::from_body(&wrapped.to_string()).unwrap();
        let lfb = envelope.latest_finalized_block.unwrap();
        assert_eq!(lfb.hash, "lfb");
        assert_eq!(lfb.round, 12);
        assert_eq!(envelope.confirmation.unwrap().round, 9);

        let bare = ConfirmationEnvelope::from_body(&conf.to_string()).unwrap();
        assert!(bare.latest_finalized_block.is_none());
        assert_eq!(bare.confirmation.unwrap().block_hash, "bh");

        assert!(ConfirmationEnvelope::from_body("not json").is_err());
    }

    #[test]
    fn test_sc_payload_shape() {
        let data = SmartContractTxnData::new("lock", serde_json::json!({"duration": "1h"}));
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, r#"{"name":"lock","input":{"duration":"1h"}}"#);
    }
}
