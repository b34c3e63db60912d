//! # Merkle Path Verification
//!
//! Binary Merkle tree over hex-encoded leaf hashes. An interior node is
//! `hash(left + right)` where `+` is string concatenation of the two hex
//! digests. A path is the list of siblings from leaf to root plus the leaf
//! index, whose bits select the side of each sibling.

use crate::hashing::hash;

/// Interior node hash: `hash(left || right)` over the hex strings.
pub fn merkle_node_hash(left: &str, right: &str) -> String {
    let mut buf = String::with_capacity(left.len() + right.len());
    buf.push_str(left);
    buf.push_str(right);
    hash(buf)
}

/// Verify that `leaf` is at `leaf_index` in the tree rooted at `root`.
///
/// # Algorithm
///
/// 1. Start with the leaf hash
/// 2. For each sibling in the path:
///    - index bit 1: sibling is on the left, `h = H(sibling + h)`
///    - index bit 0: sibling is on the right, `h = H(h + sibling)`
///    - shift the index right by one
/// 3. Final hash must equal the root
///
/// Pure function of its inputs: repeated calls give the same answer.
pub fn verify_merkle_path(leaf: &str, nodes: &[String], leaf_index: u64, root: &str) -> bool {
    let mut current = leaf.to_string();
    let mut index = leaf_index;

    for node in nodes {
        current = if index & 1 == 1 {
            merkle_node_hash(node, &current)
        } else {
            merkle_node_hash(&current, node)
        };
        index >>= 1;
    }

    current == root
}

/// In-memory Merkle tree, used to produce paths for locally known leaves.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// levels[0] are the leaves, last level is the root.
    levels: Vec<Vec<String>>,
}

impl MerkleTree {
    /// Build a tree from leaf hashes. An odd node at any level is paired
    /// with itself.
    pub fn from_leaves(leaves: &[String]) -> Self {
        let mut levels = vec![leaves.to_vec()];
        while levels.last().map_or(false, |l| l.len() > 1) {
            let prev = &levels[levels.len() - 1];
            let next: Vec<String> = prev
                .chunks(2)
                .map(|pair| {
                    let left = &pair[0];
                    let right = pair.get(1).unwrap_or(left);
                    merkle_node_hash(left, right)
                })
                .collect();
            levels.push(next);
        }
        Self { levels }
    }

    /// Root hash; empty string for an empty tree.
    pub fn root(&self) -> String {
        self.levels
            .last()
            .and_then(|l| l.first())
            .cloned()
            .unwrap_or_default()
    }

    /// Sibling path for the leaf at `index`, or `None` if out of range.
    pub fn path(&self, index: usize) -> Option<Vec<String>> {
        if index >= self.levels.first().map_or(0, Vec::len) {
            return None;
        }

        let mut nodes = Vec::new();
        let mut idx = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = if idx % 2 == 0 { idx + 1 } else { idx - 1 };
            // Unpaired last node is hashed with itself
            nodes.push(level.get(sibling).unwrap_or(&level[idx]).clone());
            idx /= 2;
        }
        Some(nodes)
    }
}
