// Copyright (c) 2026 Amunchain
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Deterministic Merkle tree over instruction hash strings.
//!
//! leaf = the instruction hash string, unchanged
//! node = SHA256_HEX( left || right ) over the concatenated strings
//!
//! An odd level pairs its last node with itself. A single leaf is its own root.

use crate::core::hashing::{sha256_hex, zero_hex};

/// Side of sibling in proof.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Sibling is left.
    Left,
    /// Sibling is right.
    Right,
}

/// One proof item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofItem {
    /// Whether sibling is left or right of current hash.
    pub side: Side,
    /// Sibling hash.
    pub sibling: String,
}

/// Merkle inclusion proof.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleProof {
    /// Leaf index in submission order.
    pub index: usize,
    /// Leaf value.
    pub leaf: String,
    /// Path items from leaf to root.
    pub path: Vec<ProofItem>,
}

fn hash_node(left: &str, right: &str) -> String {
    let mut buf = String::with_capacity(left.len() + right.len());
    buf.push_str(left);
    buf.push_str(right);
    sha256_hex(buf.as_bytes())
}

fn next_level(level: &[String]) -> Vec<String> {
    let mut next: Vec<String> = Vec::with_capacity((level.len() + 1) / 2);
    for pair in level.chunks(2) {
        let left = &pair[0];
        let right = pair.get(1).unwrap_or(left);
        next.push(hash_node(left, right));
    }
    next
}

/// Merkle root over ordered leaves.
/// If empty, returns the ZERO hash (64 `'0'` characters).
pub fn compute_root(leaves: &[String]) -> String {
    let Some(first) = leaves.first() else {
        return zero_hex();
    };
    if leaves.len() == 1 {
        return first.clone();
    }
    let mut level = next_level(leaves);
    while level.len() > 1 {
        level = next_level(&level);
    }
    level.swap_remove(0)
}

/// Generate inclusion proof for the leaf at `index`.
pub fn build_proof(leaves: &[String], index: usize) -> Option<MerkleProof> {
    let leaf = leaves.get(index)?.clone();

    let mut level: Vec<String> = leaves.to_vec();
    let mut idx = index;
    let mut path: Vec<ProofItem> = Vec::new();

    while level.len() > 1 {
        let is_right = (idx % 2) == 1;
        let sib_idx = if is_right { idx - 1 } else { idx + 1 };

        let sibling = level.get(sib_idx).unwrap_or(&level[idx]).clone();

        path.push(ProofItem {
            side: if is_right { Side::Left } else { Side::Right },
            sibling,
        });

        level = next_level(&level);
        idx /= 2;
    }

    Some(MerkleProof { index, leaf, path })
}

/// Verify proof against root.
pub fn verify_proof(root: &str, proof: &MerkleProof) -> bool {
    let mut cur = proof.leaf.clone();
    for item in proof.path.iter() {
        cur = match item.side {
            Side::Left => hash_node(&item.sibling, &cur),
            Side::Right => hash_node(&cur, &item.sibling),
        };
    }
    cur == root
}
