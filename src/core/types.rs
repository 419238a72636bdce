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

//! Deterministic core types and canonical encoding helpers.
//!
//! Two canonical forms exist:
//! - compact JSON strings (field declaration order, no maps) feed content hashing;
//! - fixint bincode bytes carry finished blocks to the networking layer.

use bincode::Options;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

/// Canonical serialization error.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("serialization")]
    Serialize,
    #[error("deserialization")]
    Deserialize,
    #[error("size limit exceeded")]
    TooLarge,
}

/// Canonical bincode options (deterministic).
fn bincode_opts() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .reject_trailing_bytes()
}

/// Encode with deterministic rules.
pub fn encode_canonical<T: Serialize>(v: &T) -> Result<Vec<u8>, CodecError> {
    bincode_opts()
        .serialize(v)
        .map_err(|_| CodecError::Serialize)
}

/// Decode with a hard size cap.
pub fn decode_canonical_limited<T: DeserializeOwned>(
    bytes: &[u8],
    max: usize,
) -> Result<T, CodecError> {
    if bytes.len() > max {
        return Err(CodecError::TooLarge);
    }
    // The cap also applies inside the deserializer so declared container lengths cannot exceed it.
    bincode_opts()
        .with_limit(max as u64)
        .deserialize(bytes)
        .map_err(|_| CodecError::Deserialize)
}

/// Compact JSON used as the hashing form of headers, bodies and instruction content.
///
/// Only called on the types in this crate, none of which contain maps or fallible
/// `Serialize` impls.
pub(crate) fn canonical_json<T: Serialize>(v: &T) -> String {
    serde_json::to_string(v).expect("ledger types always serialize to JSON")
}

/// Kind of change an instruction applies to its table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    /// Insert a new row.
    Add,
    /// Remove an existing row.
    Delete,
    /// Replace an existing row.
    Update,
}

/// A single signed, hashed operation submitted by a client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    /// Operation kind.
    pub operation: Operation,
    /// Target table.
    pub table: String,
    /// New row content (JSON text, opaque here).
    #[serde(default)]
    pub json: String,
    /// Previous row content, for updates and deletes.
    #[serde(default)]
    pub old_json: String,
    /// Client-chosen identifier.
    pub instruction_id: String,
    /// Client timestamp (ms since UNIX epoch).
    pub time_stamp: i64,
    /// Signer public key (hex).
    pub public_key: String,
    /// Signature over the instruction content (hex, opaque to validation).
    pub signature: String,
    /// Declared content hash (hex).
    pub hash: String,
}

/// An instruction before signing: payload only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedInstruction {
    /// Operation kind.
    pub operation: Operation,
    /// Target table.
    pub table: String,
    /// New row content.
    #[serde(default)]
    pub json: String,
    /// Previous row content.
    #[serde(default)]
    pub old_json: String,
    /// Client-chosen identifier.
    pub instruction_id: String,
    /// Client timestamp (ms since UNIX epoch).
    pub time_stamp: i64,
}

/// Ordered instructions of one block. Order fixes the Merkle leaf order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockBody {
    /// Instructions in submission order.
    #[serde(default)]
    pub transactions: Vec<Instruction>,
}

impl BlockBody {
    /// Instruction hashes in body order.
    pub fn hash_list(&self) -> Vec<String> {
        self.transactions.iter().map(|i| i.hash.clone()).collect()
    }

    /// Canonical hashing form.
    pub fn canonical_string(&self) -> String {
        canonical_json(self)
    }
}

/// Block metadata. Built once by the assembler, never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeader {
    /// One hash per instruction, same order as the body.
    pub hash_list: Vec<String>,
    /// Merkle root over `hash_list`.
    pub hash_merkle_root: String,
    /// Submitter public key.
    pub public_key: String,
    /// Assembly time (ms since UNIX epoch).
    pub time_stamp: i64,
    /// Block format version.
    pub version: u32,
}

impl BlockHeader {
    /// Canonical hashing form.
    pub fn canonical_string(&self) -> String {
        canonical_json(self)
    }
}

/// Assembled block. `hash` is its sole identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// SHA-256 over canonical header || canonical body (hex).
    pub hash: String,
    /// The submitted body, moved in unchanged.
    pub body: BlockBody,
}

/// Client submission: claimed public key plus a body of instructions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRequest {
    /// Submitter public key (hex). Empty when absent on the wire.
    #[serde(default)]
    pub public_key: String,
    /// Instruction body. `None` when absent on the wire.
    #[serde(default)]
    pub block_body: Option<BlockBody>,
}

impl BlockRequest {
    /// Build a request from a key and instructions.
    pub fn new(public_key: impl Into<String>, transactions: Vec<Instruction>) -> Self {
        Self {
            public_key: public_key.into(),
            block_body: Some(BlockBody { transactions }),
        }
    }
}
