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
#![deny(missing_docs)]

//! Block assembler: Merkle root, header stamping and content hash.
//!
//! hash = SHA256_HEX( canonical(header) || canonical(body) )
//!
//! The assembler trusts its input. Run the batch through the validator first.

use crate::core::{
    block::merkle::compute_root,
    hashing::sha256_hex,
    types::{Block, BlockBody, BlockHeader, BlockRequest},
};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Time source for header timestamps.
pub trait Clock: Send + Sync {
    /// Milliseconds since UNIX epoch.
    fn now_ms(&self) -> i64;
}

/// Wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// Clock pinned to one instant (replay, tests).
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

/// Assembler configuration. Fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssemblerConfig {
    /// Block format version stamped into every header.
    pub version: u32,
}

/// Builds blocks from validated requests.
#[derive(Clone, Debug)]
pub struct BlockAssembler<C: Clock = SystemClock> {
    cfg: AssemblerConfig,
    clock: C,
}

impl BlockAssembler<SystemClock> {
    /// Assembler stamping wall-clock time.
    pub fn new(cfg: AssemblerConfig) -> Self {
        Self::with_clock(cfg, SystemClock)
    }
}

impl<C: Clock> BlockAssembler<C> {
    /// Assembler with an explicit time source.
    pub fn with_clock(cfg: AssemblerConfig, clock: C) -> Self {
        Self { cfg, clock }
    }

    /// Configuration in use.
    pub fn config(&self) -> AssemblerConfig {
        self.cfg
    }

    /// Header for `body` as submitted by `public_key`, stamped now.
    pub fn build_header(&self, public_key: &str, body: &BlockBody) -> BlockHeader {
        let hash_list = body.hash_list();
        let hash_merkle_root = compute_root(&hash_list);
        BlockHeader {
            hash_list,
            hash_merkle_root,
            public_key: public_key.to_string(),
            time_stamp: self.clock.now_ms(),
            version: self.cfg.version,
        }
    }

    /// Assemble and also return the header the hash was computed over.
    pub fn seal(&self, request: BlockRequest) -> (BlockHeader, Block) {
        let BlockRequest {
            public_key,
            block_body,
        } = request;
        let body = block_body.unwrap_or_default();
        let header = self.build_header(&public_key, &body);
        let hash = content_hash(&header, &body);

        debug!(
            instructions = body.transactions.len(),
            merkle_root = %header.hash_merkle_root,
            hash = %hash,
            "block assembled"
        );

        (header, Block { hash, body })
    }

    /// Assemble a block from a validated request.
    pub fn assemble(&self, request: BlockRequest) -> Block {
        self.seal(request).1
    }
}

/// Content hash of a header/body pair, header first.
pub fn content_hash(header: &BlockHeader, body: &BlockBody) -> String {
    let mut buf = header.canonical_string();
    buf.push_str(&body.canonical_string());
    sha256_hex(buf.as_bytes())
}
