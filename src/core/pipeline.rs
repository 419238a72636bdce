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

//! Request pipeline: validate, assemble, publish.
//!
//! Every call is synchronous and independent. The only shared state is read-only
//! configuration plus the broadcaster and metrics handles, which synchronize internally.

use crate::{
    core::{
        block::{BlockAssembler, Clock, SystemClock},
        types::{Block, BlockRequest},
        validation::{InstructionVerifier, ValidationError, Validator},
    },
    monitoring::metrics::Metrics,
    networking::broadcast::Broadcaster,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Validate-assemble-publish pipeline.
pub struct BlockPipeline<V: InstructionVerifier, B: Broadcaster, C: Clock = SystemClock> {
    validator: Validator<V>,
    assembler: BlockAssembler<C>,
    broadcaster: B,
    metrics: Arc<Metrics>,
}

impl<V: InstructionVerifier, B: Broadcaster, C: Clock> BlockPipeline<V, B, C> {
    /// Wire the stages together.
    pub fn new(
        validator: Validator<V>,
        assembler: BlockAssembler<C>,
        broadcaster: B,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            validator,
            assembler,
            broadcaster,
            metrics,
        }
    }

    /// Validator stage.
    pub fn validator(&self) -> &Validator<V> {
        &self.validator
    }

    /// Metrics handle.
    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Validate only; counts and logs rejections.
    pub fn check(&self, request: &BlockRequest) -> Result<(), ValidationError> {
        match self.validator.check(request) {
            Ok(()) => {
                self.metrics.batches_accepted_total.inc();
                Ok(())
            }
            Err(e) => {
                self.metrics.record_rejection(e.label());
                warn!(reason = %e, kind = e.label(), "batch rejected");
                Err(e)
            }
        }
    }

    /// Assemble a block from a request that already passed [`check`](Self::check).
    pub fn add_block(&self, request: BlockRequest) -> Block {
        let block = self.assembler.assemble(request);
        self.metrics.blocks_assembled_total.inc();
        self.metrics
            .instructions_total
            .inc_by(block.body.transactions.len() as u64);
        block
    }

    /// Check, assemble and publish. A failed publish is logged; the block is still returned.
    pub fn submit(&self, request: BlockRequest) -> Result<Block, ValidationError> {
        self.check(&request)?;
        let block = self.add_block(request);

        if let Err(e) = self.broadcaster.publish(&block) {
            self.metrics.broadcast_failures_total.inc();
            warn!(hash = %block.hash, error = %e, "block broadcast failed");
        }

        info!(
            hash = %block.hash,
            instructions = block.body.transactions.len(),
            "block accepted"
        );
        Ok(block)
    }
}
