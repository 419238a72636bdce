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

use prometheus::{IntCounter, IntCounterVec, Opts, Registry};
use thiserror::Error;

/// Metrics errors.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus")]
    Prom,
}

/// Metrics container.
#[derive(Clone)]
pub struct Metrics {
    /// Registry.
    pub registry: Registry,

    /// Batches that passed validation.
    pub batches_accepted_total: IntCounter,
    /// Rejected batches, by reason label.
    pub batches_rejected_total: IntCounterVec,
    /// Blocks assembled.
    pub blocks_assembled_total: IntCounter,
    /// Instructions included in assembled blocks.
    pub instructions_total: IntCounter,
    /// Failed broadcast hand-offs.
    pub broadcast_failures_total: IntCounter,
}

impl Metrics {
    /// Create and register metrics.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let batches_accepted_total = IntCounter::new(
            "amunchain_ledger_batches_accepted_total",
            "Batches that passed validation",
        )
        .map_err(|_| MetricsError::Prom)?;
        let batches_rejected_total = IntCounterVec::new(
            Opts::new(
                "amunchain_ledger_batches_rejected_total",
                "Rejected batches by reason",
            ),
            &["reason"],
        )
        .map_err(|_| MetricsError::Prom)?;
        let blocks_assembled_total =
            IntCounter::new("amunchain_ledger_blocks_assembled_total", "Blocks assembled")
                .map_err(|_| MetricsError::Prom)?;
        let instructions_total = IntCounter::new(
            "amunchain_ledger_instructions_total",
            "Instructions included in blocks",
        )
        .map_err(|_| MetricsError::Prom)?;
        let broadcast_failures_total = IntCounter::new(
            "amunchain_ledger_broadcast_failures_total",
            "Failed broadcast hand-offs",
        )
        .map_err(|_| MetricsError::Prom)?;

        registry
            .register(Box::new(batches_accepted_total.clone()))
            .map_err(|_| MetricsError::Prom)?;
        registry
            .register(Box::new(batches_rejected_total.clone()))
            .map_err(|_| MetricsError::Prom)?;
        registry
            .register(Box::new(blocks_assembled_total.clone()))
            .map_err(|_| MetricsError::Prom)?;
        registry
            .register(Box::new(instructions_total.clone()))
            .map_err(|_| MetricsError::Prom)?;
        registry
            .register(Box::new(broadcast_failures_total.clone()))
            .map_err(|_| MetricsError::Prom)?;

        Ok(Self {
            registry,
            batches_accepted_total,
            batches_rejected_total,
            blocks_assembled_total,
            instructions_total,
            broadcast_failures_total,
        })
    }

    /// Count a rejection under its reason label.
    pub fn record_rejection(&self, reason: &str) {
        self.batches_rejected_total
            .with_label_values(&[reason])
            .inc();
    }
}
