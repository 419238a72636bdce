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

//! Amunchain ledger - instruction batch validation and block assembly.
//!
//! This crate provides:
//! - Deterministic instruction / block types with canonical encodings
//! - A staged batch validator over an injectable instruction verifier
//! - A block assembler with Merkle roots over instruction hashes and SHA-256 content hashes
//! - Merkle inclusion proofs for light clients
//! - A broadcaster seam for handing finished blocks to the networking layer
//! - Monitoring via Prometheus metrics and structured logging

/// Core protocol primitives (types, validation, assembly, security).
pub mod core;
/// Observability (metrics, structured logging helpers).
pub mod monitoring;
/// Block hand-off to the networking layer.
pub mod networking;
