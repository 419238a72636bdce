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

/// Block assembly and Merkle roots.
pub mod block;
/// Node configuration (TOML).
pub mod config;
/// SHA-256 helpers shared by content hashing and Merkle combination.
pub mod hashing;
/// Validate-assemble-publish wiring.
pub mod pipeline;
/// Ed25519 instruction signing and verification.
pub mod security;
/// Deterministic types and canonical encoding helpers.
pub mod types;
/// Batch validation.
pub mod validation;
