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

//! Node configuration (TOML).
//!
//! ```text
//! [node]
//! name = "ledger-1"
//!
//! [block]
//! version = 1
//!
//! [broadcast]
//! channel_capacity = 1024
//! max_frame_bytes = 4194304
//!
//! [log]
//! level = "info"
//! json = false
//! ```
//!
//! Only `[block]` is required. Loaded once at startup and never mutated.

use crate::core::block::AssemblerConfig;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;

/// Config errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Cannot read config file.
    #[error("read config: {0}")]
    Read(#[from] std::io::Error),
    /// Cannot parse TOML.
    #[error("parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Node configuration root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Node settings.
    #[serde(default)]
    pub node: NodeSettings,
    /// Block format settings.
    pub block: BlockSettings,
    /// Broadcast hand-off settings.
    #[serde(default)]
    pub broadcast: BroadcastSettings,
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Node settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSettings {
    /// Human-readable name.
    pub name: String,
}

impl Default for NodeSettings {
    fn default() -> Self {
        Self {
            name: "amunchain-ledger".to_string(),
        }
    }
}

/// Block format settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSettings {
    /// Version stamped into every block header.
    pub version: u32,
}

impl Default for BlockSettings {
    fn default() -> Self {
        Self { version: 1 }
    }
}

/// Broadcast hand-off settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastSettings {
    /// Bounded channel capacity (frames).
    #[serde(default = "default_capacity")]
    pub channel_capacity: usize,
    /// Largest encoded block accepted for broadcast.
    #[serde(default = "default_max_frame")]
    pub max_frame_bytes: usize,
}

fn default_capacity() -> usize {
    1024
}

fn default_max_frame() -> usize {
    4 * 1024 * 1024
}

impl Default for BroadcastSettings {
    fn default() -> Self {
        Self {
            channel_capacity: default_capacity(),
            max_frame_bytes: default_max_frame(),
        }
    }
}

/// Logging settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Max level: trace, debug, info, warn, error.
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON lines instead of compact text.
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

impl LedgerConfig {
    /// Reject out-of-range values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block.version == 0 {
            return Err(ConfigError::Invalid("block.version must be >= 1"));
        }
        if self.broadcast.channel_capacity == 0 {
            return Err(ConfigError::Invalid("broadcast.channel_capacity must be > 0"));
        }
        if self.broadcast.max_frame_bytes == 0 {
            return Err(ConfigError::Invalid("broadcast.max_frame_bytes must be > 0"));
        }
        Ok(())
    }

    /// Assembler settings derived from this config.
    pub fn assembler(&self) -> AssemblerConfig {
        AssemblerConfig {
            version: self.block.version,
        }
    }
}

/// Parse and validate TOML text.
pub fn parse_config(s: &str) -> Result<LedgerConfig, ConfigError> {
    let cfg: LedgerConfig = toml::from_str(s)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Read, parse and validate a TOML file.
pub fn load_config(path: impl AsRef<Path>) -> Result<LedgerConfig, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_config(&s)
}
