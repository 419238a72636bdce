// Copyright (c) 2026 Amunchain
// Licensed under the Apache License, Version 2.0

//! Structured logging setup.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use crate::core::config::LogConfig;
use tracing::Level;

fn parse_level(s: &str) -> Level {
    match s.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(cfg: &LogConfig) {
    let level = parse_level(&cfg.level);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(level);
    let _ = if cfg.json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}
