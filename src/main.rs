#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Amunchain ledger entrypoint.
//! Validates one request file, assembles the block and relays it to the transport task.
//!
//! Usage: `amunchain-ledger <request.json>`

use std::sync::Arc;

use amunchain_ledger::{
    core::{
        block::BlockAssembler,
        config::{load_config, ConfigError, LedgerConfig},
        pipeline::BlockPipeline,
        security::Ed25519Verifier,
        types::BlockRequest,
        validation::{ValidationError, Validator},
    },
    monitoring::{logging, metrics::Metrics},
    networking::broadcast::{decode_frame, ChannelBroadcaster},
};
use anyhow::{Context, Result};
use tracing::{info, warn};

fn env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn config_or_default(path: &str) -> Result<LedgerConfig> {
    match load_config(path) {
        Ok(cfg) => Ok(cfg),
        Err(ConfigError::Read(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            Ok(LedgerConfig::default())
        }
        Err(e) => Err(e).with_context(|| format!("config {path}")),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = env("AMUN_LEDGER_CONFIG", "./ledger.toml");
    let cfg = config_or_default(&config_path)?;
    logging::init(&cfg.log);

    let Some(request_path) = std::env::args().nth(1) else {
        eprintln!("usage: amunchain-ledger <request.json>");
        std::process::exit(2);
    };

    info!(
        node = %cfg.node.name,
        version = cfg.block.version,
        config = %config_path,
        "amunchain ledger starting"
    );

    let raw = std::fs::read_to_string(&request_path)
        .with_context(|| format!("read request {request_path}"))?;
    let request: Option<BlockRequest> =
        serde_json::from_str(&raw).with_context(|| format!("parse request {request_path}"))?;

    let metrics = Arc::new(Metrics::new().context("metrics init")?);
    let max_frame = cfg.broadcast.max_frame_bytes;
    let (broadcaster, mut frames) =
        ChannelBroadcaster::channel(cfg.broadcast.channel_capacity, max_frame);

    // Stand-in for the peer transport: decode and log every relayed block.
    let relay = tokio::spawn(async move {
        while let Some(frame) = frames.recv().await {
            match decode_frame(&frame, max_frame) {
                Ok(block) => info!(
                    hash = %block.hash,
                    bytes = frame.len(),
                    "block relayed"
                ),
                Err(e) => warn!(?e, "undecodable frame"),
            }
        }
    });

    let pipeline = BlockPipeline::new(
        Validator::new(Ed25519Verifier),
        BlockAssembler::new(cfg.assembler()),
        broadcaster,
        metrics,
    );

    let outcome = match request {
        Some(req) => pipeline.submit(req),
        None => Err(ValidationError::MissingParameters),
    };
    drop(pipeline);
    let _ = relay.await;

    match outcome {
        Ok(block) => {
            println!("{}", serde_json::to_string_pretty(&block)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("rejected: {e}");
            std::process::exit(1);
        }
    }
}
