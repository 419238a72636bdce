// Copyright (c) 2026 Amunchain
// Licensed under the Apache License, Version 2.0

//! Block broadcast hand-off.
//!
//! The ledger core does not talk to peers. After assembly it hands the finished block to a
//! [`Broadcaster`]; the channel implementation forwards canonical frames to whichever task
//! owns the peer transport. A failed hand-off never invalidates the block.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use crate::core::types::{decode_canonical_limited, encode_canonical, Block, CodecError};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Broadcast errors.
#[derive(Debug, Error)]
pub enum BroadcastError {
    /// Block could not be encoded.
    #[error("encode block")]
    Encode,
    /// Encoded block exceeds the frame limit.
    #[error("frame too large ({0} bytes)")]
    FrameTooLarge(usize),
    /// Outbound queue is full.
    #[error("outbound queue full")]
    QueueFull,
    /// Receiving side is gone.
    #[error("outbound channel closed")]
    Closed,
}

/// Sink for finished blocks.
pub trait Broadcaster: Send + Sync {
    /// Hand a block to the networking layer. Must not block.
    fn publish(&self, block: &Block) -> Result<(), BroadcastError>;
}

impl<B: Broadcaster + ?Sized> Broadcaster for Arc<B> {
    fn publish(&self, block: &Block) -> Result<(), BroadcastError> {
        (**self).publish(block)
    }
}

/// Drops every block (default).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopBroadcaster;

impl Broadcaster for NoopBroadcaster {
    fn publish(&self, _block: &Block) -> Result<(), BroadcastError> {
        Ok(())
    }
}

/// Receiver of encoded block frames.
pub type FrameRx = mpsc::Receiver<Vec<u8>>;

/// Forwards canonical block frames over a bounded channel.
#[derive(Clone, Debug)]
pub struct ChannelBroadcaster {
    tx: mpsc::Sender<Vec<u8>>,
    max_frame_bytes: usize,
}

impl ChannelBroadcaster {
    /// Create the broadcaster and the receiving end for the transport task.
    pub fn channel(capacity: usize, max_frame_bytes: usize) -> (Self, FrameRx) {
        let (tx, rx) = mpsc::channel::<Vec<u8>>(capacity.max(1));
        (Self { tx, max_frame_bytes }, rx)
    }

    /// Frame limit in bytes.
    pub fn max_frame_bytes(&self) -> usize {
        self.max_frame_bytes
    }
}

impl Broadcaster for ChannelBroadcaster {
    fn publish(&self, block: &Block) -> Result<(), BroadcastError> {
        let frame = encode_canonical(block).map_err(|_| BroadcastError::Encode)?;
        if frame.len() > self.max_frame_bytes {
            return Err(BroadcastError::FrameTooLarge(frame.len()));
        }
        self.tx.try_send(frame).map_err(|e| match e {
            TrySendError::Full(_) => BroadcastError::QueueFull,
            TrySendError::Closed(_) => BroadcastError::Closed,
        })
    }
}

/// Decode a frame produced by [`ChannelBroadcaster`].
pub fn decode_frame(frame: &[u8], max_frame_bytes: usize) -> Result<Block, CodecError> {
    decode_canonical_limited(frame, max_frame_bytes)
}
