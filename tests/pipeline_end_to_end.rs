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

use amunchain_ledger::core::block::{AssemblerConfig, BlockAssembler, FixedClock};
use amunchain_ledger::core::hashing::sha256_hex;
use amunchain_ledger::core::pipeline::BlockPipeline;
use amunchain_ledger::core::security::{Ed25519Verifier, InstructionSigner};
use amunchain_ledger::core::types::{BlockRequest, Instruction, Operation, UnsignedInstruction};
use amunchain_ledger::core::validation::{InstructionVerifier, ValidationError, Validator};
use amunchain_ledger::monitoring::metrics::Metrics;
use amunchain_ledger::networking::broadcast::{decode_frame, ChannelBroadcaster};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn payload(n: u32) -> UnsignedInstruction {
    UnsignedInstruction {
        operation: Operation::Add,
        table: "orders".into(),
        json: format!("{{\"id\":{n},\"qty\":{}}}", n * 10),
        old_json: String::new(),
        instruction_id: format!("order-{n}"),
        time_stamp: 1_768_336_425_000 + n as i64,
    }
}

fn signed_batch(n: u32) -> (InstructionSigner, BlockRequest) {
    let (signer, _) = InstructionSigner::generate().unwrap();
    let txs = (0..n).map(|i| signer.sign(payload(i))).collect();
    let req = BlockRequest::new(signer.public_key_hex(), txs);
    (signer, req)
}

#[test]
fn three_valid_instructions_become_a_block() {
    let (_signer, req) = signed_batch(3);
    let validator = Validator::new(Ed25519Verifier);
    assert_eq!(validator.check(&req), Ok(()));

    let assembler = BlockAssembler::with_clock(AssemblerConfig { version: 1 }, FixedClock(1_768_336_500_000));
    let (header, block) = assembler.seal(req.clone());

    assert_eq!(header.hash_list.len(), 3);
    assert!(!header.hash_merkle_root.is_empty());
    for (i, ins) in block.body.transactions.iter().enumerate() {
        assert_eq!(header.hash_list[i], ins.hash);
    }

    let expected = sha256_hex(
        format!("{}{}", header.canonical_string(), block.body.canonical_string()).as_bytes(),
    );
    assert_eq!(block.hash, expected);
    assert_eq!(Some(&block.body), req.block_body.as_ref());
}

#[test]
fn bad_signature_in_second_instruction_rejects_batch() {
    let (_signer, mut req) = signed_batch(3);
    if let Some(body) = req.block_body.as_mut() {
        let sig = &mut body.transactions[1].signature;
        // flip the first hex digit
        let flipped = if sig.starts_with('0') { "1" } else { "0" };
        sig.replace_range(0..1, flipped);
    }

    let (broadcaster, mut frames) = ChannelBroadcaster::channel(4, 1 << 20);
    let pipeline = BlockPipeline::new(
        Validator::new(Ed25519Verifier),
        BlockAssembler::new(AssemblerConfig { version: 1 }),
        broadcaster,
        Arc::new(Metrics::new().unwrap()),
    );

    assert_eq!(
        pipeline.submit(req),
        Err(ValidationError::SignatureInvalid { index: 1 })
    );
    assert!(frames.try_recv().is_err());
    assert_eq!(pipeline.metrics().blocks_assembled_total.get(), 0);
}

#[test]
fn tampered_hash_reports_hash_mismatch() {
    let (_signer, mut req) = signed_batch(2);
    if let Some(body) = req.block_body.as_mut() {
        body.transactions[0].hash = sha256_hex(b"something else");
    }
    let validator = Validator::new(Ed25519Verifier);
    assert_eq!(
        validator.check(&req),
        Err(ValidationError::HashMismatch { index: 0 })
    );
}

#[test]
fn foreign_signer_in_batch_is_key_mismatch() {
    let (_signer, mut req) = signed_batch(3);
    let (other, _) = InstructionSigner::generate().unwrap();
    if let Some(body) = req.block_body.as_mut() {
        body.transactions[2] = other.sign(payload(2));
    }
    let validator = Validator::new(Ed25519Verifier);
    assert_eq!(
        validator.check(&req),
        Err(ValidationError::PublicKeyMismatch { index: 2 })
    );
}

struct CountingVerifier {
    signature_calls: AtomicUsize,
}

impl InstructionVerifier for CountingVerifier {
    fn verify_signature(&self, _: &Instruction) -> bool {
        self.signature_calls.fetch_add(1, Ordering::SeqCst);
        true
    }
    fn verify_hash(&self, _: &Instruction) -> bool {
        true
    }
}

#[test]
fn key_mismatch_on_first_instruction_skips_all_signature_checks() {
    let (_signer, mut req) = signed_batch(2);
    if let Some(body) = req.block_body.as_mut() {
        body.transactions[0].public_key = "00".repeat(32);
    }
    let validator = Validator::new(CountingVerifier {
        signature_calls: AtomicUsize::new(0),
    });
    assert_eq!(
        validator.check(&req),
        Err(ValidationError::PublicKeyMismatch { index: 0 })
    );
    assert_eq!(validator.verifier().signature_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn accepted_block_reaches_transport_as_frame() {
    let (_signer, req) = signed_batch(2);
    let (broadcaster, mut frames) = ChannelBroadcaster::channel(4, 1 << 20);
    let pipeline = BlockPipeline::new(
        Validator::new(Ed25519Verifier),
        BlockAssembler::new(AssemblerConfig { version: 7 }),
        broadcaster,
        Arc::new(Metrics::new().unwrap()),
    );
    let block = pipeline.submit(req).unwrap();
    let frame = frames.try_recv().unwrap();
    assert_eq!(decode_frame(&frame, 1 << 20).unwrap(), block);
}

#[test]
fn concurrent_submissions_are_independent() {
    let (broadcaster, _frames) = ChannelBroadcaster::channel(64, 1 << 20);
    let pipeline = Arc::new(BlockPipeline::new(
        Validator::new(Ed25519Verifier),
        BlockAssembler::new(AssemblerConfig { version: 1 }),
        broadcaster,
        Arc::new(Metrics::new().unwrap()),
    ));

    let handles: Vec<_> = (0..8u32)
        .map(|t| {
            let p = pipeline.clone();
            std::thread::spawn(move || {
                let (_signer, req) = signed_batch(t % 3 + 1);
                p.submit(req).map(|b| b.body.transactions.len())
            })
        })
        .collect();

    for (t, h) in handles.into_iter().enumerate() {
        assert_eq!(h.join().unwrap(), Ok(t % 3 + 1));
    }
    assert_eq!(pipeline.metrics().blocks_assembled_total.get(), 8);
}
