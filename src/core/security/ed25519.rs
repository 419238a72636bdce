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

//! Ed25519 instruction signing and verification.
//!
//! ## Content bytes
//! Instruction content is the compact JSON of
//! `{operation, table, json, oldJson, instructionId, timeStamp, publicKey}`
//! in that order. `hash = SHA256_HEX(content)` and `signature = HEX(Ed25519(content))`.
//! Public keys are hex-encoded 32-byte Ed25519 keys.

use crate::core::{
    hashing::sha256_hex,
    types::{canonical_json, Instruction, Operation, UnsignedInstruction},
    validation::InstructionVerifier,
};
use ring::{
    rand::SystemRandom,
    signature::{Ed25519KeyPair, KeyPair, UnparsedPublicKey, ED25519},
};
use serde::Serialize;
use thiserror::Error;

/// Signer errors.
#[derive(Debug, Error)]
pub enum SignerError {
    /// PKCS#8 document rejected.
    #[error("invalid key encoding")]
    InvalidKey,
    /// Key generation failed.
    #[error("crypto")]
    Crypto,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Content<'a> {
    operation: Operation,
    table: &'a str,
    json: &'a str,
    old_json: &'a str,
    instruction_id: &'a str,
    time_stamp: i64,
    public_key: &'a str,
}

/// Canonical content string of an instruction (excludes hash and signature).
pub fn instruction_content(i: &Instruction) -> String {
    canonical_json(&Content {
        operation: i.operation,
        table: &i.table,
        json: &i.json,
        old_json: &i.old_json,
        instruction_id: &i.instruction_id,
        time_stamp: i.time_stamp,
        public_key: &i.public_key,
    })
}

fn unsigned_content(u: &UnsignedInstruction, public_key: &str) -> String {
    canonical_json(&Content {
        operation: u.operation,
        table: &u.table,
        json: &u.json,
        old_json: &u.old_json,
        instruction_id: &u.instruction_id,
        time_stamp: u.time_stamp,
        public_key,
    })
}

fn parse_hex_32(s: &str) -> Option<[u8; 32]> {
    let bytes = hex::decode(s.trim()).ok()?;
    bytes.try_into().ok()
}

/// Verify a hex signature over `msg` with a hex public key.
pub fn verify_hex(public_key_hex: &str, msg: &[u8], signature_hex: &str) -> bool {
    let Some(pk) = parse_hex_32(public_key_hex) else {
        return false;
    };
    let Ok(sig) = hex::decode(signature_hex.trim()) else {
        return false;
    };
    // ring requires signature length 64 for Ed25519
    if sig.len() != 64 {
        return false;
    }
    UnparsedPublicKey::new(&ED25519, pk).verify(msg, &sig).is_ok()
}

/// Ed25519 + SHA-256 instruction verifier.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Verifier;

impl InstructionVerifier for Ed25519Verifier {
    fn verify_signature(&self, instruction: &Instruction) -> bool {
        let content = instruction_content(instruction);
        verify_hex(&instruction.public_key, content.as_bytes(), &instruction.signature)
    }

    fn verify_hash(&self, instruction: &Instruction) -> bool {
        sha256_hex(instruction_content(instruction).as_bytes()) == instruction.hash
    }
}

/// Client-side signer that turns payloads into signed instructions.
pub struct InstructionSigner {
    keypair: Ed25519KeyPair,
}

impl InstructionSigner {
    /// Generate a fresh key; returns the signer and its PKCS#8 document for storage.
    pub fn generate() -> Result<(Self, Vec<u8>), SignerError> {
        let rng = SystemRandom::new();
        let pkcs8 = Ed25519KeyPair::generate_pkcs8(&rng).map_err(|_| SignerError::Crypto)?;
        let bytes = pkcs8.as_ref().to_vec();
        let signer = Self::from_pkcs8(&bytes)?;
        Ok((signer, bytes))
    }

    /// Load from PKCS#8 bytes.
    pub fn from_pkcs8(pkcs8: &[u8]) -> Result<Self, SignerError> {
        let keypair = Ed25519KeyPair::from_pkcs8(pkcs8).map_err(|_| SignerError::InvalidKey)?;
        Ok(Self { keypair })
    }

    /// Public key (hex).
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.keypair.public_key().as_ref())
    }

    /// Sign a payload, filling public key, hash and signature.
    pub fn sign(&self, unsigned: UnsignedInstruction) -> Instruction {
        let public_key = self.public_key_hex();
        let content = unsigned_content(&unsigned, &public_key);
        let hash = sha256_hex(content.as_bytes());
        let signature = hex::encode(self.keypair.sign(content.as_bytes()).as_ref());
        let UnsignedInstruction {
            operation,
            table,
            json,
            old_json,
            instruction_id,
            time_stamp,
        } = unsigned;
        Instruction {
            operation,
            table,
            json,
            old_json,
            instruction_id,
            time_stamp,
            public_key,
            signature,
            hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(id: &str) -> UnsignedInstruction {
        UnsignedInstruction {
            operation: Operation::Update,
            table: "accounts".into(),
            json: "{\"balance\":10}".into(),
            old_json: "{\"balance\":5}".into(),
            instruction_id: id.into(),
            time_stamp: 1_768_336_425_892,
        }
    }

    #[test]
    fn signed_instruction_verifies() {
        let (signer, _) = InstructionSigner::generate().unwrap();
        let ins = signer.sign(payload("a"));
        assert_eq!(ins.public_key, signer.public_key_hex());
        assert!(Ed25519Verifier.verify_signature(&ins));
        assert!(Ed25519Verifier.verify_hash(&ins));
    }

    #[test]
    fn content_matches_at_sign_and_verify() {
        let (signer, _) = InstructionSigner::generate().unwrap();
        let ins = signer.sign(payload("a"));
        let content = unsigned_content(&payload("a"), &signer.public_key_hex());
        assert_eq!(instruction_content(&ins), content);
    }

    #[test]
    fn tampered_payload_fails_both_checks() {
        let (signer, _) = InstructionSigner::generate().unwrap();
        let mut ins = signer.sign(payload("a"));
        ins.json = "{\"balance\":1000}".into();
        assert!(!Ed25519Verifier.verify_signature(&ins));
        assert!(!Ed25519Verifier.verify_hash(&ins));
    }

    #[test]
    fn foreign_key_fails_signature() {
        let (signer, _) = InstructionSigner::generate().unwrap();
        let (other, _) = InstructionSigner::generate().unwrap();
        let mut ins = signer.sign(payload("a"));
        ins.public_key = other.public_key_hex();
        assert!(!Ed25519Verifier.verify_signature(&ins));
    }

    #[test]
    fn malformed_encodings_are_false_not_panics() {
        let (signer, _) = InstructionSigner::generate().unwrap();
        let mut ins = signer.sign(payload("a"));
        ins.signature = "zz-not-hex".into();
        assert!(!Ed25519Verifier.verify_signature(&ins));
        ins.signature = "abcd".into();
        assert!(!Ed25519Verifier.verify_signature(&ins));
        ins.public_key = "0011".into();
        assert!(!Ed25519Verifier.verify_signature(&ins));
        ins.hash = String::new();
        assert!(!Ed25519Verifier.verify_hash(&ins));
    }

    #[test]
    fn pkcs8_reload_keeps_identity() {
        let (signer, pkcs8) = InstructionSigner::generate().unwrap();
        let again = InstructionSigner::from_pkcs8(&pkcs8).unwrap();
        assert_eq!(signer.public_key_hex(), again.public_key_hex());
        assert!(InstructionSigner::from_pkcs8(b"garbage").is_err());
    }
}
