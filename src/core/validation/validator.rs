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

//! Staged batch validation.
//!
//! Stages run cheapest first and each stage covers the whole batch before the next starts:
//! shape, emptiness, key consistency, signatures, hashes. The first failure rejects the batch.

use crate::core::{
    types::{BlockRequest, Instruction},
    validation::verifier::InstructionVerifier,
};
use thiserror::Error;

/// Reason a batch was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Body absent or submitted public key empty.
    #[error("missing request parameters")]
    MissingParameters,
    /// Body carries no instructions.
    #[error("instruction set is empty")]
    EmptyInstructionSet,
    /// Instruction key differs from the submitted key.
    #[error("instruction {index}: public key does not match the submitted public key")]
    PublicKeyMismatch {
        /// Position in the body.
        index: usize,
    },
    /// Signature did not verify.
    #[error("instruction {index}: signature verification failed")]
    SignatureInvalid {
        /// Position in the body.
        index: usize,
    },
    /// Declared hash does not match the content.
    #[error("instruction {index}: hash verification failed")]
    HashMismatch {
        /// Position in the body.
        index: usize,
    },
}

impl ValidationError {
    /// Stable label for metrics and logs.
    pub fn label(&self) -> &'static str {
        match self {
            ValidationError::MissingParameters => "missing_parameters",
            ValidationError::EmptyInstructionSet => "empty_instruction_set",
            ValidationError::PublicKeyMismatch { .. } => "public_key_mismatch",
            ValidationError::SignatureInvalid { .. } => "signature_invalid",
            ValidationError::HashMismatch { .. } => "hash_mismatch",
        }
    }

    /// Offending instruction, for instruction-level failures.
    pub fn index(&self) -> Option<usize> {
        match self {
            ValidationError::PublicKeyMismatch { index }
            | ValidationError::SignatureInvalid { index }
            | ValidationError::HashMismatch { index } => Some(*index),
            _ => None,
        }
    }
}

/// Batch validator over an instruction verifier.
#[derive(Clone, Debug)]
pub struct Validator<V: InstructionVerifier> {
    verifier: V,
}

impl<V: InstructionVerifier> Validator<V> {
    /// Create a validator.
    pub fn new(verifier: V) -> Self {
        Self { verifier }
    }

    /// Underlying verifier.
    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    /// Validate a request that may be absent altogether.
    pub fn check_opt(&self, request: Option<&BlockRequest>) -> Result<(), ValidationError> {
        match request {
            Some(r) => self.check(r),
            None => Err(ValidationError::MissingParameters),
        }
    }

    /// Validate a request. `Ok(())` means it may be assembled.
    pub fn check(&self, request: &BlockRequest) -> Result<(), ValidationError> {
        let Some(body) = request.block_body.as_ref() else {
            return Err(ValidationError::MissingParameters);
        };
        if request.public_key.is_empty() {
            return Err(ValidationError::MissingParameters);
        }

        let instructions = body.transactions.as_slice();
        if instructions.is_empty() {
            return Err(ValidationError::EmptyInstructionSet);
        }

        check_each(instructions, |i| i.public_key == request.public_key, |index| {
            ValidationError::PublicKeyMismatch { index }
        })?;
        check_each(instructions, |i| self.verifier.verify_signature(i), |index| {
            ValidationError::SignatureInvalid { index }
        })?;
        check_each(instructions, |i| self.verifier.verify_hash(i), |index| {
            ValidationError::HashMismatch { index }
        })?;

        Ok(())
    }
}

fn check_each(
    instructions: &[Instruction],
    ok: impl Fn(&Instruction) -> bool,
    fail: impl Fn(usize) -> ValidationError,
) -> Result<(), ValidationError> {
    match instructions.iter().position(|i| !ok(i)) {
        Some(index) => Err(fail(index)),
        None => Ok(()),
    }
}
