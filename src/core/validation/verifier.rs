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

use crate::core::types::Instruction;
use std::sync::Arc;

/// Per-instruction cryptographic checks.
///
/// Implementations return `false` for anything they cannot verify, including malformed
/// key, signature or hash encodings. They must not panic.
pub trait InstructionVerifier: Send + Sync {
    /// Signature verifies against the instruction's own public key and payload.
    fn verify_signature(&self, instruction: &Instruction) -> bool;
    /// Declared hash equals the hash recomputed from the instruction content.
    fn verify_hash(&self, instruction: &Instruction) -> bool;
}

impl<V: InstructionVerifier + ?Sized> InstructionVerifier for Arc<V> {
    fn verify_signature(&self, instruction: &Instruction) -> bool {
        (**self).verify_signature(instruction)
    }

    fn verify_hash(&self, instruction: &Instruction) -> bool {
        (**self).verify_hash(instruction)
    }
}

impl<V: InstructionVerifier + ?Sized> InstructionVerifier for &V {
    fn verify_signature(&self, instruction: &Instruction) -> bool {
        (**self).verify_signature(instruction)
    }

    fn verify_hash(&self, instruction: &Instruction) -> bool {
        (**self).verify_hash(instruction)
    }
}
