// Copyright (c) 2026 Amunchain
// Licensed under the Apache-2.0 License.

#![no_main]
#![forbid(unsafe_code)]

use amunchain_ledger::core::security::Ed25519Verifier;
use amunchain_ledger::core::types::BlockRequest;
use amunchain_ledger::core::validation::Validator;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Parsing and validation of hostile requests must not panic.
    if let Ok(req) = serde_json::from_slice::<Option<BlockRequest>>(data) {
        let _ = Validator::new(Ed25519Verifier).check_opt(req.as_ref());
    }
});
