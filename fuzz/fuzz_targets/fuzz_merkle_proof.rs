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


#![no_main]
#![forbid(unsafe_code)]

use amunchain_ledger::core::block::merkle::{build_proof, compute_root, verify_proof};
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Clone, Debug, Arbitrary)]
struct Input {
    leaves: Vec<String>,
    index: u16,
}

fuzz_target!(|inp: Input| {
    let root = compute_root(&inp.leaves);
    if inp.leaves.is_empty() { return; }
    let idx = (inp.index as usize) % inp.leaves.len();

    let proof = build_proof(&inp.leaves, idx).expect("index in range");
    assert!(verify_proof(&root, &proof));
});
