// Copyright (c) 2026 Amunchain
// Licensed under the Apache License, Version 2.0

#![forbid(unsafe_code)]

use proptest::prelude::*;

use amunchain_ledger::core::block::merkle::{build_proof, compute_root, verify_proof};
use amunchain_ledger::core::hashing::sha256_hex;

fn arb_leaves(max: usize) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(any::<[u8; 16]>(), 1..max)
        .prop_map(|seeds| seeds.iter().map(|s| sha256_hex(s)).collect())
}

proptest! {
    #[test]
    fn merkle_proof_verifies_for_any_nonempty_set(leaves in arb_leaves(64), pick in any::<usize>()) {
        let root = compute_root(&leaves);
        let idx = pick % leaves.len();

        let proof = build_proof(&leaves, idx).expect("proof exists for index in range");
        prop_assert!(verify_proof(&root, &proof));
    }

    #[test]
    fn merkle_root_is_deterministic(leaves in arb_leaves(40)) {
        prop_assert_eq!(compute_root(&leaves), compute_root(&leaves.clone()));
    }

    #[test]
    fn swapping_distinct_leaves_changes_root(leaves in arb_leaves(40), a in any::<usize>(), b in any::<usize>()) {
        let i = a % leaves.len();
        let j = b % leaves.len();
        prop_assume!(leaves[i] != leaves[j]);

        let mut swapped = leaves.clone();
        swapped.swap(i, j);
        prop_assert_ne!(compute_root(&leaves), compute_root(&swapped));
    }

    #[test]
    fn single_leaf_is_its_own_root(seed in any::<[u8; 16]>()) {
        let leaf = sha256_hex(&seed);
        prop_assert_eq!(compute_root(&[leaf.clone()]), leaf);
    }
}
