// Copyright 2025 Stoolap Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Integration tests for FingerprintSet
//!
//! Membership, duplicate handling, sentinel remapping and growth, checked
//! against FxHashSet as an oracle.

use fpset::{FingerprintSet, SetConfig, BLOCK_SIZE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;

const SENTINEL: i64 = i64::MAX;

fn min_dense() -> FingerprintSet {
    FingerprintSet::with_capacity_and_load_factor(1, 0.85).expect("Failed to create set")
}

/// Canonical form the set stores: the sentinel collapses onto 0
fn stored(fp: i64) -> i64 {
    if fp == SENTINEL {
        0
    } else {
        fp
    }
}

/// Test the documented walkthrough on a one-block set
#[test]
fn test_concrete_scenario() {
    let mut set = min_dense();
    assert_eq!(set.capacity(), BLOCK_SIZE);

    assert!(set.add(5));
    assert!(set.check_ordered());
    assert!(set.add(-3));
    assert!(set.check_ordered());
    assert!(set.add(0));
    assert!(set.check_ordered());

    // The sentinel is stored as 0, which is already present
    assert!(!set.add(SENTINEL));
    assert!(set.contains(0));
    assert!(set.contains(SENTINEL));
    assert!(set.check_ordered());

    assert!(!set.add(5));
    assert!(set.check_ordered());
    assert_eq!(set.len(), 3);
}

/// Test that the sentinel alone behaves like a fresh insert of 0
#[test]
fn test_sentinel_on_empty_set() {
    let mut set = min_dense();
    assert!(set.add(SENTINEL));
    assert!(set.contains(0));
    assert!(set.contains(SENTINEL));
    assert!(!set.add(0));
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![0]);
}

/// Test that a repeated add changes neither the count nor the contents
#[test]
fn test_duplicate_add_is_idempotent() {
    let mut set = FingerprintSet::new();
    let mut rng = StdRng::seed_from_u64(7);
    let values: Vec<i64> = (0..5_000).map(|_| rng.random()).collect();
    set.extend(values.iter().copied());

    let len = set.len();
    let before: Vec<i64> = set.iter().collect();
    let stats = set.probe_stats();

    for &fp in &values {
        assert!(!set.add(fp), "{} reported as new on second add", fp);
    }

    assert_eq!(set.len(), len);
    assert_eq!(set.iter().collect::<Vec<_>>(), before);
    assert_eq!(set.probe_stats(), stats);
}

/// Test membership of inserted and never-inserted values against an oracle
#[test]
fn test_random_membership_matches_oracle() {
    let mut set = FingerprintSet::with_config(SetConfig::dense()).expect("Failed to create set");
    let mut oracle = FxHashSet::default();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..200_000 {
        let fp: i64 = rng.random();
        assert_eq!(set.add(fp), oracle.insert(stored(fp)));
    }

    assert_eq!(set.len(), oracle.len());
    assert!(set.check_ordered());

    for &fp in &oracle {
        assert!(set.contains(fp), "missing {}", fp);
    }

    let mut absent_rng = StdRng::seed_from_u64(0xabad_1dea);
    for _ in 0..200_000 {
        let fp: i64 = absent_rng.random();
        if oracle.contains(&stored(fp)) {
            continue;
        }
        assert!(!set.contains(fp), "false positive {}", fp);
    }
}

/// Test that every value survives repeated doublings and stays sorted
#[test]
fn test_growth_keeps_increasing_values() {
    let mut set = min_dense();
    let n = set.max_fill() * 5;
    let step = u64::MAX / n as u64;
    let values: Vec<i64> = (0..n as u64)
        .map(|i| (i * step) as i64 ^ i64::MIN)
        .collect();
    assert!(values.windows(2).all(|w| w[0] < w[1]));

    for &fp in &values {
        assert!(set.add(fp));
    }

    assert!(set.capacity() > BLOCK_SIZE, "no expansion happened");
    assert_eq!(set.len(), n);
    assert!(set.len() <= set.max_fill());
    assert!(set.check_ordered());
    for &fp in &values {
        assert!(set.contains(fp));
    }
    assert_eq!(set.iter().collect::<Vec<_>>(), values);
}

/// Test that membership holds after every insert, not just at the end
#[test]
fn test_membership_holds_after_each_insert() {
    let mut set = min_dense();
    let mut rng = StdRng::seed_from_u64(99);
    let mut inserted = Vec::new();

    for round in 0..20 {
        for _ in 0..5_000 {
            let fp: i64 = rng.random();
            set.add(fp);
            inserted.push(fp);
        }
        assert!(set.check_ordered(), "disorder after round {}", round);
        for &fp in &inserted {
            assert!(set.contains(fp));
        }
    }
}

/// First fingerprint whose home is `slots_from_end` slots before the end of
/// a one-block set
fn top_cluster_base(slots_from_end: usize) -> i64 {
    ((BLOCK_SIZE / 2 - slots_from_end) as i64) << 48
}

/// Test a clustered workload near the top of the range spilling into an
/// overflow block
#[test]
fn test_clustered_values_spill_into_overflow() {
    let mut set = min_dense();
    let base = top_cluster_base(100);
    assert_eq!(set.home_slot(base), BLOCK_SIZE - 100);

    // 300 values sharing the same home, 200 of them past the end
    for k in (0..300).rev() {
        assert!(set.add(base + k));
    }
    assert_eq!(set.overflow_block_count(), 1);
    assert_eq!(set.len(), 300);
    assert!(set.check_ordered());

    for k in 0..300 {
        assert!(set.contains(base + k));
    }
    assert!(!set.contains(base - 1));
    assert!(!set.contains(base + 300));
}

/// Test that overflow contents are redistributed by an expansion
#[test]
fn test_clustered_values_survive_expansion() {
    let mut set = min_dense();
    let base = top_cluster_base(100);
    for k in 0..300 {
        assert!(set.add(base + k));
    }
    assert_eq!(set.overflow_block_count(), 1);

    let n = set.max_fill() + 1_000;
    let step = u64::MAX / n as u64;
    let spread: Vec<i64> = (0..n as u64)
        .map(|i| (i * step) as i64 ^ i64::MIN)
        .filter(|&fp| fp < base)
        .collect();
    set.extend(spread.iter().copied());

    assert!(set.capacity() > BLOCK_SIZE, "no expansion happened");
    assert_eq!(set.len(), spread.len() + 300);
    assert!(set.check_ordered());
    for k in 0..300 {
        assert!(set.contains(base + k));
    }
    for &fp in &spread {
        assert!(set.contains(fp));
    }
}

/// Test the probe statistics on a sparse workload
#[test]
fn test_probe_stats_on_spread_values() {
    let mut set = FingerprintSet::with_capacity(1 << 16);
    let step = u64::MAX / 1_000;
    for i in 0..1_000u64 {
        set.add((i * step) as i64 ^ i64::MIN);
    }
    let stats = set.probe_stats();
    assert_eq!(stats.hits, 1_000);
    // Well spread values land on their home slot
    assert_eq!(stats.total_distance, 0);
    assert_eq!(stats.average_distance(), 0.0);
}

/// Test configuration errors surface from construction only
#[test]
fn test_invalid_config_rejected() {
    let err = FingerprintSet::with_config(SetConfig::new().with_load_factor(1.2)).unwrap_err();
    assert!(err.is_config_error());
    assert!(err.to_string().contains("1.2"));

    // Degenerate capacities are normalized instead
    let set = FingerprintSet::with_config(SetConfig::new().with_initial_capacity(0)).unwrap();
    assert_eq!(set.capacity(), BLOCK_SIZE);
}
