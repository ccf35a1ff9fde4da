#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use fpset::FingerprintSet;
use libfuzzer_sys::fuzz_target;
use std::collections::BTreeSet;

/// Operations applied to both the set and a BTreeSet oracle
#[derive(Debug, Arbitrary, Clone)]
enum SetOp {
    /// Add one fingerprint
    Add(i64),

    /// Query one fingerprint
    Contains(i64),

    /// Add a run of neighbours sharing the top bits of `base`
    AddRun { base: i64, len: u8 },

    /// Add a fingerprint near the top of the range to force overflow blocks
    AddNearMax { offset: u16 },
}

fn stored(fp: i64) -> i64 {
    if fp == i64::MAX {
        0
    } else {
        fp
    }
}

fn add(set: &mut FingerprintSet, oracle: &mut BTreeSet<i64>, fp: i64) {
    assert_eq!(set.add(fp), oracle.insert(stored(fp)), "add({})", fp);
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(ops) = Vec::<SetOp>::arbitrary(&mut u) else {
        return;
    };

    let mut set = FingerprintSet::with_capacity_and_load_factor(0, 0.85).unwrap();
    let mut oracle = BTreeSet::new();

    for op in ops.iter().take(4096) {
        match *op {
            SetOp::Add(fp) => add(&mut set, &mut oracle, fp),
            SetOp::Contains(fp) => {
                assert_eq!(set.contains(fp), oracle.contains(&stored(fp)), "contains({})", fp)
            }
            SetOp::AddRun { base, len } => {
                for k in 0..len as i64 {
                    add(&mut set, &mut oracle, base.wrapping_add(k));
                }
            }
            SetOp::AddNearMax { offset } => {
                add(&mut set, &mut oracle, i64::MAX - 1 - offset as i64)
            }
        }
    }

    assert_eq!(set.len(), oracle.len());
    assert!(set.check_ordered());
    assert!(set.iter().eq(oracle.iter().copied()));
});
