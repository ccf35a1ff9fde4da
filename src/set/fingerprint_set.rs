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

//! Sorted open-addressing fingerprint set
// - Fingerprints live in one logical array kept sorted ascending, so lookups
//   stop at the first slot holding a value >= the target
// - Inserts walk forward from the home slot and push larger values one slot
//   ahead (insertion-sort style) until an empty slot absorbs the chain
// - i64::MAX is the empty sentinel; inserting it stores 0 instead, so the two
//   are indistinguishable. Callers needing exactness for 0 must pre-filter.
// - No internal synchronization. `add` takes &mut self; wrap the set in a lock
//   or shard it to share writes across threads.

use log::{debug, trace};

use super::block::{canonical, join_slot, new_block, split_slot, BlockList, EMPTY};
use super::mapping::{normalize_capacity, CapacityState};
use super::stats::ProbeStats;
use crate::core::{Result, SetConfig, DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR};

/// Insert-only set of 64-bit fingerprints.
///
/// # Example
/// ```
/// use fpset::FingerprintSet;
///
/// let mut set = FingerprintSet::with_capacity_and_load_factor(1_000, 0.85).unwrap();
/// assert!(set.add(42));
/// assert!(!set.add(42));
/// assert!(set.contains(42));
/// assert!(!set.contains(7));
/// assert!(set.check_ordered());
/// ```
pub struct FingerprintSet {
    pub(super) blocks: BlockList,
    pub(super) state: CapacityState,
    pub(super) used: usize,
    pub(super) stats: ProbeStats,
}

impl Default for FingerprintSet {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }
}

impl FingerprintSet {
    /// Creates a set sized for one block of fingerprints at the default load
    /// factor
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set expected to hold `capacity` fingerprints at the default
    /// load factor
    pub fn with_capacity(capacity: usize) -> Self {
        Self::build(capacity, DEFAULT_LOAD_FACTOR)
    }

    /// Creates a set expected to hold `capacity` fingerprints, growing once
    /// more than `load_factor` of its slots are used
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f64) -> Result<Self> {
        Self::with_config(
            SetConfig::new()
                .with_initial_capacity(capacity)
                .with_load_factor(load_factor),
        )
    }

    /// Creates a set from a validated configuration
    pub fn with_config(config: SetConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config.initial_capacity, config.load_factor))
    }

    fn build(hint: usize, load_factor: f64) -> Self {
        let capacity = normalize_capacity(hint, load_factor);
        let state = CapacityState::new(capacity, load_factor);

        debug!(
            "fingerprint set: capacity={:#x} max_fill={} half_size={:#x} bucket_factor={} bucket_mask={:#x}",
            state.capacity(),
            state.max_fill(),
            state.half_size(),
            state.bucket_factor(),
            state.bucket_mask()
        );

        Self {
            blocks: BlockList::with_blocks(state.nominal_blocks()),
            state,
            used: 0,
            stats: ProbeStats::default(),
        }
    }

    /// Number of fingerprints stored
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.used
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Slots addressed by the position mapping (overflow blocks excluded)
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.state.capacity()
    }

    /// Live count above which the next insert doubles the set
    #[inline(always)]
    pub fn max_fill(&self) -> usize {
        self.state.max_fill()
    }

    #[inline(always)]
    pub fn load_factor(&self) -> f64 {
        self.state.load_factor()
    }

    /// Blocks currently allocated, overflow included
    #[inline(always)]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    #[inline(always)]
    pub fn nominal_block_count(&self) -> usize {
        self.state.nominal_blocks()
    }

    #[inline(always)]
    pub fn overflow_block_count(&self) -> usize {
        self.blocks.len() - self.state.nominal_blocks()
    }

    /// Capacity-derived parameters currently in effect
    #[inline(always)]
    pub fn capacity_state(&self) -> &CapacityState {
        &self.state
    }

    /// Global slot index `fingerprint` maps to before any displacement
    #[inline(always)]
    pub fn home_slot(&self, fingerprint: i64) -> usize {
        self.state.home_slot(fingerprint)
    }

    #[inline(always)]
    pub fn probe_stats(&self) -> ProbeStats {
        self.stats
    }

    pub fn reset_probe_stats(&mut self) {
        self.stats = ProbeStats::default();
    }

    /// Inserts a fingerprint. Returns false if it was already present.
    ///
    /// May double the set before returning.
    pub fn add(&mut self, fingerprint: i64) -> bool {
        let fingerprint = canonical(fingerprint);
        let home = self.state.home_slot(fingerprint);

        let placed = match self.displace(home, fingerprint, true) {
            Some(slot) => slot,
            None => return false,
        };

        self.used += 1;
        self.stats.record(placed - home);
        if self.used > self.state.max_fill() {
            self.expand();
        }
        true
    }

    /// Returns true if `fingerprint` was added before.
    ///
    /// The scan stops at the first slot holding a value >= the target, since
    /// nothing smaller can follow it.
    pub fn contains(&self, fingerprint: i64) -> bool {
        let fingerprint = canonical(fingerprint);
        let (first_block, mut offset) = split_slot(self.state.home_slot(fingerprint));

        for block in self.blocks.blocks_from(first_block) {
            for &current in &block[offset..] {
                if current >= fingerprint {
                    return current == fingerprint;
                }
            }
            offset = 0;
        }
        false
    }

    /// Fingerprints in ascending order
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.blocks.values()
    }

    /// Runs the displacement chain for `fingerprint` starting at `home`.
    ///
    /// Returns the slot the requested fingerprint was written to, or None if
    /// `reject_duplicates` is set and it was already present. Falls back to an
    /// overflow block when the chain runs past the last block.
    fn displace(&mut self, home: usize, fingerprint: i64, reject_duplicates: bool) -> Option<usize> {
        let (first_block, mut offset) = split_slot(home);
        let mut carried = fingerprint;
        let mut placed = None;

        for (block_id, block) in self.blocks.blocks_from_mut(first_block) {
            for (i, slot) in block[offset..].iter_mut().enumerate() {
                let current = *slot;
                if current < carried {
                    continue;
                }
                if current == carried {
                    // Displaced values are unique, so only the requested
                    // fingerprint can meet its twin here
                    if reject_duplicates {
                        return None;
                    }
                    continue;
                }

                *slot = carried;
                if placed.is_none() {
                    placed = Some(join_slot(block_id, offset + i));
                }
                if current == EMPTY {
                    return placed;
                }
                carried = current;
            }
            offset = 0;
        }

        let slot = self.blocks.push_overflow(carried);
        trace!(
            "overflow block {} created for fingerprint {}",
            self.blocks.len() - 1,
            carried
        );
        Some(placed.unwrap_or(slot))
    }

    /// Insert used while redistributing: no duplicate check, no growth
    #[inline]
    fn insert_unchecked(&mut self, fingerprint: i64) {
        let home = self.state.home_slot(fingerprint);
        self.displace(home, fingerprint, false);
    }

    /// Doubles the capacity.
    ///
    /// Old block `i` moves to `2i` with an empty block at `2i + 1`. One more
    /// bit of the fingerprint now selects the home, so every value's new home
    /// is within the two blocks its old block turned into, or just before.
    /// Each even block is swapped for a cleared scratch block and its values
    /// reinserted; the emptied block becomes the next scratch. Old overflow
    /// blocks are reinserted last and dropped.
    fn expand(&mut self) {
        let nominal = self.state.nominal_blocks();
        let old_capacity = self.state.capacity();

        let overflow = self.blocks.interleave(nominal);
        self.state = self.state.doubled();

        let mut scratch = new_block();
        for block_id in (0..nominal * 2).step_by(2) {
            let mut detached = self.blocks.replace(block_id, scratch);
            for slot in detached.iter_mut() {
                if *slot != EMPTY {
                    self.insert_unchecked(*slot);
                    *slot = EMPTY;
                }
            }
            scratch = detached;
        }

        let overflow_blocks = overflow.len();
        for block in overflow {
            for &fp in block.iter() {
                if fp != EMPTY {
                    self.insert_unchecked(fp);
                }
            }
        }

        debug!(
            "fingerprint set expanded: capacity {:#x} -> {:#x}, used={} max_fill={} overflow_reinserted={} overflow_now={}",
            old_capacity,
            self.state.capacity(),
            self.used,
            self.state.max_fill(),
            overflow_blocks,
            self.overflow_block_count()
        );
    }
}

impl std::fmt::Debug for FingerprintSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FingerprintSet")
            .field("len", &self.used)
            .field("capacity", &self.state.capacity())
            .field("max_fill", &self.state.max_fill())
            .field("blocks", &self.blocks.len())
            .field("overflow_blocks", &self.overflow_block_count())
            .finish()
    }
}

impl Extend<i64> for FingerprintSet {
    fn extend<I: IntoIterator<Item = i64>>(&mut self, iter: I) {
        for fingerprint in iter {
            self.add(fingerprint);
        }
    }
}

impl FromIterator<i64> for FingerprintSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
