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

//! Position mapping and capacity bookkeeping
//!
//! A fingerprint's home slot is its top `log2(capacity)` bits, read as a
//! signed number and shifted up by half the capacity:
//!
//! ```text
//! home = (fingerprint >> (64 - log2(capacity))) + capacity / 2
//! ```
//!
//! No hash mixing is applied, so the mapping is monotone: a larger fingerprint
//! never has a smaller home. Doubling the capacity reveals exactly one more
//! bit, so the new home of a fingerprint is `2 * old_home` or
//! `2 * old_home + 1`. Expansion relies on this to move values only a short
//! distance.

use super::block::{canonical, BLOCK_SIZE, BLOCK_SIZE_SHIFT};

/// Largest slot count a set will allocate. Larger hints are clamped.
pub const MAX_CAPACITY: usize = 1 << (usize::BITS - 2);

/// Turns a capacity hint into a slot count: the hint divided by the load
/// factor, at least one block, rounded up to a power of two.
pub fn normalize_capacity(hint: usize, load_factor: f64) -> usize {
    // `as` saturates, so NaN becomes 0 and huge quotients become usize::MAX
    let wanted = (hint as f64 / load_factor) as usize;
    wanted
        .clamp(BLOCK_SIZE, MAX_CAPACITY)
        .next_power_of_two()
}

/// Capacity-derived parameters. All fields come from a single capacity value
/// and are only ever replaced together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityState {
    half_size: usize,
    bucket_factor: u32,
    bucket_shift: u32,
    bucket_mask: u64,
    max_fill: usize,
    load_factor: f64,
}

impl CapacityState {
    /// `capacity` must be a power of two no smaller than one block.
    pub fn new(capacity: usize, load_factor: f64) -> Self {
        debug_assert!(capacity.is_power_of_two());
        debug_assert!(capacity >= BLOCK_SIZE);

        let bucket_factor = capacity.trailing_zeros() - BLOCK_SIZE_SHIFT;
        Self {
            half_size: capacity >> 1,
            bucket_factor,
            bucket_shift: Self::shift_for(bucket_factor),
            bucket_mask: ((capacity as u64) << 1).wrapping_sub(1),
            max_fill: Self::max_fill_for(capacity, load_factor),
            load_factor,
        }
    }

    /// State after one doubling
    pub fn doubled(&self) -> Self {
        let half_size = self.half_size * 2;
        let bucket_factor = self.bucket_factor + 1;
        Self {
            half_size,
            bucket_factor,
            bucket_shift: Self::shift_for(bucket_factor),
            bucket_mask: (self.bucket_mask << 1) | 1,
            max_fill: Self::max_fill_for(half_size * 2, self.load_factor),
            load_factor: self.load_factor,
        }
    }

    #[inline(always)]
    fn shift_for(bucket_factor: u32) -> u32 {
        64 - (BLOCK_SIZE_SHIFT + bucket_factor)
    }

    #[inline]
    fn max_fill_for(capacity: usize, load_factor: f64) -> usize {
        ((load_factor * capacity as f64) as usize).min(capacity - 1)
    }

    /// Global slot index where `fingerprint` would sit absent collisions.
    /// Always in `[0, capacity)`.
    #[inline(always)]
    pub fn home_slot(&self, fingerprint: i64) -> usize {
        let centered = canonical(fingerprint) >> self.bucket_shift;
        (centered + self.half_size as i64) as usize
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.half_size * 2
    }

    #[inline(always)]
    pub fn half_size(&self) -> usize {
        self.half_size
    }

    /// Number of blocks addressed directly by [`home_slot`](Self::home_slot)
    #[inline(always)]
    pub fn nominal_blocks(&self) -> usize {
        self.capacity() >> BLOCK_SIZE_SHIFT
    }

    #[inline(always)]
    pub fn bucket_factor(&self) -> u32 {
        self.bucket_factor
    }

    #[inline(always)]
    pub fn bucket_shift(&self) -> u32 {
        self.bucket_shift
    }

    #[inline(always)]
    pub fn bucket_mask(&self) -> u64 {
        self.bucket_mask
    }

    /// Live count above which the set doubles
    #[inline(always)]
    pub fn max_fill(&self) -> usize {
        self.max_fill
    }

    #[inline(always)]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }
}
