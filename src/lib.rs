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

//! # fpset - Dense in-memory set of 64-bit fingerprints
//!
//! A cache-friendly alternative to a general hash set for deduplication and
//! fingerprint tracking with millions to billions of entries.
//!
//! ## Key Features
//!
//! - **Sorted open addressing** - All fingerprints form one ascending array
//!   split into 65536-slot blocks; lookups stop at the first larger value
//! - **Distribution-based placement** - The home slot is the fingerprint's
//!   top bits, not a hash modulo, so nearby values stay nearby
//! - **Local growth** - Doubling interleaves empty blocks between old ones and
//!   moves each value at most a short hop
//! - **Insert-only** - No deletion, no internal locking
//!
//! ## Quick Start
//!
//! ```rust
//! use fpset::{FingerprintSet, SetConfig};
//!
//! let mut set = FingerprintSet::with_config(SetConfig::dense()).unwrap();
//!
//! assert!(set.add(0x5eed_cafe));
//! assert!(!set.add(0x5eed_cafe));
//! assert!(set.contains(0x5eed_cafe));
//! assert!(set.check_ordered());
//! ```
//!
//! ## Sentinel
//!
//! `i64::MAX` marks empty slots. Adding it stores `0` instead, so `0` and
//! `i64::MAX` cannot be told apart.
//!
//! ## Modules
//!
//! - [`set`] - The set, block storage and position mapping
//! - [`core`] - Configuration ([`SetConfig`]) and [`Error`]

// Use mimalloc as global allocator when feature is enabled
#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod core;
pub mod set;

// Re-export main types for convenience
pub use crate::core::{Error, Result, SetConfig, DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR};

pub use set::{
    CapacityState, FingerprintSet, OrderReport, ProbeStats, BLOCK_SIZE, BLOCK_SIZE_SHIFT, EMPTY,
    MAX_CAPACITY,
};

#[cfg(test)]
mod size_tests {
    use super::*;

    #[test]
    fn check_set_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FingerprintSet>();
    }

    #[test]
    fn check_type_sizes() {
        use std::mem::size_of;
        assert_eq!(size_of::<i64>() * BLOCK_SIZE, 512 * 1024);
        assert!(size_of::<CapacityState>() <= 48);
    }
}
