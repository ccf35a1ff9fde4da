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

//! Block-based sorted fingerprint set
//!
//! - [`block`] - Fixed-size slot blocks and the empty sentinel
//! - [`mapping`] - Fingerprint to home slot projection and capacity state
//! - [`fingerprint_set`] - Insert, lookup and doubling expansion
//! - [`stats`] - Probe distance counters
//! - [`validate`] - Sort-order verification

pub mod block;
pub mod fingerprint_set;
pub mod mapping;
pub mod stats;
pub mod validate;

pub use block::{BLOCK_MASK, BLOCK_SIZE, BLOCK_SIZE_SHIFT, EMPTY};
pub use fingerprint_set::FingerprintSet;
pub use mapping::{CapacityState, MAX_CAPACITY};
pub use stats::ProbeStats;
pub use validate::OrderReport;
