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

//! Sort-order validation
//!
//! Walks every slot of every block and checks that the live fingerprints form
//! one ascending run. Meant for tests and debugging; it touches every slot.

use log::{debug, warn};

use super::block::EMPTY;
use super::FingerprintSet;

/// Result of a full order scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderReport {
    /// Live fingerprints not smaller than their predecessor
    pub in_order: u64,
    /// Live fingerprints smaller than their predecessor
    pub out_of_order: u64,
    /// Live count tracked by the set
    pub used: usize,
    /// Slots scanned, overflow blocks included
    pub slots: usize,
}

impl OrderReport {
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.out_of_order == 0
    }
}

impl std::fmt::Display for OrderReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "used/size: {}/{} good: {} bad: {}",
            self.used, self.slots, self.in_order, self.out_of_order
        )
    }
}

impl FingerprintSet {
    /// Scans all slots and counts in-order and out-of-order fingerprints
    pub fn order_report(&self) -> OrderReport {
        let mut last = i64::MIN;
        let mut in_order = 0;
        let mut out_of_order = 0;

        let slots = self.blocks.slot_count();
        for slot in 0..slots {
            let fp = self.blocks.get(slot);
            if fp == EMPTY {
                continue;
            }
            if fp >= last {
                in_order += 1;
            } else {
                warn!("fingerprint out of order at slot {}", slot);
                out_of_order += 1;
            }
            last = fp;
        }

        OrderReport {
            in_order,
            out_of_order,
            used: self.used,
            slots,
        }
    }

    /// Returns true when every live fingerprint is in ascending slot order
    pub fn check_ordered(&self) -> bool {
        let report = self.order_report();
        debug!("order check: {}", report);
        report.is_ordered()
    }
}
