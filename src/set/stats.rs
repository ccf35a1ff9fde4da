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

//! Probe distance statistics
//!
//! Updated by every `add` that stores a new fingerprint: the distance is the
//! number of slots between the fingerprint's home slot and the slot it was
//! written to. Redistribution during growth does not count.

/// Accumulated probe distances of successful inserts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeStats {
    /// Sum of home-to-placement distances, in slots
    pub total_distance: u64,
    /// Number of inserts measured
    pub hits: u64,
}

impl ProbeStats {
    #[inline(always)]
    pub(crate) fn record(&mut self, distance: usize) {
        self.total_distance += distance as u64;
        self.hits += 1;
    }

    /// Mean distance per measured insert, 0.0 before the first one
    pub fn average_distance(&self) -> f64 {
        if self.hits == 0 {
            0.0
        } else {
            self.total_distance as f64 / self.hits as f64
        }
    }
}

impl std::fmt::Display for ProbeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ProbeStats: hits={} total_distance={} average={:.3}",
            self.hits,
            self.total_distance,
            self.average_distance()
        )
    }
}
