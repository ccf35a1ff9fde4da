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

//! Fingerprint set configuration
//!

use super::error::{Error, Result};
use crate::set::BLOCK_SIZE;

/// Load factor used when none is given
pub const DEFAULT_LOAD_FACTOR: f64 = 0.5;

/// Capacity hint used when none is given (one block)
pub const DEFAULT_INITIAL_CAPACITY: usize = BLOCK_SIZE;

/// Construction parameters for a [`FingerprintSet`](crate::FingerprintSet)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetConfig {
    /// Expected number of fingerprints
    /// Divided by the load factor and rounded up to a power of two, with a
    /// minimum of one block. Degenerate values (0, tiny, huge) are clamped.
    /// Default: 65536
    pub initial_capacity: usize,

    /// Fraction of slots that may be filled before the set doubles
    /// Must be in (0, 1).
    /// Default: 0.5
    pub load_factor: f64,
}

impl Default for SetConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl SetConfig {
    /// Creates a new SetConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a SetConfig that packs slots tightly
    /// Longer displacement chains, less memory per fingerprint.
    pub fn dense() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: 0.85,
        }
    }

    /// Creates a SetConfig that keeps half the slots empty
    pub fn sparse() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: 0.5,
        }
    }

    /// Sets the expected number of fingerprints
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Sets the load factor threshold
    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Checks that the load factor is a number in (0, 1)
    pub fn validate(&self) -> Result<()> {
        if self.load_factor > 0.0 && self.load_factor < 1.0 {
            Ok(())
        } else {
            Err(Error::invalid_load_factor(self.load_factor))
        }
    }
}
