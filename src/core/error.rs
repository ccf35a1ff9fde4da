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

//! Error types for fpset
//!
//! Only construction can fail. Once a set exists, `add` and `contains` are
//! infallible: running out of room triggers growth, never an error.

use thiserror::Error;

/// Result type alias for fpset operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a [`FingerprintSet`](crate::FingerprintSet)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Load factor is NaN or outside the open interval (0, 1)
    #[error("invalid load factor {0}: must be in the open interval (0, 1)")]
    InvalidLoadFactor(f64),
}

impl Error {
    /// Create a new InvalidLoadFactor error
    pub fn invalid_load_factor(load_factor: f64) -> Self {
        Error::InvalidLoadFactor(load_factor)
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::InvalidLoadFactor(_))
    }
}
