// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Run configuration
//!
//! Values come from [`DftConfig::default`] and can be overridden from the
//! environment with [`DftConfig::from_env`]:
//!
//! - `DFT_MAX_SIZE` - largest accepted matrix side length
//! - `DFT_LOG_LEVEL` - `off`, `error`, `warn`, `info`, `debug` or `trace`
//! - `DFT_PARTICIPANTS` - participant count for the in-process runtime

use std::env;
use std::str::FromStr;

use log::LevelFilter;

use crate::error::{DftError, DftResult};

/// Default matrix capacity, the largest side length a run accepts
pub const DEFAULT_MAX_SIZE: usize = 512;

pub const ENV_MAX_SIZE: &str = "DFT_MAX_SIZE";
pub const ENV_LOG_LEVEL: &str = "DFT_LOG_LEVEL";
pub const ENV_PARTICIPANTS: &str = "DFT_PARTICIPANTS";

/// Configuration shared by every participant of a run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DftConfig {
    /// Largest matrix side length accepted at input and on the wire
    pub max_size: usize,
    /// Log level handed to the logger at startup
    pub log_level: LevelFilter,
    /// Participant count used when running in-process
    pub participants: usize,
}

impl Default for DftConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            log_level: LevelFilter::Warn,
            participants: 1,
        }
    }
}

impl DftConfig {
    /// Set the matrix capacity
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the log level
    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }

    /// Set the in-process participant count
    pub fn with_participants(mut self, participants: usize) -> Self {
        self.participants = participants;
        self
    }

    /// Build a config from defaults plus environment overrides
    pub fn from_env() -> DftResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> DftResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_MAX_SIZE) {
            config.max_size = parse_positive(ENV_MAX_SIZE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_LOG_LEVEL) {
            config.log_level = LevelFilter::from_str(raw.trim()).map_err(|_| {
                DftError::Invalid(format!("{} has unknown level '{}'", ENV_LOG_LEVEL, raw))
            })?;
        }
        if let Some(raw) = lookup(ENV_PARTICIPANTS) {
            config.participants = parse_positive(ENV_PARTICIPANTS, &raw)?;
        }

        Ok(config)
    }
}

fn parse_positive(key: &str, raw: &str) -> DftResult<usize> {
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(DftError::Invalid(format!(
            "{} must be a positive integer, got '{}'",
            key, raw
        ))),
        Ok(value) => Ok(value),
    }
}
