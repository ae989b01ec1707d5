//! Configuration system for the hybrid cache model.
//!
//! This module defines the configuration structures used to parameterize the
//! cache and its replacement policy. It provides:
//! 1. **Defaults:** Baseline geometry, write-skew threshold and latencies.
//! 2. **Structures:** `CacheConfig` (geometry and policy) and `TimingConfig`
//!    (per-medium write costs), grouped under the root `Config`.
//! 3. **Loading:** JSON deserialization with per-field defaults and geometry
//!    validation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;

/// Default configuration constants.
///
/// These values apply to every field missing from a JSON document.
mod defaults {
    /// Default cache size in bytes (32 KiB).
    pub const CACHE_SIZE: usize = 32 * 1024;

    /// Default cache line size in bytes.
    pub const CACHE_LINE: usize = 64;

    /// Default associativity.
    pub const CACHE_WAYS: usize = 8;

    /// Default write-skew threshold.
    ///
    /// With 8 ways this yields 4 SRAM ways and 4 NVM ways per set.
    pub const WRITE_SKEW_THRESHOLD: u64 = 3;

    /// Tag lookup latency in cycles, paid on every access.
    pub const HIT_LATENCY: u64 = 2;

    /// Cycles to write one line into SRAM.
    pub const SRAM_WRITE_LATENCY: u64 = 1;

    /// Cycles to write one line into NVM.
    pub const NVM_WRITE_LATENCY: u64 = 10;

    /// Cycles to fetch a line from, or write one back to, the next level.
    pub const NEXT_LEVEL_LATENCY: u64 = 100;
}

/// Cache geometry and replacement policy parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Total capacity in bytes.
    pub size_bytes: usize,
    /// Line size in bytes; must be a power of two.
    pub line_bytes: usize,
    /// Associativity.
    pub ways: usize,
    /// SRAM allocations per set beyond the first before new ways default
    /// to NVM.
    pub write_skew_threshold: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
            write_skew_threshold: defaults::WRITE_SKEW_THRESHOLD,
        }
    }
}

impl CacheConfig {
    /// Checks that the geometry describes a whole number of sets.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroWays`], [`ConfigError::BadLineSize`] or
    /// [`ConfigError::BadGeometry`] for unusable geometries.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ways == 0 {
            return Err(ConfigError::ZeroWays);
        }
        if !self.line_bytes.is_power_of_two() {
            return Err(ConfigError::BadLineSize(self.line_bytes));
        }
        let bad_geometry = |set_bytes| ConfigError::BadGeometry {
            size: self.size_bytes,
            set_bytes,
        };
        let set_bytes = self
            .line_bytes
            .checked_mul(self.ways)
            .ok_or_else(|| bad_geometry(usize::MAX))?;
        if self.size_bytes == 0 || self.size_bytes % set_bytes != 0 {
            return Err(bad_geometry(set_bytes));
        }
        Ok(())
    }

    /// Number of sets described by this geometry.
    ///
    /// Only meaningful after [`validate`](Self::validate) succeeded.
    pub const fn num_sets(&self) -> usize {
        self.size_bytes / (self.line_bytes * self.ways)
    }
}

/// Per-medium timing parameters, in cycles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Lookup latency paid on every access.
    pub hit_latency: u64,
    /// Cost of writing a line into SRAM (fill or write hit).
    pub sram_write_latency: u64,
    /// Cost of writing a line into NVM (fill or write hit).
    pub nvm_write_latency: u64,
    /// Cost of a fetch from, or write-back to, the next level.
    pub next_level_latency: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            hit_latency: defaults::HIT_LATENCY,
            sram_write_latency: defaults::SRAM_WRITE_LATENCY,
            nvm_write_latency: defaults::NVM_WRITE_LATENCY,
            next_level_latency: defaults::NEXT_LEVEL_LATENCY,
        }
    }
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use hdm_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.cache.ways, 8);
/// assert_eq!(config.cache.write_skew_threshold, 3);
/// ```
///
/// Deserializing from JSON; missing fields keep their defaults:
///
/// ```
/// use hdm_core::config::Config;
///
/// let config = Config::from_json(r#"{ "cache": { "ways": 4, "write_skew_threshold": 1 } }"#)
///     .unwrap();
/// assert_eq!(config.cache.ways, 4);
/// assert_eq!(config.cache.line_bytes, 64);
/// assert_eq!(config.timing.nvm_write_latency, 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Geometry and replacement policy.
    pub cache: CacheConfig,
    /// Latencies.
    pub timing: TimingConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the geometry
    /// errors of [`CacheConfig::validate`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.cache.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`from_json`](Self::from_json).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
