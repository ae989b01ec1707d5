//! Shared fixtures for the hybrid cache tests.

use hdm_core::cache::policies::{Medium, SlotMetadata, WayId};
use hdm_core::common::Tick;
use hdm_core::config::{CacheConfig, Config, TimingConfig};


/// Installs a test-friendly `tracing` subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("hdm_core=debug")
        .try_init();
}

/// Builds a slot record.
pub fn slot(way: u64, medium: Medium, tick: u64) -> SlotMetadata {
    SlotMetadata::new(WayId(way), medium, Tick(tick))
}

/// Handles `0..n`, the candidate list of a full set.
pub fn all_handles(n: usize) -> Vec<usize> {
    (0..n).collect()
}

/// Latencies used by every cache test:
/// hit 2, SRAM write 1, NVM write 10, next level 100.
pub fn test_timing() -> TimingConfig {
    TimingConfig {
        hit_latency: 2,
        sram_write_latency: 1,
        nvm_write_latency: 10,
        next_level_latency: 100,
    }
}

/// A cache of `sets` sets of `ways` 64-byte lines.
///
/// Set index = `(addr / 64) % sets`, tag = `addr / (64 * sets)`.
pub fn test_config(sets: usize, ways: usize, write_skew_threshold: u64) -> Config {
    Config {
        cache: CacheConfig {
            size_bytes: sets * ways * 64,
            line_bytes: 64,
            ways,
            write_skew_threshold,
        },
        timing: test_timing(),
    }
}
