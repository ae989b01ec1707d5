//! Hybrid SRAM/NVM cache replacement library.
//!
//! This crate models the replacement decisions of a cache whose sets mix a
//! fast medium (SRAM) with a slow, write-limited one (NVM):
//! 1. **Policy:** LRU victim selection with wear-leveling swaps, per-slot
//!    metadata lifecycle and medium assignment on first population.
//! 2. **Cache:** A tag-only set-associative model driving the policy.
//! 3. **Simulation:** Trace parsing, replay, configuration and statistics.

/// Cache model and replacement policies.
pub mod cache;
/// Common types (ticks, errors).
pub mod common;
/// Cache configuration (defaults, geometry, timing).
pub mod config;
/// Trace parsing and replay.
pub mod sim;
/// Statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// The cache model; construct with `HybridCache::new`.
pub use crate::cache::HybridCache;
/// Trace-driven simulator.
pub use crate::sim::Simulator;
