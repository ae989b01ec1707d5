//! Common types shared by the cache model, the replacement policy, and the
//! trace driver.
//!
//! This module provides:
//! 1. **Time:** The opaque [`Tick`] timestamp used for all recency comparisons.
//! 2. **Error Handling:** Recoverable configuration and trace errors.

/// Error types for configuration and trace handling.
pub mod error;

/// Simulation timestamps.
pub mod time;

pub use error::{ConfigError, TraceError};
pub use time::Tick;
