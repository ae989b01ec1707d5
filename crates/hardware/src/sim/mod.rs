//! Trace replay.
//!
//! Reads memory-access traces and replays them against a [`HybridCache`],
//! supplying the simulation clock the replacement policy orders by.
//!
//! [`HybridCache`]: crate::cache::HybridCache

/// Trace-driven simulator.
pub mod simulator;

/// Trace file format and parser.
pub mod trace;

pub use simulator::Simulator;
pub use trace::{TraceOp, TraceRecord};
