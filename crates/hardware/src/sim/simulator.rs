//! Simulator: owns the cache and the clock that timestamps its accesses.

use tracing::debug;

use super::trace::{TraceOp, TraceRecord};
use crate::cache::{AccessOutcome, HybridCache};
use crate::common::{ConfigError, Tick};
use crate::config::Config;
use crate::stats::HdmStats;

/// Trace-driven simulator.
///
/// The clock advances by one tick per record, starting at tick 1 so that no
/// live line ever shares [`Tick::MIN`] with an invalidated one.
#[derive(Debug)]
pub struct Simulator {
    /// The cache under simulation.
    pub cache: HybridCache,
    now: Tick,
}

impl Simulator {
    /// Creates a simulator with an empty cache.
    ///
    /// # Errors
    ///
    /// Returns the geometry errors of [`HybridCache::new`].
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            cache: HybridCache::new(config)?,
            now: Tick::MIN,
        })
    }

    /// Tick of the most recently replayed record.
    pub const fn now(&self) -> Tick {
        self.now
    }

    /// Statistics collected so far.
    pub const fn stats(&self) -> &HdmStats {
        self.cache.stats()
    }

    /// Replays one record.
    ///
    /// # Returns
    ///
    /// The access outcome for reads and writes, `None` for invalidations.
    pub fn step(&mut self, record: TraceRecord) -> Option<AccessOutcome> {
        self.now = self.now.advance(1);
        match record.op {
            TraceOp::Read => Some(self.cache.access(record.addr, false, self.now)),
            TraceOp::Write => Some(self.cache.access(record.addr, true, self.now)),
            TraceOp::Invalidate => {
                if !self.cache.invalidate(record.addr) {
                    debug!(addr = record.addr, "invalidate of absent line ignored");
                }
                None
            }
        }
    }

    /// Replays every record in order.
    pub fn run<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = TraceRecord>,
    {
        for record in records {
            let _ = self.step(record);
        }
        debug!(ticks = self.now.val(), "trace replay finished");
    }
}
