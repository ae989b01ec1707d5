//! Per-set policy bookkeeping.

use serde::Serialize;

use super::metadata::WayId;

/// Mutable wear-leveling history of a single cache set.
///
/// One instance belongs to exactly one set; the cache only exposes it
/// read-only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PolicyState {
    /// Ways ever assigned to SRAM. Cumulative: evictions and swaps do not
    /// decrement it.
    fast_count: u64,
    /// Last way id handed out; ids start at 1.
    way_counter: u64,
    /// Way evicted by the previous victim selection, if it is still pending
    /// a repeat check.
    last_evicted: Option<WayId>,
    /// New ways go to SRAM until `write_skew_threshold + 1` have been
    /// assigned there.
    write_skew_threshold: u64,
}

impl PolicyState {
    /// Creates empty state with the given write-skew threshold.
    pub const fn new(write_skew_threshold: u64) -> Self {
        Self {
            fast_count: 0,
            way_counter: 0,
            last_evicted: None,
            write_skew_threshold,
        }
    }

    /// Number of ways assigned to SRAM so far.
    pub const fn fast_count(&self) -> u64 {
        self.fast_count
    }

    /// Last way id handed out (0 before the first allocation).
    pub const fn way_counter(&self) -> u64 {
        self.way_counter
    }

    /// Way evicted on the previous selection, or `None` when no repeat is
    /// pending.
    pub const fn last_evicted(&self) -> Option<WayId> {
        self.last_evicted
    }

    /// Configured write-skew threshold.
    pub const fn write_skew_threshold(&self) -> u64 {
        self.write_skew_threshold
    }

    pub(crate) const fn next_way_id(&mut self) -> WayId {
        self.way_counter += 1;
        WayId(self.way_counter)
    }

    /// Claims an SRAM allocation if the threshold still allows one.
    pub(crate) const fn claim_fast(&mut self) -> bool {
        if self.fast_count > self.write_skew_threshold {
            false
        } else {
            self.fast_count += 1;
            true
        }
    }

    pub(crate) const fn record_eviction(&mut self, way: WayId) {
        self.last_evicted = Some(way);
    }

    pub(crate) const fn clear_last_evicted(&mut self) {
        self.last_evicted = None;
    }
}
