//! Simulation timestamps.
//!
//! A [`Tick`] is supplied by whatever clock drives the cache (the trace
//! replayer in this crate, or an external simulator). The replacement policy
//! only ever compares ticks, so the unit is irrelevant as long as the clock is
//! monotonically non-decreasing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, totally ordered simulation timestamp.
///
/// Lower values are older. [`Tick::MIN`] is reserved for invalidated slots so
/// that they sort ahead of every live line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tick(pub u64);

impl Tick {
    /// The oldest representable tick.
    pub const MIN: Self = Self(0);

    /// Returns the raw counter value.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }

    /// Returns the tick `n` steps later, saturating at `u64::MAX`.
    #[inline]
    #[must_use]
    pub const fn advance(self, n: u64) -> Self {
        Self(self.0.saturating_add(n))
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
