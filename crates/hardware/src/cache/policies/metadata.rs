//! Per-slot replacement metadata.
//!
//! Every populated way of a set owns one [`SlotMetadata`] record in the set's
//! slot arena. The record carries the recency timestamp used for LRU ordering
//! and the bookkeeping the wear-leveling swap exchanges between two slots:
//! the physical way the record describes and the medium backing it.

use std::fmt;

use serde::Serialize;

use crate::common::Tick;

/// Storage technology backing a way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Medium {
    /// Fast medium with abundant write endurance.
    Sram,
    /// Slow, write-limited non-volatile medium.
    Nvm,
}

impl Medium {
    /// Returns `true` for the write-limited medium.
    #[inline(always)]
    pub const fn is_slow(self) -> bool {
        matches!(self, Self::Nvm)
    }
}

impl fmt::Display for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sram => f.write_str("sram"),
            Self::Nvm => f.write_str("nvm"),
        }
    }
}

/// Physical way identifier.
///
/// Identifiers are handed out sequentially starting at 1 by the policy that
/// owns the set and are never reused; a swap only exchanges existing ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct WayId(pub u64);

impl fmt::Display for WayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "way{}", self.0)
    }
}

/// Replacement state of one populated way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotMetadata {
    pub(crate) last_touch: Tick,
    pub(crate) way: WayId,
    pub(crate) medium: Medium,
}

impl SlotMetadata {
    /// Creates a record for `way` on `medium`, last touched at `last_touch`.
    ///
    /// Policies create records through
    /// [`HdmLruPolicy::instantiate`](super::HdmLruPolicy::instantiate); this
    /// constructor exists for callers that rebuild a set from a snapshot.
    pub const fn new(way: WayId, medium: Medium, last_touch: Tick) -> Self {
        Self {
            last_touch,
            way,
            medium,
        }
    }

    /// Timestamp of the last access or fill.
    #[inline(always)]
    pub const fn last_touch(&self) -> Tick {
        self.last_touch
    }

    /// Physical way this record currently describes.
    #[inline(always)]
    pub const fn way(&self) -> WayId {
        self.way
    }

    /// Medium currently backing this record.
    #[inline(always)]
    pub const fn medium(&self) -> Medium {
        self.medium
    }

    /// Shorthand for `self.medium().is_slow()`.
    #[inline(always)]
    pub const fn is_slow(&self) -> bool {
        self.medium.is_slow()
    }

    /// Marks the slot as accessed at `now`.
    #[inline]
    pub const fn touch(&mut self, now: Tick) {
        self.last_touch = now;
    }

    /// Marks the slot as (re)filled at `now`.
    ///
    /// Same effect as [`touch`](Self::touch), called from the fill path.
    #[inline]
    pub const fn reset(&mut self, now: Tick) {
        self.last_touch = now;
    }

    /// Ages the slot to [`Tick::MIN`] so it becomes the next victim of its set.
    #[inline]
    pub const fn invalidate(&mut self) {
        self.last_touch = Tick::MIN;
    }
}
