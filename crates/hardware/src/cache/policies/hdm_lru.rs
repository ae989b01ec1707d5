//! Hybrid-memory LRU replacement with wear-leveling.
//!
//! Plain LRU over a set whose ways are split between SRAM and NVM. On top of
//! the recency order the policy watches for the same NVM way being chosen as
//! victim on two consecutive selections. When that happens the hot NVM slot
//! trades places with the coldest SRAM slot: the two records exchange their
//! way ids, their media are flipped, and the record now sitting on the former
//! NVM way is evicted instead. Consecutive wear on one NVM way is therefore
//! bounded to a single eviction before a migration is attempted.
//!
//! New ways are assigned to SRAM until `write_skew_threshold + 1` SRAM
//! allocations have been made; every later allocation lands on NVM.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `touch()` / `reset()` / `invalidate()`: O(1)
//!   - `get_victim()`: O(W) where W is the number of candidates
//! - **Space Complexity:** O(W) per set (one record per populated way)

use tracing::{debug, warn};

use super::PolicyObserver;
use super::metadata::{Medium, SlotMetadata};
use super::state::PolicyState;
use crate::common::Tick;

/// Replacement policy instance for one cache set.
#[derive(Clone, Debug, Default)]
pub struct HdmLruPolicy {
    state: PolicyState,
}

impl HdmLruPolicy {
    /// Creates a policy for a fresh set.
    ///
    /// # Arguments
    ///
    /// * `write_skew_threshold` - SRAM allocations allowed beyond the first
    ///   before new ways default to NVM.
    pub const fn new(write_skew_threshold: u64) -> Self {
        Self {
            state: PolicyState::new(write_skew_threshold),
        }
    }

    /// Read-only view of the set's wear-leveling history.
    pub const fn state(&self) -> &PolicyState {
        &self.state
    }

    /// Creates the metadata for a way populated for the first time.
    ///
    /// Allocates the next way id and picks the medium: SRAM while the
    /// cumulative SRAM count has not passed the write-skew threshold, NVM
    /// afterwards. The record is stamped with `now`, as if freshly filled.
    pub fn instantiate<O>(&mut self, now: Tick, observer: &mut O) -> SlotMetadata
    where
        O: PolicyObserver + ?Sized,
    {
        let way = self.state.next_way_id();
        let medium = if self.state.claim_fast() {
            Medium::Sram
        } else {
            observer.nvm_allocation();
            Medium::Nvm
        };
        SlotMetadata::new(way, medium, now)
    }

    /// Selects the slot to evict among `candidates`.
    ///
    /// `slots` is the set's arena and `candidates` are handles into it, in
    /// the order the caller wants ties broken. The least recently touched
    /// candidate is chosen, the first one winning ties. If that candidate is
    /// an NVM way that was also the previous victim, it is swapped with the
    /// least recently touched SRAM candidate and the SRAM candidate's handle
    /// is returned instead.
    ///
    /// When no SRAM candidate exists the swap is skipped, the observer is
    /// told through [`PolicyObserver::missing_fast_victim`], and the NVM
    /// victim is returned as on any other selection.
    ///
    /// # Returns
    ///
    /// The handle of the slot to evict.
    ///
    /// # Panics
    ///
    /// Panics if `candidates` is empty or holds a handle outside `slots`.
    pub fn get_victim<O>(
        &mut self,
        slots: &mut [SlotMetadata],
        candidates: &[usize],
        observer: &mut O,
    ) -> usize
    where
        O: PolicyObserver + ?Sized,
    {
        assert!(
            !candidates.is_empty(),
            "victim selection requires at least one candidate"
        );

        let mut victim = candidates[0];
        let mut fast_victim: Option<usize> = None;
        for &handle in candidates {
            let touched = slots[handle].last_touch;
            if touched < slots[victim].last_touch {
                victim = handle;
            }
            if !slots[handle].is_slow()
                && fast_victim.is_none_or(|fast| touched < slots[fast].last_touch)
            {
                fast_victim = Some(handle);
            }
        }

        let victim_way = slots[victim].way;
        let repeated = slots[victim].is_slow() && self.state.last_evicted() == Some(victim_way);
        if repeated {
            if let Some(fast) = fast_victim {
                let fast_way = slots[fast].way;
                slots[victim].way = fast_way;
                slots[victim].medium = Medium::Sram;
                slots[fast].way = victim_way;
                slots[fast].medium = Medium::Nvm;
                observer.wear_level_migration();
                self.state.clear_last_evicted();
                debug!(
                    hot = %victim_way,
                    cold = %fast_way,
                    "nvm way selected twice in a row, migrated to sram"
                );
                return fast;
            }
            warn!(
                way = %victim_way,
                "repeated nvm victim but no sram candidate to swap with"
            );
            observer.missing_fast_victim();
        }

        if slots[victim].is_slow() {
            observer.nvm_victim();
        }
        self.state.record_eviction(victim_way);
        victim
    }
}
