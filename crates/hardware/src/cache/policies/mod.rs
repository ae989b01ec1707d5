//! Cache Replacement Policies.
//!
//! Victim selection for sets whose ways are split between a fast medium
//! (SRAM) and a slow, write-limited medium (NVM).
//!
//! # Components
//!
//! - `SlotMetadata`: recency, way id and medium of one populated way, with
//!   the `touch` / `reset` / `invalidate` lifecycle.
//! - `PolicyState`: per-set allocation counters and eviction history.
//! - `HdmLruPolicy`: medium assignment on first population and LRU victim
//!   selection with wear-leveling swaps.
//! - `PolicyObserver`: sink for the counters the policy bumps as a side
//!   effect.

/// Hybrid-memory LRU policy with wear-leveling.
pub mod hdm_lru;

/// Per-slot replacement metadata.
pub mod metadata;

/// Per-set policy bookkeeping.
pub mod state;

pub use hdm_lru::HdmLruPolicy;
pub use metadata::{Medium, SlotMetadata, WayId};
pub use state::PolicyState;

/// Receives the side-effect counters of the replacement policy.
///
/// The policy only ever increments through this interface and never reads
/// anything back. `()` is a valid observer that discards every event.
pub trait PolicyObserver {
    /// A newly populated way was assigned to NVM.
    fn nvm_allocation(&mut self);

    /// An NVM way was migrated to SRAM by a wear-leveling swap.
    fn wear_level_migration(&mut self);

    /// An NVM way was returned as victim without a swap.
    fn nvm_victim(&mut self);

    /// A swap was due but the candidate set held no SRAM way.
    fn missing_fast_victim(&mut self);
}

impl PolicyObserver for () {
    fn nvm_allocation(&mut self) {}
    fn wear_level_migration(&mut self) {}
    fn nvm_victim(&mut self) {}
    fn missing_fast_victim(&mut self) {}
}
