//! Hybrid SRAM/NVM Set-Associative Cache.
//!
//! This module implements a tag-only set-associative cache whose ways are
//! backed by two media with different write costs. Each set owns a slot arena
//! of [`SlotMetadata`] records and one [`HdmLruPolicy`] instance; the cache
//! drives the policy on hits (touch), fills (instantiate / victim selection
//! plus reset) and invalidations. Line data is not stored.

/// Replacement policy, slot metadata and policy observer.
pub mod policies;

use std::mem;

use tracing::trace;

use self::policies::{HdmLruPolicy, Medium, PolicyState, SlotMetadata};
use crate::common::{ConfigError, Tick};
use crate::config::{Config, TimingConfig};
use crate::stats::HdmStats;

/// Cache line entry containing tag, validity, and dirty bits.
#[derive(Clone, Debug, Default)]
struct CacheLine {
    tag: u64,
    valid: bool,
    dirty: bool,
}

/// One set: lines and slot metadata share the same handle space.
#[derive(Clone, Debug)]
struct CacheSet {
    lines: Vec<CacheLine>,
    slots: Vec<SlotMetadata>,
    policy: HdmLruPolicy,
}

impl CacheSet {
    fn new(ways: usize, write_skew_threshold: u64) -> Self {
        Self {
            lines: Vec::with_capacity(ways),
            slots: Vec::with_capacity(ways),
            policy: HdmLruPolicy::new(write_skew_threshold),
        }
    }

    fn find(&self, tag: u64) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }
}

/// Result of a single [`HybridCache::access`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessOutcome {
    /// The line was already present.
    pub hit: bool,
    /// Handle of the slot that now holds the line.
    pub handle: usize,
    /// Medium recorded for that slot after the access.
    pub medium: Medium,
    /// Address of the valid line displaced by the fill, if any.
    pub evicted: Option<u64>,
    /// The displaced line was dirty and had to be written back.
    pub writeback: bool,
    /// Cycles charged for the access.
    pub penalty: u64,
}

/// Hybrid SRAM/NVM cache model.
///
/// Each set populates its ways lazily: the first `ways` misses of a set each
/// instantiate a new slot, and only a full set consults the victim selector.
#[derive(Debug)]
pub struct HybridCache {
    sets: Vec<CacheSet>,
    handles: Vec<usize>,
    ways: usize,
    line_bytes: usize,
    timing: TimingConfig,
    stats: HdmStats,
}

impl HybridCache {
    /// Creates an empty cache with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns the geometry errors of
    /// [`CacheConfig::validate`](crate::config::CacheConfig::validate).
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.cache.validate()?;
        let ways = config.cache.ways;
        let sets = (0..config.cache.num_sets())
            .map(|_| CacheSet::new(ways, config.cache.write_skew_threshold))
            .collect();
        Ok(Self {
            sets,
            handles: (0..ways).collect(),
            ways,
            line_bytes: config.cache.line_bytes,
            timing: config.timing.clone(),
            stats: HdmStats::default(),
        })
    }

    /// Number of sets.
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Associativity.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Statistics collected so far.
    pub const fn stats(&self) -> &HdmStats {
        &self.stats
    }

    /// Set index an address maps to.
    pub fn set_index(&self, addr: u64) -> usize {
        ((addr / self.line_bytes as u64) % self.sets.len() as u64) as usize
    }

    fn tag(&self, addr: u64) -> u64 {
        addr / (self.line_bytes * self.sets.len()) as u64
    }

    /// Wear-leveling history of `set`, or `None` if out of range.
    pub fn policy_state(&self, set: usize) -> Option<&PolicyState> {
        self.sets.get(set).map(|s| s.policy.state())
    }

    /// Slot metadata of `set` indexed by handle, or `None` if out of range.
    pub fn slots(&self, set: usize) -> Option<&[SlotMetadata]> {
        self.sets.get(set).map(|s| s.slots.as_slice())
    }

    /// Checks if the cache holds a valid line for `addr`.
    pub fn contains(&self, addr: u64) -> bool {
        let tag = self.tag(addr);
        self.sets[self.set_index(addr)].find(tag).is_some()
    }

    const fn write_latency(&self, medium: Medium) -> u64 {
        match medium {
            Medium::Sram => self.timing.sram_write_latency,
            Medium::Nvm => self.timing.nvm_write_latency,
        }
    }

    /// Performs a read or write of `addr` at time `now`.
    ///
    /// A hit touches the slot and, for writes, marks the line dirty and pays
    /// the write latency of the slot's medium. A miss fetches the line from
    /// the next level and installs it, writing back a dirty victim if needed.
    pub fn access(&mut self, addr: u64, is_write: bool, now: Tick) -> AccessOutcome {
        if is_write {
            self.stats.writes += 1;
        } else {
            self.stats.reads += 1;
        }

        let set_index = self.set_index(addr);
        let tag = self.tag(addr);
        let mut penalty = self.timing.hit_latency;

        let set = &mut self.sets[set_index];
        if let Some(handle) = set.find(tag) {
            set.slots[handle].touch(now);
            let medium = set.slots[handle].medium();
            if is_write {
                set.lines[handle].dirty = true;
                self.stats.record_write_hit(medium);
                penalty += self.write_latency(medium);
            }
            self.stats.hits += 1;
            self.stats.cycles += penalty;
            return AccessOutcome {
                hit: true,
                handle,
                medium,
                evicted: None,
                writeback: false,
                penalty,
            };
        }

        self.stats.misses += 1;
        penalty += self.timing.next_level_latency;
        let mut outcome = self.install_line(set_index, tag, is_write, now);
        outcome.penalty += penalty;
        self.stats.cycles += outcome.penalty;
        outcome
    }

    /// Installs a line for `tag` in `set_index`, choosing the slot through the
    /// policy. The returned penalty covers the fill write and any write-back.
    fn install_line(&mut self, set_index: usize, tag: u64, dirty: bool, now: Tick) -> AccessOutcome {
        let set = &mut self.sets[set_index];
        let handle = if set.slots.len() < self.ways {
            let meta = set.policy.instantiate(now, &mut self.stats);
            set.slots.push(meta);
            set.lines.push(CacheLine::default());
            set.slots.len() - 1
        } else {
            let handle = set
                .policy
                .get_victim(&mut set.slots, &self.handles, &mut self.stats);
            set.slots[handle].reset(now);
            handle
        };

        let old = mem::replace(
            &mut set.lines[handle],
            CacheLine {
                tag,
                valid: true,
                dirty,
            },
        );
        let medium = set.slots[handle].medium();
        trace!(set = set_index, handle, %medium, tag, "line installed");

        let sets = self.sets.len() as u64;
        let evicted = old
            .valid
            .then(|| (old.tag * sets + set_index as u64) * self.line_bytes as u64);
        let writeback = old.valid && old.dirty;
        let mut penalty = self.write_latency(medium);
        if evicted.is_some() {
            self.stats.evictions += 1;
        }
        if writeback {
            self.stats.writebacks += 1;
            penalty += self.timing.next_level_latency;
        }
        self.stats.record_fill(medium);

        AccessOutcome {
            hit: false,
            handle,
            medium,
            evicted,
            writeback,
            penalty,
        }
    }

    /// Drops the line holding `addr`, ageing its slot so it is refilled first.
    ///
    /// A dirty line is written back. Returns `false` if the line was not
    /// present.
    pub fn invalidate(&mut self, addr: u64) -> bool {
        let set_index = self.set_index(addr);
        let tag = self.tag(addr);
        let set = &mut self.sets[set_index];
        let Some(handle) = set.find(tag) else {
            return false;
        };
        let line = &mut set.lines[handle];
        if line.dirty {
            self.stats.writebacks += 1;
            self.stats.cycles += self.timing.next_level_latency;
        }
        line.valid = false;
        line.dirty = false;
        set.slots[handle].invalidate();
        self.stats.invalidations += 1;
        true
    }

    /// Writes back and invalidates every dirty line.
    pub fn flush(&mut self) {
        for set in &mut self.sets {
            for (line, slot) in set.lines.iter_mut().zip(set.slots.iter_mut()) {
                if line.valid && line.dirty {
                    line.valid = false;
                    line.dirty = false;
                    slot.invalidate();
                    self.stats.writebacks += 1;
                    self.stats.cycles += self.timing.next_level_latency;
                }
            }
        }
    }
}
