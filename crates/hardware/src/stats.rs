//! Simulation statistics collection and reporting.
//!
//! This module tracks the metrics of a hybrid cache run. It provides:
//! 1. **Accesses:** Hit/miss counts, reads/writes, write-backs and cycles.
//! 2. **Media:** Writes landing on SRAM versus NVM, split into fills and
//!    write hits.
//! 3. **Policy:** The replacement policy's own counters (NVM allocations,
//!    wear-leveling migrations, NVM victims, missed swaps), collected by
//!    implementing [`PolicyObserver`].

use serde::Serialize;

use crate::cache::policies::{Medium, PolicyObserver};

/// Statistics for one cache instance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HdmStats {
    /// Total cycles charged by accesses.
    pub cycles: u64,
    /// Number of read accesses.
    pub reads: u64,
    /// Number of write accesses.
    pub writes: u64,
    /// Accesses that found their line.
    pub hits: u64,
    /// Accesses that had to install their line.
    pub misses: u64,
    /// Valid lines replaced by a fill.
    pub evictions: u64,
    /// Dirty lines written back to the next level.
    pub writebacks: u64,
    /// Explicit invalidations that found their line.
    pub invalidations: u64,

    /// Fills written into SRAM ways.
    pub sram_fills: u64,
    /// Fills written into NVM ways.
    pub nvm_fills: u64,
    /// Write hits on SRAM ways.
    pub sram_write_hits: u64,
    /// Write hits on NVM ways.
    pub nvm_write_hits: u64,

    /// Ways assigned to NVM on first population.
    pub nvm_allocations: u64,
    /// Wear-leveling swaps performed.
    pub wear_level_migrations: u64,
    /// NVM ways evicted without a swap.
    pub nvm_victims: u64,
    /// Swaps skipped because no SRAM candidate was available.
    pub missing_fast_victims: u64,
}

/// Section names for selective stats output.
///
/// Pass an empty slice to [`HdmStats::print_sections`] to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "media", "policy"];

impl HdmStats {
    /// Total accesses (reads and writes).
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, or 0 before any access.
    pub fn hit_rate(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    /// Line writes that landed on NVM.
    pub const fn nvm_writes(&self) -> u64 {
        self.nvm_fills + self.nvm_write_hits
    }

    /// Line writes that landed on SRAM.
    pub const fn sram_writes(&self) -> u64 {
        self.sram_fills + self.sram_write_hits
    }

    pub(crate) const fn record_fill(&mut self, medium: Medium) {
        match medium {
            Medium::Sram => self.sram_fills += 1,
            Medium::Nvm => self.nvm_fills += 1,
        }
    }

    pub(crate) const fn record_write_hit(&mut self, medium: Medium) {
        match medium {
            Medium::Sram => self.sram_write_hits += 1,
            Medium::Nvm => self.nvm_write_hits += 1,
        }
    }

    /// Renders the requested sections as text.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`];
    /// unknown names are ignored. An empty slice selects every section.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let percent = |part: u64, whole: u64| {
            if whole == 0 {
                0.0
            } else {
                100.0 * part as f64 / whole as f64
            }
        };
        let mut out = String::new();

        if want("summary") {
            out.push_str("==========================================================\n");
            out.push_str("HYBRID CACHE STATISTICS\n");
            out.push_str("==========================================================\n");
            out.push_str(&format!("sim_cycles               {}\n", self.cycles));
            out.push_str(&format!("accesses                 {}\n", self.accesses()));
            out.push_str(&format!("  reads                  {}\n", self.reads));
            out.push_str(&format!("  writes                 {}\n", self.writes));
            out.push_str(&format!(
                "hits                     {} ({:.2}%)\n",
                self.hits,
                self.hit_rate() * 100.0
            ));
            out.push_str(&format!("misses                   {}\n", self.misses));
            out.push_str(&format!("evictions                {}\n", self.evictions));
            out.push_str(&format!("writebacks               {}\n", self.writebacks));
            out.push_str(&format!("invalidations            {}\n", self.invalidations));
            out.push_str("----------------------------------------------------------\n");
        }
        if want("media") {
            let total = self.sram_writes() + self.nvm_writes();
            out.push_str("MEDIA WRITES\n");
            out.push_str(&format!(
                "  sram.writes            {} ({:.2}%)\n",
                self.sram_writes(),
                percent(self.sram_writes(), total)
            ));
            out.push_str(&format!("    sram.fills           {}\n", self.sram_fills));
            out.push_str(&format!("    sram.write_hits      {}\n", self.sram_write_hits));
            out.push_str(&format!(
                "  nvm.writes             {} ({:.2}%)\n",
                self.nvm_writes(),
                percent(self.nvm_writes(), total)
            ));
            out.push_str(&format!("    nvm.fills            {}\n", self.nvm_fills));
            out.push_str(&format!("    nvm.write_hits       {}\n", self.nvm_write_hits));
            out.push_str("----------------------------------------------------------\n");
        }
        if want("policy") {
            out.push_str("REPLACEMENT POLICY\n");
            out.push_str(&format!("  nvm.allocations        {}\n", self.nvm_allocations));
            out.push_str(&format!("  nvm.victims            {}\n", self.nvm_victims));
            out.push_str(&format!(
                "  wear.migrations        {}\n",
                self.wear_level_migrations
            ));
            out.push_str(&format!(
                "  wear.missed_swaps      {}\n",
                self.missing_fast_victims
            ));
            out.push_str("----------------------------------------------------------\n");
        }
        out
    }

    /// Prints only the requested sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }
}

impl PolicyObserver for HdmStats {
    fn nvm_allocation(&mut self) {
        self.nvm_allocations += 1;
    }

    fn wear_level_migration(&mut self) {
        self.wear_level_migrations += 1;
    }

    fn nvm_victim(&mut self) {
        self.nvm_victims += 1;
    }

    fn missing_fast_victim(&mut self) {
        self.missing_fast_victims += 1;
    }
}
