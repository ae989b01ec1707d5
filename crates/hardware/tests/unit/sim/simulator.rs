//! # Simulator Replay Tests
//!
//! Drives `Simulator` with in-memory traces and checks the clock and the
//! statistics it leaves behind.

use hdm_core::common::Tick;
use hdm_core::sim::{Simulator, TraceOp, TraceRecord};
use pretty_assertions::assert_eq;

use crate::common::{init_tracing, test_config};

fn rec(op: TraceOp, line: u64) -> TraceRecord {
    TraceRecord::new(op, line * 64)
}

#[test]
fn clock_advances_once_per_record() {
    let mut sim = Simulator::new(&test_config(1, 2, 0)).unwrap();
    assert_eq!(sim.now(), Tick::MIN);

    let first = sim.step(rec(TraceOp::Read, 0)).unwrap();
    assert!(!first.hit);
    assert_eq!(sim.now(), Tick(1));
    assert_eq!(sim.cache.slots(0).unwrap()[0].last_touch(), Tick(1));

    assert!(sim.step(rec(TraceOp::Invalidate, 0)).is_none());
    assert_eq!(sim.now(), Tick(2));
}

#[test]
fn invalidate_of_absent_line_is_ignored() {
    let mut sim = Simulator::new(&test_config(1, 2, 0)).unwrap();
    assert!(sim.step(rec(TraceOp::Invalidate, 3)).is_none());
    assert_eq!(sim.stats().invalidations, 0);
}

/// Two-way set, threshold 0. A hot line competes with a stream of cold
/// lines. The NVM way is picked twice in a row twice over, and each repeat
/// migrates it and evicts the hot line from the SRAM slot.
#[test]
fn hot_line_with_stream_triggers_migrations() {
    init_tracing();
    let mut sim = Simulator::new(&test_config(1, 2, 0)).unwrap();

    let mut records = vec![rec(TraceOp::Read, 0), rec(TraceOp::Read, 1)];
    for line in 2..6 {
        records.push(rec(TraceOp::Read, 0));
        records.push(rec(TraceOp::Read, line));
    }
    sim.run(records);

    let stats = sim.stats();
    assert_eq!(stats.accesses(), 10);
    assert_eq!(stats.misses, 7);
    assert_eq!(stats.hits, 3);
    assert_eq!(stats.nvm_allocations, 1);
    assert_eq!(stats.wear_level_migrations, 2);
    assert_eq!(stats.nvm_victims, 2);
    assert_eq!(stats.missing_fast_victims, 0);
    assert_eq!(sim.now(), Tick(10));
}

#[test]
fn writes_mark_lines_dirty_for_writeback() {
    let mut sim = Simulator::new(&test_config(1, 1, 0)).unwrap();
    sim.run([
        rec(TraceOp::Write, 0),
        rec(TraceOp::Read, 1),
        rec(TraceOp::Read, 2),
    ]);
    let stats = sim.stats();
    assert_eq!(stats.writes, 1);
    assert_eq!(stats.reads, 2);
    assert_eq!(stats.writebacks, 1);
    assert_eq!(stats.evictions, 2);
}
