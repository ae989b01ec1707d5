//! Slot Metadata Lifecycle Tests.
//!
//! Verifies `touch`, `reset` and `invalidate` on `SlotMetadata`, and how each
//! one moves a slot in the victim order.

use hdm_core::cache::policies::{HdmLruPolicy, Medium, WayId};
use hdm_core::common::Tick;
use pretty_assertions::assert_eq;

use crate::common::{all_handles, slot};

#[test]
fn touch_sets_last_touch() {
    let mut meta = slot(1, Medium::Sram, 3);
    meta.touch(Tick(42));
    assert_eq!(meta.last_touch(), Tick(42));
    assert_eq!(meta.way(), WayId(1));
    assert_eq!(meta.medium(), Medium::Sram);
}

#[test]
fn reset_behaves_like_touch() {
    let mut touched = slot(2, Medium::Nvm, 3);
    let mut reset = touched.clone();
    touched.touch(Tick(9));
    reset.reset(Tick(9));
    assert_eq!(touched, reset);
}

#[test]
fn invalidate_ages_to_min() {
    let mut meta = slot(1, Medium::Nvm, 500);
    meta.invalidate();
    assert_eq!(meta.last_touch(), Tick::MIN);
    assert_eq!(meta.medium(), Medium::Nvm, "invalidate leaves the medium alone");
}

/// A slot touched after every other candidate is never chosen.
#[test]
fn touched_slot_is_not_victim() {
    let mut slots = vec![
        slot(1, Medium::Sram, 1),
        slot(2, Medium::Sram, 2),
        slot(3, Medium::Sram, 3),
    ];
    slots[0].touch(Tick(10));

    let mut policy = HdmLruPolicy::new(8);
    let victim = policy.get_victim(&mut slots, &all_handles(3), &mut ());
    assert_eq!(victim, 1);
}

/// An invalidated slot is the next victim even if it was the most recent.
#[test]
fn invalidated_slot_is_next_victim() {
    let mut slots = vec![
        slot(1, Medium::Sram, 5),
        slot(2, Medium::Sram, 6),
        slot(3, Medium::Sram, 7),
    ];
    slots[2].invalidate();

    let mut policy = HdmLruPolicy::new(8);
    let victim = policy.get_victim(&mut slots, &all_handles(3), &mut ());
    assert_eq!(victim, 2);
}

/// Invalidating an NVM slot that was the previous victim makes it victim
/// again, which triggers the swap instead of a plain eviction.
#[test]
fn invalidated_repeat_victim_is_redirected_by_swap() {
    let mut slots = vec![slot(1, Medium::Sram, 5), slot(2, Medium::Nvm, 3)];
    let handles = all_handles(2);
    let mut policy = HdmLruPolicy::new(0);

    assert_eq!(policy.get_victim(&mut slots, &handles, &mut ()), 1);
    slots[1].reset(Tick(8));
    slots[1].invalidate();

    let victim = policy.get_victim(&mut slots, &handles, &mut ());
    assert_eq!(victim, 0, "swap redirects the eviction to the SRAM slot");
}
