mod common;

use common::probe::{take, EventLog, Probe};
use common::TestArena;
use tank_bt::Slot;
use tank_core::TickContext;

fn ctx() -> TickContext {
    TickContext::new(0, 0.1, 0)
}

fn slot() -> Slot<TestArena> {
    let log = EventLog::default();
    let (node, _) = Probe::new("probe", &log);
    Slot::new(node)
}

#[test]
fn lifecycle_in_order_is_accepted() {
    let log = EventLog::default();
    let (node, _) = Probe::new("probe", &log);
    let mut slot = Slot::new(node);
    let mut world = TestArena::new();

    assert!(!slot.is_live());
    slot.activate(&ctx(), 1, &mut world);
    assert!(slot.is_live());
    slot.tick(&ctx(), 1, &mut world).unwrap();
    slot.deactivate(&ctx(), 1, &mut world);
    assert!(!slot.is_live());
    slot.activate(&ctx(), 1, &mut world);

    assert_eq!(
        take(&log),
        vec!["activate:probe", "tick:probe", "deactivate:probe", "activate:probe"]
    );
}

#[test]
#[should_panic(expected = "`probe` activated while already running")]
fn double_activate_panics() {
    let mut slot = slot();
    let mut world = TestArena::new();
    slot.activate(&ctx(), 1, &mut world);
    slot.activate(&ctx(), 1, &mut world);
}

#[test]
#[should_panic(expected = "`probe` ticked while inactive")]
fn tick_before_activate_panics() {
    let mut slot = slot();
    let mut world = TestArena::new();
    let _ = slot.tick(&ctx(), 1, &mut world);
}

#[test]
#[should_panic(expected = "`probe` deactivated while inactive")]
fn unmatched_deactivate_panics() {
    let mut slot = slot();
    let mut world = TestArena::new();
    slot.activate(&ctx(), 1, &mut world);
    slot.deactivate(&ctx(), 1, &mut world);
    slot.deactivate(&ctx(), 1, &mut world);
}
