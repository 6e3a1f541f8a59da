mod common;

use common::probe::{take, EventLog, Probe};
use common::TestArena;
use tank_bt::{
    tick_controllers, AgentController, BtError, BtStatus, ControllerConfig, GroupDecider,
    MoveTowardPlayer, SelectionPolicy,
};
use tank_core::{TickContext, Vec2};

fn ctx(tick: u64) -> TickContext {
    TickContext::new(tick, 0.1, 11)
}

fn controller_with_probe(log: &EventLog) -> (AgentController<TestArena>, common::probe::ProbeHandle) {
    let (probe, handle) = Probe::new("a", log);
    let root = GroupDecider::prioritized(vec![probe]).named("root");
    (AgentController::new(1, Box::new(root)), handle)
}

#[test]
fn idle_root_that_is_not_ready_stays_inactive() {
    let log = EventLog::default();
    let (mut controller, handle) = controller_with_probe(&log);
    handle.ready.set(false);
    let mut world = TestArena::new();

    assert_eq!(controller.tick(&ctx(0), &mut world).unwrap(), BtStatus::Done);
    assert!(!controller.is_running());
    assert_eq!(controller.current_path(), "");
    assert!(take(&log).is_empty());
}

#[test]
fn running_root_reports_its_path_and_shuts_down() {
    let log = EventLog::default();
    let (mut controller, _handle) = controller_with_probe(&log);
    let mut world = TestArena::new();

    assert_eq!(controller.tick(&ctx(0), &mut world).unwrap(), BtStatus::Running);
    assert_eq!(controller.current_path(), "root/a");
    assert_eq!(controller.last_status(), Some(BtStatus::Running));

    controller.shutdown(&ctx(1), &mut world);
    assert!(!controller.is_running());
    assert_eq!(
        take(&log),
        vec!["activate:a", "tick:a", "deactivate:a"]
    );

    // Shutting down twice is harmless.
    controller.shutdown(&ctx(2), &mut world);
    assert!(take(&log).is_empty());
}

#[test]
fn leaf_root_is_deactivated_when_done() {
    let mut world = TestArena::new()
        .with_agent(1, Vec2::new(0.0, 0.0))
        .with_player(Vec2::new(5.0, 0.0));
    let mut controller: AgentController<TestArena> =
        AgentController::new(1, Box::new(MoveTowardPlayer));

    for tick in 0..3 {
        assert_eq!(controller.tick(&ctx(tick), &mut world).unwrap(), BtStatus::Done);
        assert!(!controller.is_running());
    }
    assert_eq!(world.moves.len(), 3);
}

#[test]
fn tree_errors_propagate_and_leave_root_inactive() {
    let log = EventLog::default();
    let (probe, _handle) = Probe::new("a", &log);
    let root = GroupDecider::new(SelectionPolicy::Loop, vec![probe]);
    let mut controller: AgentController<TestArena> = AgentController::new(1, Box::new(root));
    let mut world = TestArena::new();

    let err = controller.tick(&ctx(0), &mut world).unwrap_err();
    assert_eq!(err, BtError::UnimplementedPolicy(SelectionPolicy::Loop));
    assert!(!controller.is_running());
}

#[test]
fn decimated_controller_skips_off_schedule_ticks() {
    let log = EventLog::default();
    let (controller, _handle) = controller_with_probe(&log);
    let mut controller = controller.with_config(ControllerConfig {
        think_every_ticks: 3,
        think_offset_ticks: 1,
    });
    let mut world = TestArena::new();

    let mut ran_on = Vec::new();
    for tick in 0..7 {
        controller.tick(&ctx(tick), &mut world).unwrap();
        if !take(&log).is_empty() {
            ran_on.push(tick);
        }
    }
    assert_eq!(ran_on, vec![2, 5]);
}

#[test]
fn staggered_config_uses_agent_id() {
    let config = ControllerConfig::staggered(7u64, 4);
    assert_eq!(config.think_every_ticks, 4);
    assert_eq!(config.think_offset_ticks, 3);
    assert!(config.should_think(1));
    assert!(!config.should_think(2));

    let zero = ControllerConfig::staggered(7u64, 0);
    assert!(zero.should_think(12345));
}

#[test]
fn controllers_tick_in_agent_order() {
    let mut world = TestArena::new()
        .with_agent(2, Vec2::new(0.0, 0.0))
        .with_agent(5, Vec2::new(1.0, 0.0))
        .with_player(Vec2::new(9.0, 0.0));
    let mut controllers: Vec<AgentController<TestArena>> = vec![
        AgentController::new(5, Box::new(MoveTowardPlayer)),
        AgentController::new(2, Box::new(MoveTowardPlayer)),
    ];

    tick_controllers(&ctx(0), &mut world, &mut controllers).unwrap();

    let order: Vec<u64> = world.moves.iter().map(|(agent, _)| *agent).collect();
    assert_eq!(order, vec![2, 5]);
    assert_eq!(controllers[0].agent(), 2);
}
