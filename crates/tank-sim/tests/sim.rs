use tank_bt::{BtError, SelectionPolicy};
use tank_core::{TankId, Vec2};
use tank_nav::CostModel;
use tank_sim::{SimConfig, SimError, Simulation};

#[test]
fn hidden_player_is_pursued_along_the_graph() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    sim.step().unwrap();

    let report = sim.report();
    assert_eq!(report.steps, 1);
    assert_eq!(report.tanks.len(), 3);
    assert_eq!(report.tanks[0].id, TankId(0));
    assert_eq!(report.tanks[0].active, "root/pursue_player");
    assert_ne!(report.tanks[0].position, Vec2::new(5.0, 15.0));
}

#[test]
fn runs_are_deterministic_for_a_seed() {
    let config = SimConfig {
        steps: 120,
        ..SimConfig::default()
    };
    let a = Simulation::new(config.clone()).unwrap().run().unwrap();
    let b = Simulation::new(config).unwrap().run().unwrap();
    assert_eq!(a, b);
    assert_eq!(a.steps, 120);
}

#[test]
fn tanks_stay_in_bounds_and_out_of_walls() {
    let mut sim = Simulation::new(SimConfig::default()).unwrap();
    for _ in 0..200 {
        sim.step().unwrap();
        let report = sim.report();
        for tank in report.tanks.iter() {
            assert!(sim.arena().in_bounds(tank.position));
            for wall in sim.arena().walls() {
                assert!(!wall.contains(tank.position), "{} entered a wall", tank.id);
            }
        }
    }
}

#[test]
fn unimplemented_root_policy_aborts_the_run() {
    let config = SimConfig {
        root_policy: SelectionPolicy::Sequential,
        ..SimConfig::default()
    };
    let err = Simulation::new(config).unwrap().run().unwrap_err();
    assert!(matches!(
        err,
        SimError::Tree(BtError::UnimplementedPolicy(SelectionPolicy::Sequential))
    ));
}

#[test]
fn partial_yaml_keeps_defaults() {
    let config = SimConfig::from_yaml(
        r#"
seed: 3
steps: 10
root_policy: random
planner:
  cost_model: admissible
arena:
  tank_speed: 2.5
  player: { x: 1.0, y: 2.0 }
flee:
  panic_radius: 3.0
"#,
    )
    .unwrap();

    assert_eq!(config.seed, 3);
    assert_eq!(config.steps, 10);
    assert_eq!(config.root_policy, SelectionPolicy::Random);
    assert_eq!(config.planner.cost_model, CostModel::Admissible);
    assert_eq!(config.pursue_config().planner.cost_model, CostModel::Admissible);
    assert_eq!(config.arena.tank_speed, 2.5);
    assert_eq!(config.arena.player, Vec2::new(1.0, 2.0));
    assert_eq!(config.arena.waypoints.len(), 8);
    assert_eq!(config.arena.tanks.len(), 3);
    assert_eq!(config.flee.panic_radius, Some(3.0));
    assert_eq!(config.flee.goal_threshold, 1.0);
    assert_eq!(config.dt_seconds, 0.1);
}

#[test]
fn empty_yaml_is_the_default_scenario() {
    let config = SimConfig::from_yaml("{}").unwrap();
    assert_eq!(config, SimConfig::default());
}

#[test]
fn config_round_trips_through_a_file() {
    let path = std::env::temp_dir().join(format!("tanksim-{}.yaml", std::process::id()));
    let original = SimConfig {
        seed: 99,
        ..SimConfig::default()
    };
    std::fs::write(&path, serde_yaml::to_string(&original).unwrap()).unwrap();

    let loaded = SimConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, original);
}

#[test]
fn missing_config_file_names_the_path() {
    let err = SimConfig::load(std::path::Path::new("/nonexistent/tanksim.yaml")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/tanksim.yaml"));
}
