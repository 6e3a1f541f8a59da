//! Scenario configuration, loaded from YAML.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tank_bt::{ControllerConfig, FleeConfig, PursueConfig, SelectionPolicy};
use tank_core::Vec2;
use tank_nav::PlannerConfig;

use crate::Wall;

/// Whole scenario: arena layout, tree tuning and run length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for free-location sampling and per-agent streams
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Steps to run
    #[serde(default = "default_steps")]
    pub steps: u64,

    #[serde(default = "default_dt_seconds")]
    pub dt_seconds: f32,

    #[serde(default)]
    pub arena: ArenaConfig,

    #[serde(default = "default_flee")]
    pub flee: FleeConfig,

    #[serde(default)]
    pub pursue: PursueConfig,

    /// Planner settings used by pursuit (overrides `pursue.planner`)
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Selection policy of each tank's root group
    #[serde(default)]
    pub root_policy: SelectionPolicy,

    #[serde(default)]
    pub controller: ControllerConfig,
}

fn default_seed() -> u64 {
    7
}
fn default_steps() -> u64 {
    300
}
fn default_dt_seconds() -> f32 {
    0.1
}
fn default_flee() -> FleeConfig {
    FleeConfig {
        panic_radius: Some(6.0),
        ..FleeConfig::default()
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            steps: default_steps(),
            dt_seconds: default_dt_seconds(),
            arena: ArenaConfig::default(),
            flee: default_flee(),
            pursue: PursueConfig::default(),
            planner: PlannerConfig::default(),
            root_policy: SelectionPolicy::default(),
            controller: ControllerConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Pursuit settings with the top-level planner applied.
    pub fn pursue_config(&self) -> PursueConfig {
        PursueConfig {
            planner: self.planner,
            ..self.pursue
        }
    }
}

/// Arena layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    #[serde(default = "default_width")]
    pub width: f32,

    #[serde(default = "default_height")]
    pub height: f32,

    #[serde(default = "default_walls")]
    pub walls: Vec<Wall>,

    /// Waypoint markers, in enumeration order
    #[serde(default = "default_waypoints")]
    pub waypoints: Vec<Vec2>,

    #[serde(default = "default_player")]
    pub player: Vec2,

    /// Tank spawn points; tank ids follow this order
    #[serde(default = "default_tanks")]
    pub tanks: Vec<Vec2>,

    /// Units per second
    #[serde(default = "default_tank_speed")]
    pub tank_speed: f32,

    /// Draws per free-location request before giving up
    #[serde(default = "default_sample_draws")]
    pub sample_draws: u32,
}

fn default_width() -> f32 {
    40.0
}
fn default_height() -> f32 {
    30.0
}
fn default_walls() -> Vec<Wall> {
    vec![Wall::new(Vec2::new(18.0, 6.0), Vec2::new(22.0, 24.0))]
}
fn default_waypoints() -> Vec<Vec2> {
    vec![
        Vec2::new(10.0, 15.0),
        Vec2::new(10.0, 3.0),
        Vec2::new(20.0, 3.0),
        Vec2::new(30.0, 3.0),
        Vec2::new(30.0, 15.0),
        Vec2::new(30.0, 27.0),
        Vec2::new(20.0, 27.0),
        Vec2::new(10.0, 27.0),
    ]
}
fn default_player() -> Vec2 {
    Vec2::new(34.0, 15.0)
}
fn default_tanks() -> Vec<Vec2> {
    vec![
        Vec2::new(5.0, 15.0),
        Vec2::new(5.0, 5.0),
        Vec2::new(5.0, 25.0),
    ]
}
fn default_tank_speed() -> f32 {
    4.0
}
fn default_sample_draws() -> u32 {
    256
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            walls: default_walls(),
            waypoints: default_waypoints(),
            player: default_player(),
            tanks: default_tanks(),
            tank_speed: default_tank_speed(),
            sample_draws: default_sample_draws(),
        }
    }
}
