//! tanksim - headless arena runner.
//!
//! - `tanksim run` - run a scenario and print where every tank ended up
//! - `tanksim graph` - print the waypoint graph of a scenario
//! - `tanksim plan` - plan a single route through the waypoint graph

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use tank_core::Vec2;
use tank_nav::{NavArena, PlannerConfig};
use tank_sim::{Arena, SimConfig, Simulation};

#[derive(Parser)]
#[command(name = "tanksim")]
#[command(about = "Headless arena runner for tank behavior trees", version)]
struct Cli {
    /// Scenario file (YAML); the built-in arena is used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scenario
    Run {
        /// Override the number of steps
        #[arg(long)]
        steps: Option<u64>,

        /// Override the seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print waypoints and edges
    Graph,

    /// Plan a route between two points
    Plan {
        /// Start point as `x,y`
        #[arg(long, value_parser = parse_point)]
        from: Vec2,

        /// Goal point as `x,y`
        #[arg(long, value_parser = parse_point)]
        to: Vec2,

        /// Use shortest-path A* instead of the configured cost model
        #[arg(long)]
        admissible: bool,
    },
}

fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x `{x}`: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y `{y}`: {e}"))?;
    Ok(Vec2::new(x, y))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run { steps, seed } => run(config, steps, seed),
        Commands::Graph => show_graph(&config),
        Commands::Plan {
            from,
            to,
            admissible,
        } => plan(&config, from, to, admissible),
    }
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    match path {
        Some(path) => SimConfig::load(path),
        None => Ok(SimConfig::default()),
    }
}

fn run(mut config: SimConfig, steps: Option<u64>, seed: Option<u64>) -> Result<()> {
    if let Some(steps) = steps {
        config.steps = steps;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }

    let mut sim = Simulation::new(config).context("Failed to set up simulation")?;
    let report = sim.run().context("Simulation aborted")?;

    println!("steps: {}", report.steps);
    for tank in report.tanks.iter() {
        let active = if tank.active.is_empty() {
            "-"
        } else {
            tank.active.as_str()
        };
        println!("  {}  {}  {}", tank.id, tank.position, active);
    }
    Ok(())
}

fn build_arena(config: &SimConfig) -> Result<Arena> {
    Arena::new(&config.arena, config.seed, config.dt_seconds).context("Invalid arena")
}

fn show_graph(config: &SimConfig) -> Result<()> {
    let arena = build_arena(config)?;
    let graph = arena.waypoint_graph();

    println!(
        "waypoints: {}  edges: {}",
        graph.len(),
        graph.edge_count()
    );
    for wp in graph.waypoints() {
        let neighbors: Vec<String> = wp.neighbors.iter().map(|n| n.to_string()).collect();
        println!("  {}  {}  -> {}", wp.id, wp.position, neighbors.join(" "));
    }
    Ok(())
}

fn plan(config: &SimConfig, from: Vec2, to: Vec2, admissible: bool) -> Result<()> {
    let arena = build_arena(config)?;
    let planner = if admissible {
        PlannerConfig::admissible()
    } else {
        config.planner
    };

    let path = arena
        .plan_route(from, to, planner)
        .with_context(|| format!("No route from {from} to {to}"))?;

    println!(
        "{} hops, length {:.2} ({:?})",
        path.len(),
        path.length(),
        planner.cost_model
    );
    for (id, point) in path.waypoints.iter().zip(path.points.iter()) {
        println!("  {id}  {point}");
    }
    Ok(())
}
