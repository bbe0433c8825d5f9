#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates a Maze Escape level and solves it.

mod render;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use maze_escape_core::{SearchAlgorithm, SearchOutcome};
use maze_escape_system_placement::{PlacementConfig, PlacementOutcome, TrapPolicy};
use maze_escape_world::{query, World, WorldConfig};

/// Generates a maze, places keys and hazards, and prints a solution.
#[derive(Parser, Debug)]
#[command(name = "maze-escape", version, about, long_about = None)]
struct Args {
    /// Maze width in cells (odd, at least 5)
    #[arg(long, default_value_t = 35)]
    width: u32,

    /// Maze height in cells (odd, at least 5)
    #[arg(long, default_value_t = 35)]
    height: u32,

    /// Random seed; a fresh one is drawn when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Keys the player must collect before escaping
    #[arg(long, default_value_t = 3)]
    keys: usize,

    /// Upper bound on traps
    #[arg(long, default_value_t = 8)]
    traps: usize,

    /// Teleporter pairs to place
    #[arg(long, default_value_t = 2)]
    teleporters: usize,

    /// Placement attempts before dropping traps and teleporters
    #[arg(long, default_value_t = 20)]
    attempts: u32,

    /// Treat traps as walls when proving a placement solvable
    #[arg(long)]
    blocking_traps: bool,

    /// Search strategy used for the printed route (BFS, UCS, DFS, DLS, IDS, Bidirectional)
    #[arg(long, default_value = "BFS")]
    algorithm: String,

    /// Print a comparison of every search strategy
    #[arg(long)]
    compare: bool,

    /// Log placement and search details
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn world_config(&self, seed: u64) -> WorldConfig {
        let trap_policy = if self.blocking_traps {
            TrapPolicy::Blocking
        } else {
            TrapPolicy::Passable
        };
        WorldConfig {
            width: self.width,
            height: self.height,
            seed,
            placement: PlacementConfig {
                required_keys: self.keys,
                max_trap_count: self.traps,
                teleporter_pair_count: self.teleporters,
                max_attempts: self.attempts,
                trap_policy,
                ..PlacementConfig::default()
            },
            ..WorldConfig::default()
        }
    }
}

/// Entry point for the Maze Escape command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let algorithm: SearchAlgorithm = args.algorithm.parse()?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("using seed {seed}");

    let world = World::new(args.world_config(seed)).with_context(|| {
        format!(
            "failed to build a {}x{} maze from seed {seed}",
            args.width, args.height
        )
    })?;

    let solution = world.solve(algorithm);
    let route = solution.path().unwrap_or(&[]);
    print!("{}", render::map(&world, route));

    let budget = query::move_budget(&world);
    let placement = match query::placement_outcome(&world) {
        Some(PlacementOutcome::Accepted { attempt }) => format!("accepted on attempt {attempt}"),
        Some(PlacementOutcome::Degraded) => "degraded to keys and enemy".to_owned(),
        None => "fixed layout".to_owned(),
    };
    println!("placement {placement}");
    println!(
        "seed {seed}  keys {}  traps {}  teleporter pairs {}  move budget {}",
        query::features(&world).keys().len(),
        query::features(&world).traps().len(),
        query::features(&world).teleporters().len(),
        budget
            .limit()
            .map_or_else(|| "unlimited".to_owned(), |limit| limit.to_string()),
    );
    match solution.outcome() {
        SearchOutcome::Found => println!(
            "{algorithm}: {} steps to {}, {} nodes explored, hint: go {}",
            route.len().saturating_sub(1),
            query::objective(&world),
            solution.nodes_explored(),
            query::hint_direction(&world)
        ),
        SearchOutcome::Unreachable => println!(
            "{algorithm}: no route to {} ({} nodes explored)",
            query::objective(&world),
            solution.nodes_explored()
        ),
        SearchOutcome::SearchExhausted { depth_cap } => println!(
            "{algorithm}: no route within depth {depth_cap} ({} nodes explored)",
            solution.nodes_explored()
        ),
    }

    if args.compare {
        println!();
        print!("{}", render::comparison_table(&world.compare()));
    }

    Ok(())
}
