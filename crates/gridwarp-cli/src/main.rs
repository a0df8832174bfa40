use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gridwarp_lib::{load_grid, plan_path, Heuristic, JumpPolicy, PathRequest, Point};

#[derive(Parser, Debug)]
#[command(version, about = "Grid pathfinding utilities")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a path between two cells of a map.
    Route {
        /// Path to the `.map` file describing the grid.
        #[arg(long)]
        map: PathBuf,
        /// Start cell as X,Y.
        #[arg(long)]
        from: String,
        /// Goal cell as X,Y.
        #[arg(long)]
        to: String,
        /// Pruning policy: always, never, or teleport.
        #[arg(long, default_value = "always")]
        policy: String,
        /// Heuristic: manhattan, euclidean, octile, or chebyshev.
        #[arg(long, default_value = "manhattan")]
        heuristic: String,
        /// Route through tunnels and wormholes.
        #[arg(long)]
        teleporters: bool,
        /// Emit the plan as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the dimensions and walkable-cell count of a map.
    Info {
        /// Path to the `.map` file.
        #[arg(long)]
        map: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Route {
            map,
            from,
            to,
            policy,
            heuristic,
            teleporters,
            json,
        } => handle_route(&map, &from, &to, &policy, &heuristic, teleporters, json),
        Command::Info { map } => handle_info(&map),
    }
}

fn handle_route(
    map: &Path,
    from: &str,
    to: &str,
    policy: &str,
    heuristic: &str,
    teleporters: bool,
    json: bool,
) -> Result<()> {
    let grid = load_grid(map)
        .with_context(|| format!("failed to load map from {}", map.display()))?;
    let start: Point = from.parse()?;
    let goal: Point = to.parse()?;
    let policy: JumpPolicy = policy.parse()?;
    let heuristic: Heuristic = heuristic.parse()?;

    let request = PathRequest {
        start,
        goal,
        policy,
        heuristic,
        check_teleporter: teleporters,
    };
    let plan = plan_path(&grid, &request).context("path planning failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    if !plan.is_reachable() {
        println!("No path found.");
        return Ok(());
    }

    println!(
        "Path with {} steps (cost {:.3}):",
        plan.step_count(),
        plan.cost
    );
    for point in &plan.points {
        println!("- {point}");
    }
    Ok(())
}

fn handle_info(map: &Path) -> Result<()> {
    let grid = load_grid(map)
        .with_context(|| format!("failed to load map from {}", map.display()))?;

    let mut walkable = 0usize;
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            if grid.is_walkable_at(x, y) {
                walkable += 1;
            }
        }
    }
    println!(
        "{}x{} cells, {} walkable",
        grid.width(),
        grid.height(),
        walkable
    );
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
