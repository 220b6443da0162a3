/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use robot_vacuum::{maps, GridEnvironment, ReflexRobotAgent, Simulation, TileMap};
use tracing_subscriber::EnvFilter;

// Run the reflex robot once on a single map and show the room before and after. Useful for
// watching how the robot gets stuck and unstuck with --show-steps.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Map file to load. Takes precedence over --reference.
    #[arg(short, long, value_name = "MAP_FILE")]
    map: Option<PathBuf>,

    /// Name of a bundled map
    #[arg(short, long, default_value = "map01")]
    reference: String,

    /// Number of time steps
    #[arg(short, long, default_value_t = 200)]
    iterations: usize,

    /// Seed for picking the start tile when the map has no start marker
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Print the room after every step
    #[arg(long)]
    show_steps: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_map(args: &Args) -> Result<(String, TileMap)> {
    match &args.map {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read map file {}", path.display()))?;
            let map = text
                .parse::<TileMap>()
                .with_context(|| format!("failed to parse map file {}", path.display()))?;
            Ok((path.display().to_string(), map))
        }
        None => {
            let reference = maps::find(&args.reference)
                .with_context(|| format!("no bundled map named {}", args.reference))?;
            Ok((reference.name.to_string(), reference.tile_map()?))
        }
    }
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let (name, map) = load_map(&args)?;
    let mut rng = rand_pcg::Pcg64::seed_from_u64(args.seed);
    let environment = GridEnvironment::from_map(&map, &mut rng)?;
    tracing::info!(
        map = %name,
        start = %environment.current_position(),
        iterations = args.iterations,
        "starting"
    );
    println!("{}\n", environment);

    let mut simulation = Simulation::new(environment, ReflexRobotAgent::new(), args.iterations);
    while !simulation.is_finished() {
        let action = simulation.step();
        if args.show_steps {
            println!(
                "step {}: {}\n{}\n",
                simulation.steps_taken(),
                action,
                simulation.environment()
            );
        }
    }

    let environment = simulation.environment();
    println!("{}\n", environment);
    println!(
        "cleaned {} of {} dirty tiles",
        environment.cleaned_count(),
        environment.initially_dirty()
    );
    println!("performance: {:.2}", environment.performance_measure());
    println!("score: {:.2}", simulation.score());
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_first_bundled_map() {
        let args = Args::parse_from(["run-robot-once"]);
        let (name, map) = load_map(&args).expect("bundled map should load");
        assert_eq!(name, "map01");
        assert_eq!(map.dirty_count(), 32);
    }

    #[test]
    fn test_unknown_bundled_map_is_an_error() {
        let args = Args::parse_from(["run-robot-once", "--reference", "nope"]);
        assert!(load_map(&args).is_err());
    }
}
