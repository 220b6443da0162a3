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

#![warn(missing_docs)]

//! Evaluate the reflex robot over many trials on one or more maps.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use robot_vacuum::{evaluate, maps, EvaluationConfig, EvaluationReport, TileMap};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

// A trial succeeds when the robot cleans at least --threshold of the dirt within --iterations
// steps. A map passes when at least --threshold of its trials succeed.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Map files to evaluate. Defaults to every bundled map.
    #[arg(value_name = "MAP_FILE")]
    maps: Vec<PathBuf>,

    /// Number of trials per map
    #[arg(short, long, default_value_t = 100)]
    trials: usize,

    /// Number of time steps per trial
    #[arg(short, long, default_value_t = 200)]
    iterations: usize,

    /// Success threshold for a trial's performance and for a map's success rate
    #[arg(long, default_value_t = 0.7)]
    threshold: f64,

    /// Seed of the first trial; trial i uses seed + i
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Print reports as JSON instead of one line per map
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct NamedReport {
    map: String,
    success_rate: f64,
    passed: bool,
    #[serde(flatten)]
    report: EvaluationReport,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_maps(paths: &[PathBuf]) -> Result<Vec<(String, TileMap)>> {
    if paths.is_empty() {
        return maps::REFERENCE_MAPS
            .iter()
            .map(|reference| -> Result<(String, TileMap)> {
                Ok((reference.name.to_string(), reference.tile_map()?))
            })
            .collect();
    }
    paths
        .iter()
        .map(|path| -> Result<(String, TileMap)> {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read map file {}", path.display()))?;
            let map = text
                .parse::<TileMap>()
                .with_context(|| format!("failed to parse map file {}", path.display()))?;
            Ok((path.display().to_string(), map))
        })
        .collect()
}

fn main() -> Result<ExitCode> {
    init_logging();
    let args = Args::parse();
    let config = EvaluationConfig::new(args.trials, args.iterations, args.threshold, args.seed);

    let mut reports = Vec::new();
    for (name, map) in load_maps(&args.maps)? {
        tracing::info!(map = %name, trials = config.trials, "evaluating");
        let report = evaluate(&map, &config)?;
        reports.push(NamedReport {
            map: name,
            success_rate: report.success_rate(),
            passed: report.passed(),
            report,
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for named in &reports {
            println!(
                "{} success rate: {:.2}% after {} trials (mean performance {:.2}){}",
                named.map,
                named.success_rate * 100.0,
                named.report.outcomes.len(),
                named.report.mean_performance,
                if named.passed { "" } else { " FAILED" }
            );
        }
    }

    if reports.iter().all(|named| named.passed) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
