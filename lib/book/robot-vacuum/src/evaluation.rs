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

//! Run the robot many times on one map and see how often it does well enough.
//!
//! Every trial gets its own environment, robot and random number generator, so trials run in
//! parallel and the results only depend on the seed.

use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::grid::Position;
use crate::map::TileMap;
use crate::reflex_robot::ReflexRobotAgent;
use crate::vacuum_world::GridEnvironment;
use crate::{Simulation, VacuumWorldError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub trials: usize,
    pub iterations: usize,
    pub success_threshold: f64,
    pub seed: u64,
}

impl EvaluationConfig {
    pub fn new(trials: usize, iterations: usize, success_threshold: f64, seed: u64) -> Self {
        Self {
            trials,
            iterations,
            success_threshold,
            seed,
        }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self::new(100, 200, 0.7, 42)
    }
}

/// Result of a single trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub trial: usize,
    pub start: Position,

    /// Fraction of the dirt cleaned by the end of the trial.
    pub performance: f64,

    /// Performance summed over every step, which rewards cleaning early.
    pub cumulative_score: f64,
}

/// Summary of many trials on one map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub config: EvaluationConfig,
    pub successful_trials: usize,
    pub mean_performance: f64,
    pub outcomes: Vec<TrialOutcome>,
}

impl EvaluationReport {
    /// Fraction of trials whose performance reached the threshold.
    pub fn success_rate(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        self.successful_trials as f64 / self.outcomes.len() as f64
    }

    /// Whether enough trials succeeded. The same threshold is used per trial and across trials.
    pub fn passed(&self) -> bool {
        self.success_rate() >= self.config.success_threshold
    }
}

/// Run one trial from a start chosen by a generator seeded with `seed`.
pub fn run_trial(
    map: &TileMap,
    iterations: usize,
    seed: u64,
) -> Result<TrialOutcome, VacuumWorldError> {
    let mut rng = rand_pcg::Pcg64::seed_from_u64(seed);
    let environment = GridEnvironment::from_map(map, &mut rng)?;
    let start = environment.current_position();

    let mut simulation = Simulation::new(environment, ReflexRobotAgent::new(), iterations);
    simulation.run();

    Ok(TrialOutcome {
        trial: 0,
        start,
        performance: simulation.environment().performance_measure(),
        cumulative_score: simulation.score(),
    })
}

/// Run `config.trials` trials in parallel. Trial `i` is seeded with `config.seed + i`.
pub fn evaluate(
    map: &TileMap,
    config: &EvaluationConfig,
) -> Result<EvaluationReport, VacuumWorldError> {
    let outcomes = (0..config.trials)
        .into_par_iter()
        .map(|trial| -> Result<TrialOutcome, VacuumWorldError> {
            let seed = config.seed.wrapping_add(trial as u64);
            let outcome = run_trial(map, config.iterations, seed)?;
            tracing::debug!(
                trial,
                start = %outcome.start,
                performance = outcome.performance,
                "trial finished"
            );
            Ok(TrialOutcome { trial, ..outcome })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let successful_trials = outcomes
        .iter()
        .filter(|outcome| outcome.performance >= config.success_threshold)
        .count();
    let mean_performance = if outcomes.is_empty() {
        0.0
    } else {
        outcomes.iter().map(|outcome| outcome.performance).sum::<f64>() / outcomes.len() as f64
    };

    Ok(EvaluationReport {
        config: config.clone(),
        successful_trials,
        mean_performance,
        outcomes,
    })
}
