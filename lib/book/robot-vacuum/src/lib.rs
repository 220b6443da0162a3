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

//! A reactive robot vacuum in a grid world.
//!
//! PEAS - Performance, Environment, Action, Sensing. The robot senses only the tile it stands
//! on and the four tiles around it, and is measured by the fraction of dirty tiles it has
//! cleaned.

use num_traits::Zero;

pub mod evaluation;
pub mod grid;
pub mod map;
pub mod maps;
pub mod reflex_robot;
pub mod vacuum_world;

pub use evaluation::{evaluate, run_trial, EvaluationConfig, EvaluationReport, TrialOutcome};
pub use grid::{Action, Direction, Position, Tile, TileStatus};
pub use map::TileMap;
pub use reflex_robot::ReflexRobotAgent;
pub use vacuum_world::{GridEnvironment, Neighborhood};

/// Errors building a vacuum world from a map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VacuumWorldError {
    /// The map has no tiles.
    #[error("map is empty")]
    EmptyMap,

    /// A row is not as wide as the first row.
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        found: usize,
    },

    /// A character that is not a tile symbol.
    #[error("unknown tile symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol {
        /// The offending character.
        symbol: char,
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        col: usize,
    },

    /// More than one robot start marker.
    #[error("map has more than one robot start")]
    MultipleStarts,

    /// Start position is off the grid.
    #[error("start position {0} is outside the grid")]
    StartOutOfBounds(Position),

    /// Start position is a wall.
    #[error("start position {0} is impassable")]
    StartImpassable(Position),

    /// Every tile is impassable so there is nowhere to put the robot.
    #[error("map has no passable tile to start on")]
    NoPassableTile,
}

/// An Agent acts in a Performance, Environment, Action, Sensing (PEAS) cycle.
/// For a given Perception, the Agent will return an Action.
///
/// Notice that the Agent is not aware of an Environment, it's only interface
/// is the Perception coming in then the Action going out.
pub trait Agent {
    type Action;
    type Percept;

    fn act(&mut self, percept: &Self::Percept) -> Self::Action;
}

/// An Environment runs a single Agent in a Performance, Environment, Action, Sensing (PEAS) cycle.
///
/// Notice that the Environment is not aware of an Agent.
pub trait Environment {
    type Action;
    type Percept;
    type Score: num_traits::NumAssign + Copy;

    fn percept(&self) -> Self::Percept;
    fn execute_action(&mut self, action: &Self::Action);

    /// Returns the score of the Environment. This is not cumulative or stateful. This is the score
    /// of the Environment at the current state.
    fn score(&self) -> Self::Score;
}

/// A Simulation runs a single Agent in multiple Performance, Environment, Action, Sensing (PEAS)
/// cycles. The Agent's score (Performance) is continually kept up to date.
///
/// The Simulation is aware of both the Environment and the single Agent. Notice that the Agent's
/// generic Action and Percept come from the Environment.
pub struct Simulation<_Environment, _Agent>
where
    _Environment: Environment,
    _Agent: Agent<Action = _Environment::Action, Percept = _Environment::Percept>,
{
    environment: _Environment,
    agent: _Agent,
    time_steps: usize,
    steps_taken: usize,
    score: _Environment::Score,
}

impl<_Environment, _Agent> Simulation<_Environment, _Agent>
where
    _Environment: Environment,
    _Environment::Action: std::fmt::Debug,
    _Agent: Agent<Action = _Environment::Action, Percept = _Environment::Percept>,
{
    pub fn new(environment: _Environment, agent: _Agent, time_steps: usize) -> Self {
        Self {
            environment,
            agent,
            time_steps,
            steps_taken: 0,
            score: _Environment::Score::zero(),
        }
    }

    /// Run one percept, act, execute cycle and return the action taken.
    pub fn step(&mut self) -> _Environment::Action {
        let percept = self.environment.percept();
        let action = self.agent.act(&percept);
        self.environment.execute_action(&action);
        self.score += self.environment.score();
        self.steps_taken += 1;
        tracing::trace!(step = self.steps_taken, ?action, "tick");
        action
    }

    /// Step until all time steps are used up.
    pub fn run(&mut self) {
        while !self.is_finished() {
            self.step();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.steps_taken >= self.time_steps
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Sum of the Environment's score after every step so far.
    pub fn score(&self) -> _Environment::Score {
        self.score
    }

    pub fn environment(&self) -> &_Environment {
        &self.environment
    }

    pub fn agent(&self) -> &_Agent {
        &self.agent
    }
}
