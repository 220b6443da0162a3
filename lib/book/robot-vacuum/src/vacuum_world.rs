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

use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{Action, Direction, Position, Tile, TileStatus};
use crate::map::TileMap;
use crate::{Environment, VacuumWorldError};

/// Neighborhood is the Percept that the robot receives from the Environment: the tile it is
/// standing on plus its four cardinal neighbors. A neighbor off the edge of the grid is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Neighborhood {
    /// The tile the robot is standing on.
    pub current: Tile,

    /// One row up.
    pub above: Option<Tile>,

    /// One row down.
    pub below: Option<Tile>,

    /// One column left.
    pub left: Option<Tile>,

    /// One column right.
    pub right: Option<Tile>,
}

impl Neighborhood {
    /// The neighbor one step in `direction`.
    pub fn neighbor(&self, direction: Direction) -> Option<Tile> {
        match direction {
            Direction::Up => self.above,
            Direction::Down => self.below,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

/// A rectangular room of tiles with a single robot in it.
///
/// The robot always stands on an in-bounds, passable tile. The only mutations are tiles going
/// from dirty to clean and the robot changing position.
#[derive(Debug, Clone, PartialEq)]
pub struct GridEnvironment {
    height: i32,
    width: i32,
    statuses: Vec<TileStatus>,
    robot_location: Position,
    initially_dirty: usize,
}

impl GridEnvironment {
    /// Place the robot on `start` in a fresh copy of `map`.
    pub fn new(map: &TileMap, start: Position) -> Result<Self, VacuumWorldError> {
        match map.status(start) {
            None => Err(VacuumWorldError::StartOutOfBounds(start)),
            Some(TileStatus::Impassable) => Err(VacuumWorldError::StartImpassable(start)),
            Some(_) => Ok(Self {
                height: map.height() as i32,
                width: map.width() as i32,
                statuses: map.statuses().to_vec(),
                robot_location: start,
                initially_dirty: map.dirty_count(),
            }),
        }
    }

    /// Place the robot where the map says, or on a uniformly random passable tile if the map
    /// has no start marker.
    pub fn from_map<R: Rng + ?Sized>(
        map: &TileMap,
        rng: &mut R,
    ) -> Result<Self, VacuumWorldError> {
        let start = match map.start() {
            Some(start) => start,
            None => *map
                .passable_positions()
                .choose(rng)
                .ok_or(VacuumWorldError::NoPassableTile)?,
        };
        Self::new(map, start)
    }

    /// Number of columns.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, position: Position) -> Option<usize> {
        if (0..self.height).contains(&position.row) && (0..self.width).contains(&position.col) {
            Some((position.row * self.width + position.col) as usize)
        } else {
            None
        }
    }

    /// The tile at `position`, or `None` when it is off the grid.
    pub fn tile(&self, position: Position) -> Option<Tile> {
        self.index(position)
            .map(|index| Tile::new(position, self.statuses[index]))
    }

    /// The robot's only sensor.
    pub fn neighbor_tiles(&self) -> Neighborhood {
        let here = self.robot_location;
        let current = Tile::new(here, self.statuses[self.robot_index()]);
        Neighborhood {
            current,
            above: self.tile(here.neighbor(Direction::Up)),
            below: self.tile(here.neighbor(Direction::Down)),
            left: self.tile(here.neighbor(Direction::Left)),
            right: self.tile(here.neighbor(Direction::Right)),
        }
    }

    /// Where the robot is standing.
    pub fn current_position(&self) -> Position {
        self.robot_location
    }

    fn robot_index(&self) -> usize {
        (self.robot_location.row * self.width + self.robot_location.col) as usize
    }

    /// Apply the robot's action. Cleaning a tile that is not dirty, and moving into a wall or
    /// off the grid, leave everything unchanged.
    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::Clean => {
                let index = self.robot_index();
                if self.statuses[index] == TileStatus::Dirty {
                    self.statuses[index] = TileStatus::Clean;
                }
            }
            Action::DoNothing => {}
            Action::MoveUp => self.move_robot(Direction::Up),
            Action::MoveDown => self.move_robot(Direction::Down),
            Action::MoveLeft => self.move_robot(Direction::Left),
            Action::MoveRight => self.move_robot(Direction::Right),
        }
    }

    fn move_robot(&mut self, direction: Direction) {
        let target = self.robot_location.neighbor(direction);
        if self.tile(target).map_or(false, |tile| tile.is_passable()) {
            self.robot_location = target;
        }
    }

    /// Number of tiles that are dirty right now.
    pub fn dirty_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|&&s| s == TileStatus::Dirty)
            .count()
    }

    /// Number of tiles that were dirty when the environment was built.
    pub fn initially_dirty(&self) -> usize {
        self.initially_dirty
    }

    /// Number of tiles the robot has cleaned so far. Tiles never get dirty again, so this is
    /// the drop in the dirty count.
    pub fn cleaned_count(&self) -> usize {
        self.initially_dirty - self.dirty_count()
    }

    /// Fraction of the originally dirty tiles that are now clean. A room that started clean
    /// scores 1.0.
    pub fn performance_measure(&self) -> f64 {
        if self.initially_dirty == 0 {
            return 1.0;
        }
        self.cleaned_count() as f64 / self.initially_dirty as f64
    }
}

impl Environment for GridEnvironment {
    type Action = Action;
    type Percept = Neighborhood;
    type Score = f64;

    fn percept(&self) -> Self::Percept {
        self.neighbor_tiles()
    }

    fn execute_action(&mut self, action: &Self::Action) {
        self.apply_action(*action);
    }

    fn score(&self) -> Self::Score {
        self.performance_measure()
    }
}

// print the room with the robot drawn as R, one row per line.
impl std::fmt::Display for GridEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = String::with_capacity(((self.width + 1) * self.height) as usize);
        for row in 0..self.height {
            for col in 0..self.width {
                let position = Position::new(row, col);
                if position == self.robot_location {
                    s.push('R');
                } else {
                    s.push(self.statuses[(row * self.width + col) as usize].symbol());
                }
            }
            if row < self.height - 1 {
                s.push('\n');
            }
        }
        write!(f, "{}", s)
    }
}
