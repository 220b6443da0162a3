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

//! Value types shared by the map, the environment and the robot.

use serde::{Deserialize, Serialize};

/// A grid cell coordinate. Rows grow downwards, columns grow rightwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Row, starting at 0 at the top.
    pub row: i32,

    /// Column, starting at 0 on the left.
    pub col: i32,
}

impl Position {
    /// Create a new position.
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The adjacent position one step in `direction`. May be off the grid.
    pub fn neighbor(self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.offset();
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four cardinal directions the robot can move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards row 0.
    Up,

    /// Away from row 0.
    Down,

    /// Towards column 0.
    Left,

    /// Away from column 0.
    Right,
}

impl Direction {
    /// The order in which the robot scans its neighbors. Earlier entries win ties.
    pub const SCAN_ORDER: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// The direction that undoes a step in this direction.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// (row, column) delta of one step in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Status of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileStatus {
    /// Nothing left to do here.
    Clean,

    /// Can be cleaned by the robot standing on it.
    Dirty,

    /// A wall or obstacle. The robot can never stand here.
    Impassable,
}

impl TileStatus {
    /// Map file symbol for this status.
    pub fn symbol(self) -> char {
        match self {
            TileStatus::Clean => '.',
            TileStatus::Dirty => '*',
            TileStatus::Impassable => '#',
        }
    }

    /// Parse a map file symbol. The robot start marker is handled by the map parser.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(TileStatus::Clean),
            '*' => Some(TileStatus::Dirty),
            '#' => Some(TileStatus::Impassable),
            _ => None,
        }
    }

    /// Whether the robot may stand on a tile with this status.
    pub fn is_passable(self) -> bool {
        self != TileStatus::Impassable
    }
}

/// A tile as observed by the robot: where it is and what state it is in. Two observations
/// refer to the same tile when their positions are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    /// Where the tile is.
    pub position: Position,

    /// Its status at the time it was observed.
    pub status: TileStatus,
}

impl Tile {
    /// Create a new tile observation.
    pub fn new(position: Position, status: TileStatus) -> Self {
        Self { position, status }
    }

    /// Whether the tile is dirty.
    pub fn is_dirty(&self) -> bool {
        self.status == TileStatus::Dirty
    }

    /// Whether the robot may stand on this tile.
    pub fn is_passable(&self) -> bool {
        self.status.is_passable()
    }
}

/// Everything the robot can decide to do in one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Clean the current tile.
    Clean,

    /// Stay put.
    DoNothing,

    /// Move one tile up.
    MoveUp,

    /// Move one tile down.
    MoveDown,

    /// Move one tile left.
    MoveLeft,

    /// Move one tile right.
    MoveRight,
}

impl Action {
    /// All actions, in declaration order.
    pub const ALL: [Action; 6] = [
        Action::Clean,
        Action::DoNothing,
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
    ];

    /// The direction of a move action, or `None` for actions that don't move.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::MoveUp => Some(Direction::Up),
            Action::MoveDown => Some(Direction::Down),
            Action::MoveLeft => Some(Direction::Left),
            Action::MoveRight => Some(Direction::Right),
            Action::Clean | Action::DoNothing => None,
        }
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Action::MoveUp,
            Direction::Down => Action::MoveDown,
            Direction::Left => Action::MoveLeft,
            Direction::Right => Action::MoveRight,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::Clean => "CLEAN",
            Action::DoNothing => "DO_NOTHING",
            Action::MoveUp => "MOVE_UP",
            Action::MoveDown => "MOVE_DOWN",
            Action::MoveLeft => "MOVE_LEFT",
            Action::MoveRight => "MOVE_RIGHT",
        };
        write!(f, "{}", name)
    }
}
