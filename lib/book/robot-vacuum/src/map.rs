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

//! Text map format.
//!
//! One line per row, one character per tile:
//!
//! - `.` clean
//! - `*` dirty
//! - `#` impassable
//! - `R` clean, and the robot starts here
//!
//! Trailing whitespace is ignored and blank lines are skipped.

use std::str::FromStr;

use crate::grid::{Position, TileStatus};
use crate::VacuumWorldError;

const ROBOT_START_SYMBOL: char = 'R';

/// A parsed map: the initial status of every tile and, optionally, where the robot starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    width: usize,
    height: usize,
    statuses: Vec<TileStatus>,
    start: Option<Position>,
}

impl TileMap {
    /// Build a map from rows of statuses. All rows must have the same length.
    pub fn from_rows(
        rows: Vec<Vec<TileStatus>>,
        start: Option<Position>,
    ) -> Result<Self, VacuumWorldError> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(VacuumWorldError::EmptyMap);
        }
        for (row, statuses) in rows.iter().enumerate() {
            if statuses.len() != width {
                return Err(VacuumWorldError::RaggedRow {
                    row,
                    expected: width,
                    found: statuses.len(),
                });
            }
        }
        let height = rows.len();
        Ok(Self {
            width,
            height,
            statuses: rows.into_iter().flatten().collect(),
            start,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Where the map says the robot starts, if it says.
    pub fn start(&self) -> Option<Position> {
        self.start
    }

    /// Status of the tile at `position`, or `None` when it is off the map.
    pub fn status(&self, position: Position) -> Option<TileStatus> {
        if position.row < 0 || position.col < 0 {
            return None;
        }
        let (row, col) = (position.row as usize, position.col as usize);
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.statuses[row * self.width + col])
    }

    /// Row-major statuses of every tile.
    pub fn statuses(&self) -> &[TileStatus] {
        &self.statuses
    }

    /// Every position the robot could stand on, in row-major order.
    pub fn passable_positions(&self) -> Vec<Position> {
        self.statuses
            .iter()
            .enumerate()
            .filter(|(_, status)| status.is_passable())
            .map(|(index, _)| {
                Position::new((index / self.width) as i32, (index % self.width) as i32)
            })
            .collect()
    }

    /// Number of dirty tiles.
    pub fn dirty_count(&self) -> usize {
        self.statuses
            .iter()
            .filter(|&&status| status == TileStatus::Dirty)
            .count()
    }
}

impl FromStr for TileMap {
    type Err = VacuumWorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        let mut start = None;
        for line in s.lines().map(str::trim_end).filter(|line| !line.is_empty()) {
            let row = rows.len();
            let mut statuses = Vec::with_capacity(line.len());
            for (col, symbol) in line.chars().enumerate() {
                let status = if symbol == ROBOT_START_SYMBOL {
                    if start.is_some() {
                        return Err(VacuumWorldError::MultipleStarts);
                    }
                    start = Some(Position::new(row as i32, col as i32));
                    TileStatus::Clean
                } else {
                    TileStatus::from_symbol(symbol)
                        .ok_or(VacuumWorldError::UnknownSymbol { symbol, row, col })?
                };
                statuses.push(status);
            }
            rows.push(statuses);
        }
        Self::from_rows(rows, start)
    }
}

impl std::fmt::Display for TileMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, statuses) in self.statuses.chunks(self.width).enumerate() {
            for (col, status) in statuses.iter().enumerate() {
                if self.start == Some(Position::new(row as i32, col as i32)) {
                    write!(f, "{}", ROBOT_START_SYMBOL)?;
                } else {
                    write!(f, "{}", status.symbol())?;
                }
            }
            if row + 1 < self.height {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
