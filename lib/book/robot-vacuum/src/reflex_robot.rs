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

use crate::grid::{Action, Direction, Position};
use crate::vacuum_world::Neighborhood;
use crate::Agent;

/// Once the robot has seen the same tile more than this many ticks in a row it is allowed to
/// turn straight back the way it came.
pub const STALL_LIMIT: u32 = 2;

/// A reflex agent with a little state, for a room it can only see one tile around.
///
/// Each tick, in priority order:
///
/// 1. Clean the current tile if it is dirty.
/// 2. Step onto the first dirty neighbor, scanning right, down, left, up.
/// 3. Step onto the first passable neighbor in the same order, skipping the reverse of the
///    previous move unless the robot has been stuck on one tile for longer than
///    [`STALL_LIMIT`] ticks.
/// 4. Do nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReflexRobotAgent {
    last_visited: Option<Position>,
    last_move: Option<Direction>,
    same_tile_count: u32,
}

impl ReflexRobotAgent {
    /// A robot that remembers nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last move the robot chose, whether or not it succeeded.
    pub fn last_move(&self) -> Option<Direction> {
        self.last_move
    }

    /// How many consecutive ticks, beyond the first, the robot has observed the same tile.
    pub fn same_tile_count(&self) -> u32 {
        self.same_tile_count
    }

    fn remember(&mut self, percept: &Neighborhood) {
        let here = percept.current.position;
        if self.last_visited == Some(here) {
            self.same_tile_count += 1;
        } else {
            self.same_tile_count = 0;
        }
        self.last_visited = Some(here);
    }

    fn choose_move(&mut self, direction: Direction) -> Action {
        self.last_move = Some(direction);
        direction.into()
    }

    fn explore(&mut self, percept: &Neighborhood) -> Action {
        let suppressed = if self.same_tile_count > STALL_LIMIT {
            self.same_tile_count = 0;
            None
        } else {
            self.last_move.map(Direction::opposite)
        };

        let open = Direction::SCAN_ORDER
            .into_iter()
            .filter(|&direction| Some(direction) != suppressed)
            .find(|&direction| {
                percept
                    .neighbor(direction)
                    .map_or(false, |tile| tile.is_passable())
            });

        match open {
            Some(direction) => self.choose_move(direction),
            None => Action::DoNothing,
        }
    }
}

impl Agent for ReflexRobotAgent {
    type Action = Action;
    type Percept = Neighborhood;

    fn act(&mut self, percept: &Self::Percept) -> Self::Action {
        self.remember(percept);

        if percept.current.is_dirty() {
            return Action::Clean;
        }

        let dirty = Direction::SCAN_ORDER.into_iter().find(|&direction| {
            percept
                .neighbor(direction)
                .map_or(false, |tile| tile.is_dirty())
        });
        match dirty {
            Some(direction) => self.choose_move(direction),
            None => self.explore(percept),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::grid::{Tile, TileStatus};
    use crate::map::TileMap;
    use crate::vacuum_world::GridEnvironment;

    const CENTER: Position = Position { row: 1, col: 1 };

    /// A percept centred on (1, 1) with the given statuses; `None` means off the grid.
    fn percept(
        current: TileStatus,
        above: Option<TileStatus>,
        below: Option<TileStatus>,
        left: Option<TileStatus>,
        right: Option<TileStatus>,
    ) -> Neighborhood {
        let tile = |direction: Direction, status: Option<TileStatus>| {
            status.map(|status| Tile::new(CENTER.neighbor(direction), status))
        };
        Neighborhood {
            current: Tile::new(CENTER, current),
            above: tile(Direction::Up, above),
            below: tile(Direction::Down, below),
            left: tile(Direction::Left, left),
            right: tile(Direction::Right, right),
        }
    }

    fn all_clean() -> Neighborhood {
        use TileStatus::Clean;
        percept(Clean, Some(Clean), Some(Clean), Some(Clean), Some(Clean))
    }

    #[test]
    fn test_one_row_scenario() {
        let map: TileMap = "*.#".parse().expect("parse failed");
        let mut env = GridEnvironment::new(&map, Position::new(0, 0)).expect("environment failed");
        let mut robot = ReflexRobotAgent::new();

        let mut tick = |env: &mut GridEnvironment| {
            let action = robot.act(&env.neighbor_tiles());
            env.apply_action(action);
            action
        };

        assert_eq!(tick(&mut env), Action::Clean);
        assert_eq!(tick(&mut env), Action::MoveRight);
        assert_eq!(env.current_position(), Position::new(0, 1));
        assert_eq!(tick(&mut env), Action::DoNothing);
    }

    #[test]
    fn test_one_row_scenario_breaks_out_after_stalling() {
        let map: TileMap = "*.#".parse().expect("parse failed");
        let mut env = GridEnvironment::new(&map, Position::new(0, 0)).expect("environment failed");
        let mut robot = ReflexRobotAgent::new();
        let mut actions = Vec::new();
        for _ in 0..6 {
            let action = robot.act(&env.neighbor_tiles());
            env.apply_action(action);
            actions.push(action);
        }
        assert_eq!(
            actions,
            vec![
                Action::Clean,
                Action::MoveRight,
                Action::DoNothing,
                Action::DoNothing,
                Action::DoNothing,
                Action::MoveLeft,
            ]
        );
        assert_eq!(robot.same_tile_count(), 0);
        assert_eq!(robot.last_move(), Some(Direction::Left));
    }

    #[test]
    fn test_dirty_tile_is_cleaned_before_anything_else() {
        use TileStatus::*;
        let mut robot = ReflexRobotAgent::new();
        let around = percept(Dirty, Some(Dirty), None, Some(Clean), Some(Dirty));
        assert_eq!(robot.act(&around), Action::Clean);
        assert_eq!(robot.last_move(), None);
    }

    #[test]
    fn test_seeks_dirt_in_scan_order() {
        use TileStatus::*;
        let cases = [
            (
                percept(Clean, Some(Dirty), Some(Dirty), Some(Dirty), Some(Dirty)),
                Action::MoveRight,
            ),
            (
                percept(Clean, Some(Dirty), Some(Dirty), Some(Dirty), Some(Clean)),
                Action::MoveDown,
            ),
            (
                percept(Clean, Some(Dirty), None, Some(Dirty), Some(Impassable)),
                Action::MoveLeft,
            ),
            (
                percept(Clean, Some(Dirty), Some(Clean), None, Some(Clean)),
                Action::MoveUp,
            ),
        ];
        for (around, expected) in cases {
            let mut robot = ReflexRobotAgent::new();
            assert_eq!(robot.act(&around), expected, "{:?}", around);
            assert_eq!(robot.last_move(), expected.direction());
        }
    }

    #[test]
    fn test_dirt_beats_reverse_suppression() {
        use TileStatus::*;
        let mut robot = ReflexRobotAgent {
            last_move: Some(Direction::Right),
            ..ReflexRobotAgent::default()
        };
        let around = percept(Clean, Some(Clean), Some(Clean), Some(Dirty), Some(Clean));
        assert_eq!(robot.act(&around), Action::MoveLeft);
    }

    #[test]
    fn test_explores_first_open_neighbor() {
        use TileStatus::*;
        let mut robot = ReflexRobotAgent::new();
        let around = percept(Clean, Some(Clean), Some(Impassable), None, Some(Impassable));
        assert_eq!(robot.act(&around), Action::MoveUp);
        assert_eq!(robot.last_move(), Some(Direction::Up));
    }

    #[test]
    fn test_no_last_move_suppresses_nothing() {
        let mut robot = ReflexRobotAgent::new();
        assert_eq!(robot.act(&all_clean()), Action::MoveRight);
    }

    #[test]
    fn test_reverse_of_last_move_is_suppressed() {
        use TileStatus::*;
        // each reverse direction would otherwise be the first open neighbor
        let cases = [
            (Direction::Left, all_clean(), Action::MoveDown),
            (
                Direction::Up,
                percept(Clean, Some(Clean), Some(Clean), Some(Clean), Some(Impassable)),
                Action::MoveLeft,
            ),
            (
                Direction::Right,
                percept(Clean, Some(Clean), None, Some(Clean), Some(Impassable)),
                Action::MoveUp,
            ),
            (
                Direction::Down,
                percept(Clean, Some(Clean), None, None, Some(Impassable)),
                Action::DoNothing,
            ),
        ];
        for (last_move, around, expected) in cases {
            let mut robot = ReflexRobotAgent {
                last_move: Some(last_move),
                ..ReflexRobotAgent::default()
            };
            assert_eq!(robot.act(&around), expected, "last move {:?}", last_move);
        }

        // only the way back is open
        let mut robot = ReflexRobotAgent {
            last_move: Some(Direction::Up),
            ..ReflexRobotAgent::default()
        };
        let around = percept(Clean, None, Some(Clean), Some(Impassable), Some(Impassable));
        assert_eq!(robot.act(&around), Action::DoNothing);
        assert_eq!(robot.last_move(), Some(Direction::Up));
    }

    #[test]
    fn test_stall_allows_reverse_and_resets_count() {
        use TileStatus::*;
        let around = percept(Clean, None, Some(Clean), Some(Impassable), Some(Impassable));
        let mut robot = ReflexRobotAgent {
            last_move: Some(Direction::Up),
            ..ReflexRobotAgent::default()
        };
        assert_eq!(robot.act(&around), Action::DoNothing);
        assert_eq!(robot.same_tile_count(), 0);
        assert_eq!(robot.act(&around), Action::DoNothing);
        assert_eq!(robot.same_tile_count(), 1);
        assert_eq!(robot.act(&around), Action::DoNothing);
        assert_eq!(robot.same_tile_count(), 2);
        assert_eq!(robot.act(&around), Action::MoveDown);
        assert_eq!(robot.same_tile_count(), 0);
        assert_eq!(robot.last_move(), Some(Direction::Down));
    }

    #[test]
    fn test_moving_resets_same_tile_count() {
        let mut robot = ReflexRobotAgent {
            last_visited: Some(Position::new(0, 0)),
            same_tile_count: 2,
            ..ReflexRobotAgent::default()
        };
        robot.act(&all_clean());
        assert_eq!(robot.same_tile_count(), 0);
    }

    #[test]
    fn test_cleaning_still_counts_same_tile() {
        let mut robot = ReflexRobotAgent::new();
        let mut around = all_clean();
        around.current.status = TileStatus::Dirty;
        robot.act(&around);
        robot.act(&around);
        assert_eq!(robot.same_tile_count(), 1);
    }

    fn any_status() -> impl Strategy<Value = TileStatus> {
        prop_oneof![
            Just(TileStatus::Clean),
            Just(TileStatus::Dirty),
            Just(TileStatus::Impassable),
        ]
    }

    fn any_neighbor() -> impl Strategy<Value = Option<TileStatus>> {
        prop::option::of(any_status())
    }

    fn any_percept() -> impl Strategy<Value = Neighborhood> {
        (
            prop_oneof![Just(TileStatus::Clean), Just(TileStatus::Dirty)],
            any_neighbor(),
            any_neighbor(),
            any_neighbor(),
            any_neighbor(),
        )
            .prop_map(|(current, above, below, left, right)| {
                percept(current, above, below, left, right)
            })
    }

    fn any_robot() -> impl Strategy<Value = ReflexRobotAgent> {
        (
            prop::option::of(prop_oneof![
                Just(Direction::Up),
                Just(Direction::Down),
                Just(Direction::Left),
                Just(Direction::Right),
            ]),
            0..6u32,
            any::<bool>(),
        )
            .prop_map(|(last_move, same_tile_count, was_here)| ReflexRobotAgent {
                last_visited: was_here.then_some(CENTER),
                last_move,
                same_tile_count,
            })
    }

    proptest! {
        #[test]
        fn test_dirty_current_tile_always_cleans(
            mut robot in any_robot(),
            around in any_percept(),
        ) {
            let mut around = around;
            around.current.status = TileStatus::Dirty;
            prop_assert_eq!(robot.act(&around), Action::Clean);
        }

        #[test]
        fn test_moves_only_onto_passable_neighbors(
            mut robot in any_robot(),
            around in any_percept(),
        ) {
            let action = robot.act(&around);
            prop_assert!(Action::ALL.contains(&action));
            if let Some(direction) = action.direction() {
                let target = around.neighbor(direction);
                prop_assert!(target.map_or(false, |tile| tile.is_passable()), "{:?}", target);
                prop_assert_eq!(robot.last_move(), Some(direction));
            }
        }

        #[test]
        fn test_reverse_only_chosen_when_stalled_or_dirty(
            mut robot in any_robot(),
            around in any_percept(),
        ) {
            let before = robot.clone();
            let action = robot.act(&around);
            let stalled = before.last_visited == Some(CENTER) && before.same_tile_count + 1 > STALL_LIMIT;
            let reverse = before.last_move.map(|direction| Action::from(direction.opposite()));
            if reverse == Some(action) && !stalled {
                let target = action.direction().and_then(|direction| around.neighbor(direction));
                prop_assert!(target.map_or(false, |tile| tile.is_dirty()));
            }
        }
    }
}
