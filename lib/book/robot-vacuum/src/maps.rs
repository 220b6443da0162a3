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

//! Maps bundled with the library. None of them has a start marker, so every trial drops the
//! robot somewhere random.

use crate::map::TileMap;
use crate::VacuumWorldError;

/// A named map layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceMap {
    pub name: &'static str,
    pub layout: &'static str,
}

impl ReferenceMap {
    pub fn tile_map(&self) -> Result<TileMap, VacuumWorldError> {
        self.layout.parse()
    }
}

pub static REFERENCE_MAPS: [ReferenceMap; 5] = [
    // open room, dirty everywhere
    ReferenceMap {
        name: "map01",
        layout: include_str!("../maps/map01.txt"),
    },
    // pillars near the walls
    ReferenceMap {
        name: "map02",
        layout: include_str!("../maps/map02.txt"),
    },
    // two rooms joined along the bottom
    ReferenceMap {
        name: "map03",
        layout: include_str!("../maps/map03.txt"),
    },
    // dirty ring corridor around a clean inner room
    ReferenceMap {
        name: "map04",
        layout: include_str!("../maps/map04.txt"),
    },
    // checkerboard dirt between wall segments
    ReferenceMap {
        name: "map05",
        layout: include_str!("../maps/map05.txt"),
    },
];

/// Look up a bundled map by name.
pub fn find(name: &str) -> Option<&'static ReferenceMap> {
    REFERENCE_MAPS.iter().find(|reference| reference.name == name)
}
