//! Dungeon layout module.
//!
//! This module contains the built-in dungeon: twelve rooms laid out on a four by three grid,
//! joined by horizontal, vertical and a few diagonal corridors, with the exit in the bottom right
//! corner and a handful of treasures scattered over the inner rooms.

use color_eyre::eyre::{OptionExt as _, Result};
use log::debug;
use rand::{seq::SliceRandom as _, Rng};

use crate::graph::{Graph, RoomId};

/// Room the player starts in.
pub const PLAYER_START: RoomId = 0;

/// Room the enemy starts in, opposite the player.
pub const ENEMY_START: RoomId = 11;

/// Room that wins the game when the player reaches it.
pub const EXIT_ROOM: RoomId = 11;

/// Default number of treasures placed in the dungeon.
pub const DEFAULT_TREASURES: usize = 4;

/// Width of the area the room positions live in.
pub const WORLD_WIDTH: i32 = 1000;

/// Height of the area the room positions live in.
pub const WORLD_HEIGHT: i32 = 700;

/// Room positions, indexed by room id.
const POSITIONS: [(i32, i32); 12] = [
    (200, 150),
    (400, 150),
    (600, 150),
    (800, 150),
    (200, 350),
    (400, 350),
    (600, 350),
    (800, 350),
    (200, 550),
    (400, 550),
    (600, 550),
    (800, 550),
];

/// Corridors of the dungeon.
const CORRIDORS: [(RoomId, RoomId); 21] = [
    // rows
    (0, 1),
    (1, 2),
    (2, 3),
    (4, 5),
    (5, 6),
    (6, 7),
    (8, 9),
    (9, 10),
    (10, 11),
    // columns
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
    (4, 8),
    (5, 9),
    (6, 10),
    (7, 11),
    // diagonals
    (1, 4),
    (2, 5),
    (6, 9),
    (7, 10),
];

/// Rooms that may hold a treasure: everything except the two starting corners.
const TREASURE_ROOMS: [RoomId; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// Builds the built-in dungeon.
///
/// This function lays out the fixed rooms and corridors, flags [`EXIT_ROOM`] as the exit and puts
/// treasures in `treasures` distinct rooms drawn from the inner rooms with `rng`. Asking for more
/// treasures than there are candidate rooms fills every candidate.
///
/// # Errors
///
/// This function returns an error if the fixed layout is inconsistent, which would be a bug in the
/// layout tables.
pub fn example<R: Rng + ?Sized>(rng: &mut R, treasures: usize) -> Result<Graph> {
    let mut graph = Graph::new();

    for (id, &(x, y)) in POSITIONS.iter().enumerate() {
        graph.add_room(id, x, y)?;
    }
    for &(first, second) in &CORRIDORS {
        graph.add_edge(first, second)?;
    }

    graph
        .room_mut(EXIT_ROOM)
        .ok_or_eyre("exit room is missing from the layout")?
        .set_exit(true);

    for &id in TREASURE_ROOMS.choose_multiple(rng, treasures) {
        graph
            .room_mut(id)
            .ok_or_eyre("treasure room is missing from the layout")?
            .set_treasure(true);
        debug!("treasure placed in room {id}");
    }

    Ok(graph)
}
