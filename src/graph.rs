//! Undirected dungeon graph module.
//!
//! This module contains the [`Room`] vertex type and the [`Graph`] adjacency-list container that
//! every other part of the game reads from. Rooms are inserted once while the dungeon is being
//! generated; afterwards only their flags change.

use std::collections::BTreeMap;

use color_eyre::eyre::{bail, OptionExt as _, Result};

/// Identifier of a room in the dungeon graph.
pub type RoomId = usize;

/// A single vertex of the dungeon graph.
///
/// This structure holds the position of a room, its ordered list of neighbors and the per-room
/// flags the game mutates while it runs. The neighbor list is only ever grown through
/// [`Graph::add_edge`], which keeps it free of duplicates and of the room's own id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// Unique key of the room within its graph.
    id: RoomId,
    /// Horizontal position, only meaningful to the front end.
    x: i32,
    /// Vertical position, only meaningful to the front end.
    y: i32,
    /// Neighbor ids in insertion order.
    neighbors: Vec<RoomId>,
    /// Whether the player has entered this room.
    visited: bool,
    /// Whether a treasure is still lying in this room.
    has_treasure: bool,
    /// Whether this room ends the game when the player reaches it.
    is_exit: bool,
    /// Traversal weight of the room.
    ///
    /// Every room costs `1` in the current dungeons. The field is kept so a weighted search can be
    /// layered on top of the graph without changing its shape.
    cost: u32,
}

impl Room {
    /// Creates an unconnected room with every flag cleared.
    const fn new(id: RoomId, x: i32, y: i32) -> Self {
        Self {
            id,
            x,
            y,
            neighbors: Vec::new(),
            visited: false,
            has_treasure: false,
            is_exit: false,
            cost: 1,
        }
    }

    /// Returns the id of the room.
    #[must_use]
    pub const fn id(&self) -> RoomId {
        self.id
    }

    /// Returns the `(x, y)` position of the room.
    #[must_use]
    pub const fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Returns the neighbor ids of the room in the order the corridors were added.
    #[must_use]
    pub fn neighbors(&self) -> &[RoomId] {
        &self.neighbors
    }

    /// Returns whether the player has been in this room.
    #[must_use]
    pub const fn visited(&self) -> bool {
        self.visited
    }

    /// Returns whether a treasure is waiting in this room.
    #[must_use]
    pub const fn has_treasure(&self) -> bool {
        self.has_treasure
    }

    /// Returns whether this room is the dungeon exit.
    #[must_use]
    pub const fn is_exit(&self) -> bool {
        self.is_exit
    }

    /// Returns the traversal weight of the room.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Flags the room as visited by the player.
    pub fn mark_visited(&mut self) {
        self.visited = true;
    }

    /// Places or removes the treasure in this room.
    pub fn set_treasure(&mut self, has_treasure: bool) {
        self.has_treasure = has_treasure;
    }

    /// Flags the room as an exit or a regular room.
    pub fn set_exit(&mut self, is_exit: bool) {
        self.is_exit = is_exit;
    }

    /// Removes the treasure from the room, returning whether there was one to pick up.
    pub fn take_treasure(&mut self) -> bool {
        let had_treasure = self.has_treasure;
        self.has_treasure = false;
        had_treasure
    }

    /// Appends a neighbor unless it is already present.
    fn connect(&mut self, neighbor: RoomId) {
        if !self.neighbors.contains(&neighbor) {
            self.neighbors.push(neighbor);
        }
    }
}

/// Undirected graph of rooms keyed by their id.
///
/// This structure stores the dungeon as an adjacency list. Corridors are always stored on both of
/// their endpoints, which keeps the graph undirected: if `b` is a neighbor of `a`, then `a` is a
/// neighbor of `b`. Rooms are kept in an ordered map so iteration over them is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    /// Rooms of the dungeon, ordered by id.
    rooms: BTreeMap<RoomId, Room>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rooms: BTreeMap::new(),
        }
    }

    /// Adds an unconnected room at the given position.
    ///
    /// # Errors
    ///
    /// This function returns an error if a room with the same id already exists. The existing room
    /// is left untouched in that case.
    pub fn add_room(&mut self, id: RoomId, x: i32, y: i32) -> Result<()> {
        if self.rooms.contains_key(&id) {
            bail!("room {id} already exists");
        }
        let _ = self.rooms.insert(id, Room::new(id, x, y));

        Ok(())
    }

    /// Connects two rooms with a corridor.
    ///
    /// This function records each room as a neighbor of the other. Adding a corridor that already
    /// exists does nothing, so calling it twice with the same pair leaves the graph as if it had
    /// been called once.
    ///
    /// # Errors
    ///
    /// This function returns an error, without touching the graph, if:
    /// - Either endpoint is not a room of the graph
    /// - Both endpoints are the same room
    pub fn add_edge(&mut self, first: RoomId, second: RoomId) -> Result<()> {
        if first == second {
            bail!("room {first} cannot be connected to itself");
        }
        if !self.rooms.contains_key(&second) {
            bail!("cannot connect room {first} to unknown room {second}");
        }

        self.rooms
            .get_mut(&first)
            .ok_or_eyre("cannot connect an unknown room")?
            .connect(second);
        self.rooms
            .get_mut(&second)
            .ok_or_eyre("cannot connect an unknown room")?
            .connect(first);

        Ok(())
    }

    /// Returns the neighbors of a room, or an empty slice if the room does not exist.
    ///
    /// The search algorithms lean on this permissive contract so they never have to check the ids
    /// they pull out of the adjacency lists.
    #[must_use]
    pub fn neighbors(&self, id: RoomId) -> &[RoomId] {
        match self.rooms.get(&id) {
            Some(room) => &room.neighbors,
            None => &[],
        }
    }

    /// Returns the room with the given id, if any.
    #[must_use]
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    /// Returns a mutable handle to the room with the given id, if any.
    pub fn room_mut(&mut self, id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(&id)
    }

    /// Returns whether the two rooms are connected by a corridor.
    #[must_use]
    pub fn is_edge(&self, first: RoomId, second: RoomId) -> bool {
        self.neighbors(first).contains(&second)
    }

    /// Iterates over every room in ascending id order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Iterates over every corridor once, as `(lower id, higher id)` pairs.
    pub fn edges(&self) -> impl Iterator<Item = (RoomId, RoomId)> + '_ {
        self.rooms.values().flat_map(|room| {
            room.neighbors
                .iter()
                .filter(move |&&neighbor| room.id < neighbor)
                .map(move |&neighbor| (room.id, neighbor))
        })
    }

    /// Returns the number of rooms in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Returns whether the graph has no rooms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a graph with rooms `0..count` and no corridors.
    fn rooms(count: RoomId) -> Graph {
        let mut graph = Graph::new();
        for id in 0..count {
            graph
                .add_room(id, 0, 0)
                .expect("fresh ids should be accepted");
        }
        graph
    }

    #[test]
    fn test_add_room_starts_unconnected() {
        let mut graph = Graph::new();
        graph.add_room(3, 40, 50).expect("failed to add room");

        let room = graph.room(3).expect("room should exist");
        assert_eq!(room.id(), 3);
        assert_eq!(room.position(), (40, 50));
        assert!(room.neighbors().is_empty());
        assert!(!room.visited());
        assert!(!room.has_treasure());
        assert!(!room.is_exit());
        assert_eq!(room.cost(), 1);
    }

    #[test]
    fn test_add_room_duplicate_id_fails() {
        let mut graph = Graph::new();
        graph.add_room(1, 10, 10).expect("failed to add room");

        assert!(graph.add_room(1, 99, 99).is_err());
        assert_eq!(
            graph.room(1).map(Room::position),
            Some((10, 10)),
            "the original room must survive a rejected insert"
        );
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_add_edge_is_symmetric() {
        let mut graph = rooms(3);
        graph.add_edge(0, 1).expect("failed to add edge");
        graph.add_edge(1, 2).expect("failed to add edge");

        assert_eq!(graph.neighbors(0), &[1]);
        assert_eq!(graph.neighbors(1), &[0, 2]);
        assert_eq!(graph.neighbors(2), &[1]);
        assert!(graph.is_edge(2, 1));
        assert!(!graph.is_edge(0, 2));
    }

    #[test]
    fn test_add_edge_twice_is_idempotent() {
        let mut once = rooms(4);
        once.add_edge(2, 3).expect("failed to add edge");

        let mut twice = rooms(4);
        twice.add_edge(2, 3).expect("failed to add edge");
        twice.add_edge(2, 3).expect("repeated edge should be accepted");
        twice.add_edge(3, 2).expect("reversed edge should be accepted");

        assert_eq!(once, twice);
        assert_eq!(twice.neighbors(2), &[3]);
    }

    #[test]
    fn test_add_edge_unknown_room_fails_without_mutation() {
        let mut graph = rooms(2);

        assert!(graph.add_edge(0, 7).is_err());
        assert!(graph.add_edge(7, 0).is_err());
        assert!(graph.neighbors(0).is_empty());
    }

    #[test]
    fn test_add_edge_self_loop_fails() {
        let mut graph = rooms(1);

        assert!(graph.add_edge(0, 0).is_err());
        assert!(graph.neighbors(0).is_empty());
    }

    #[test]
    fn test_unknown_room_is_permissive() {
        let graph = rooms(1);

        assert!(graph.neighbors(42).is_empty());
        assert!(graph.room(42).is_none());
        assert!(!graph.is_edge(0, 42));
        assert!(!graph.is_empty());
        assert!(Graph::new().is_empty());
    }

    #[test]
    fn test_edges_lists_each_corridor_once() {
        let mut graph = rooms(4);
        graph.add_edge(0, 1).expect("failed to add edge");
        graph.add_edge(2, 0).expect("failed to add edge");
        graph.add_edge(3, 1).expect("failed to add edge");

        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![(0, 1), (0, 2), (1, 3)]);
    }

    #[test]
    fn test_take_treasure_only_once() {
        let mut graph = rooms(1);
        let room = graph.room_mut(0).expect("room should exist");
        room.set_treasure(true);

        assert!(room.take_treasure());
        assert!(!room.take_treasure());
        assert!(!room.has_treasure());
    }
}
