//! Graph search module.
//!
//! This module contains the two traversals the game is built around: a breadth-first search that
//! finds the shortest route between two rooms (used by the magic map) and a randomized depth-first
//! search that finds *some* route (used by the enemy). Both return the route as the ordered list of
//! room ids from start to goal, both ends included, or [`None`] when the goal cannot be reached.

use std::collections::{hash_map::Entry, HashMap, HashSet, VecDeque};

use rand::{seq::SliceRandom as _, Rng};

use crate::graph::{Graph, RoomId};

/// Strategy used by [`dfs`] to order the neighbors of a room before pushing them.
///
/// The enemy relies on a random order so it does not take the same route on every replan. Tests
/// swap in [`InsertionOrder`] to get reproducible traversals.
pub trait NeighborOrder {
    /// Rearranges the neighbors in place.
    fn arrange(&mut self, neighbors: &mut [RoomId]);
}

/// Leaves neighbors in the order their corridors were added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertionOrder;

impl NeighborOrder for InsertionOrder {
    fn arrange(&mut self, _neighbors: &mut [RoomId]) {}
}

/// Shuffles neighbors with the wrapped random number generator.
#[derive(Debug, Clone)]
pub struct Shuffled<R> {
    /// Source of randomness for every shuffle.
    rng: R,
}

impl<R: Rng> Shuffled<R> {
    /// Wraps a random number generator.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> NeighborOrder for Shuffled<R> {
    fn arrange(&mut self, neighbors: &mut [RoomId]) {
        neighbors.shuffle(&mut self.rng);
    }
}

/// Finds a shortest route between two rooms.
///
/// This function expands rooms level by level from `start`, recording for every room the room it
/// was first discovered from. Since every corridor has the same weight, the first discovery of a
/// room is along a shortest route, so walking the recorded parents back from `goal` yields a route
/// with the fewest corridors. Among several shortest routes, the one following the earliest-added
/// corridors wins.
///
/// A route from a room to itself is the single room, even if it is not part of the graph.
#[must_use]
pub fn bfs(graph: &Graph, start: RoomId, goal: RoomId) -> Option<Vec<RoomId>> {
    if start == goal {
        return Some(vec![start]);
    }

    let mut queue = VecDeque::from([start]);
    let mut parents = HashMap::from([(start, None)]);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            return Some(unwind(&parents, goal));
        }

        for &neighbor in graph.neighbors(current) {
            if let Entry::Vacant(slot) = parents.entry(neighbor) {
                let _ = slot.insert(Some(current));
                queue.push_back(neighbor);
            }
        }
    }

    None
}

/// Finds some route between two rooms, not necessarily a short one.
///
/// This function runs an explicit-stack depth-first search. Neighbors are passed through `order`
/// before being pushed, so with a [`Shuffled`] order two calls on the same graph may return
/// different routes. A room is only finalized when it is popped: it may sit on the stack several
/// times, the first popped occurrence fixes its parent and later occurrences are skipped. The
/// returned route never repeats a room.
///
/// A route from a room to itself is the single room, even if it is not part of the graph.
pub fn dfs<O>(graph: &Graph, start: RoomId, goal: RoomId, order: &mut O) -> Option<Vec<RoomId>>
where
    O: NeighborOrder + ?Sized,
{
    if start == goal {
        return Some(vec![start]);
    }

    let mut stack = vec![(start, None)];
    let mut finalized = HashSet::new();
    let mut parents = HashMap::new();

    while let Some((current, parent)) = stack.pop() {
        if !finalized.insert(current) {
            continue;
        }
        let _ = parents.insert(current, parent);

        if current == goal {
            return Some(unwind(&parents, goal));
        }

        let mut neighbors = graph.neighbors(current).to_vec();
        order.arrange(&mut neighbors);
        stack.extend(
            neighbors
                .into_iter()
                .filter(|neighbor| !finalized.contains(neighbor))
                .map(|neighbor| (neighbor, Some(current))),
        );
    }

    None
}

/// Rebuilds the route ending at `goal` from a parent table.
///
/// The table maps every reached room to the room it was reached from, with the start mapped to
/// [`None`].
fn unwind(parents: &HashMap<RoomId, Option<RoomId>>, goal: RoomId) -> Vec<RoomId> {
    let mut route = vec![goal];
    let mut current = goal;
    while let Some(&Some(parent)) = parents.get(&current) {
        route.push(parent);
        current = parent;
    }
    route.reverse();

    route
}
