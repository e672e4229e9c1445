//! Magic map module.
//!
//! This module contains the overlay that shows the player the shortest way to the exit. The route
//! is computed once, when the overlay is switched on, and is not refreshed as the player moves:
//! switching the overlay off and on again is how the player asks for a fresh route.

use log::debug;

use crate::{
    graph::{Graph, RoomId},
    search,
};

/// Toggleable overlay holding a breadth-first route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapOverlay {
    /// Whether the overlay is shown.
    active: bool,
    /// Route cached at activation time, empty when no route exists.
    path: Vec<RoomId>,
}

impl MapOverlay {
    /// Creates an inactive overlay.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: false,
            path: Vec::new(),
        }
    }

    /// Returns whether the overlay is shown.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the cached route, empty if inactive or if no route was found.
    #[must_use]
    pub fn path(&self) -> &[RoomId] {
        &self.path
    }

    /// Shows the overlay with the shortest route from `from` to `to`.
    pub fn activate(&mut self, graph: &Graph, from: RoomId, to: RoomId) {
        self.active = true;
        self.path = search::bfs(graph, from, to).unwrap_or_default();
        debug!("magic map activated from room {from} to room {to}: {:?}", self.path);
    }

    /// Hides the overlay and forgets its route.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.path.clear();
    }

    /// Activates the overlay if it is hidden, deactivates it otherwise.
    pub fn toggle(&mut self, graph: &Graph, from: RoomId, to: RoomId) {
        if self.active {
            self.deactivate();
        } else {
            self.activate(graph, from, to);
        }
    }

    /// Returns whether the corridor between two rooms is a leg of the shown route.
    #[must_use]
    pub fn highlights(&self, first: RoomId, second: RoomId) -> bool {
        self.active
            && self.path.windows(2).any(|leg| {
                leg == [first, second] || leg == [second, first]
            })
    }
}
