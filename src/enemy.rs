//! Enemy pursuit module.
//!
//! This module contains the enemy state and its per-frame update. The enemy chases the player
//! along routes found by the randomized depth-first search, replanning on a coarse fixed interval
//! and stepping one room at a time on a separate, steady cadence.

use std::collections::VecDeque;

use log::debug;

use crate::{
    graph::{Graph, RoomId},
    search::{self, NeighborOrder},
};

/// The computer-controlled pursuer.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    /// Room the enemy currently occupies.
    room: RoomId,
    /// Rooms still to walk through, next step first.
    path: VecDeque<RoomId>,
    /// Seconds accumulated since the last replan.
    since_replan: f64,
    /// Seconds accumulated since the last step.
    since_step: f64,
    /// Seconds between two replans.
    recompute_interval: f64,
    /// Rooms walked per second.
    speed: f64,
}

impl Enemy {
    /// Places a new enemy with an empty route in the given room.
    ///
    /// The `speed` is expected to be strictly positive; the command line configuration enforces
    /// it.
    #[must_use]
    pub const fn new(room: RoomId, recompute_interval: f64, speed: f64) -> Self {
        Self {
            room,
            path: VecDeque::new(),
            since_replan: 0.0,
            since_step: 0.0,
            recompute_interval,
            speed,
        }
    }

    /// Returns the room the enemy occupies.
    #[must_use]
    pub const fn room(&self) -> RoomId {
        self.room
    }

    /// Returns the cached rooms the enemy still plans to walk through.
    #[must_use]
    pub const fn path(&self) -> &VecDeque<RoomId> {
        &self.path
    }

    /// Returns the number of seconds between two steps.
    #[must_use]
    pub fn step_interval(&self) -> f64 {
        self.speed.recip()
    }

    /// Advances the enemy by `dt` seconds of game time.
    ///
    /// This function adds `dt` to both timers. Once the replan timer reaches the recompute
    /// interval, a fresh depth-first route towards `target` replaces the cached one, minus the
    /// room the enemy stands in, and the timer restarts; without a route the cache is emptied and
    /// the enemy idles until the next replan. Then, once the step timer reaches the step interval
    /// and a step is cached, the enemy walks into the next room and the step timer restarts.
    pub fn update<O>(&mut self, dt: f64, graph: &Graph, target: RoomId, order: &mut O)
    where
        O: NeighborOrder + ?Sized,
    {
        self.since_replan += dt;
        self.since_step += dt;

        if self.since_replan >= self.recompute_interval {
            self.path = match search::dfs(graph, self.room, target, order) {
                Some(route) => {
                    let mut path = VecDeque::from(route);
                    if path.len() > 1 {
                        let _ = path.pop_front();
                    }
                    path
                }
                None => VecDeque::new(),
            };
            self.since_replan = 0.0;
            debug!(
                "enemy in room {} replanned towards room {target}: {:?}",
                self.room, self.path
            );
        }

        if self.since_step >= self.step_interval() {
            if let Some(next) = self.path.pop_front() {
                self.room = next;
                self.since_step = 0.0;
                debug!("enemy stepped into room {next}");
            }
        }
    }
}
