//! Player state module.

use log::{debug, trace};

use crate::graph::{Graph, RoomId};

/// Score awarded for every treasure the player picks up.
pub const TREASURE_REWARD: u32 = 10;

/// The user-controlled explorer.
///
/// This structure tracks the room the player stands in and the score collected so far. It only
/// changes through [`Player::move_to`], which validates each request against the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Room the player currently occupies.
    room: RoomId,
    /// Points collected from treasures.
    score: u32,
}

impl Player {
    /// Places a new player with no score in the given room.
    #[must_use]
    pub const fn new(room: RoomId) -> Self {
        Self { room, score: 0 }
    }

    /// Returns the room the player occupies.
    #[must_use]
    pub const fn room(&self) -> RoomId {
        self.room
    }

    /// Returns the collected score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Moves the player into a neighboring room.
    ///
    /// This function only accepts targets that are neighbors of the current room; anything else
    /// returns `false` and leaves the player as it was. A successful move marks the destination as
    /// visited and, if a treasure lies there, adds [`TREASURE_REWARD`] to the score and removes
    /// the treasure so it cannot be collected twice.
    pub fn move_to(&mut self, graph: &mut Graph, target: RoomId) -> bool {
        if !graph.is_edge(self.room, target) {
            trace!("rejected move from room {} to room {target}", self.room);
            return false;
        }

        self.room = target;
        if let Some(room) = graph.room_mut(target) {
            room.mark_visited();
            if room.take_treasure() {
                self.score = self.score.saturating_add(TREASURE_REWARD);
                debug!("treasure collected in room {target}, score is now {}", self.score);
            }
        }

        true
    }
}
