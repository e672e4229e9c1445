//! Game session module.
//!
//! This module contains the orchestrator that owns the dungeon and its three actors and advances
//! them one frame at a time. A front end feeds [`Session::tick`] the elapsed time and the inputs
//! gathered since the previous frame and renders the [`Snapshot`] it gets back; the session never
//! reads a clock itself.

use color_eyre::eyre::{OptionExt as _, Result};
use log::info;
use rand::{rngs::StdRng, SeedableRng as _};

use crate::{
    config::Config,
    dungeon,
    enemy::Enemy,
    graph::{Graph, Room, RoomId},
    map_overlay::MapOverlay,
    player::Player,
    search::{NeighborOrder, Shuffled},
};

/// Progress of a session.
///
/// [`State::Won`] and [`State::Lost`] are terminal: once entered, the session stops changing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// The game is running.
    Playing,
    /// The player reached the exit.
    Won,
    /// The enemy caught the player.
    Lost,
}

impl State {
    /// Returns whether the session can no longer change.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Requests a front end can make on behalf of the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Move the player into the given room, if it is a neighbor.
    MoveTo(RoomId),
    /// Show or hide the magic map.
    ToggleMap,
}

/// Read-only view of a session handed to the renderer after every frame.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'session> {
    /// Every room, with its flags and position.
    pub graph: &'session Graph,
    /// Room the player occupies.
    pub player_room: RoomId,
    /// Score collected by the player.
    pub score: u32,
    /// Room the enemy occupies.
    pub enemy_room: RoomId,
    /// Magic map state, holding the route it shows.
    pub overlay: &'session MapOverlay,
    /// Progress of the session.
    pub state: State,
}

/// A single game from start to capture or escape.
///
/// This structure owns the dungeon graph and passes it explicitly to the player, the enemy and
/// the magic map. The neighbor order `O` drives the enemy's depth-first searches; it defaults to a
/// seeded shuffle and tests substitute a deterministic order.
#[derive(Debug, Clone)]
pub struct Session<O = Shuffled<StdRng>> {
    /// The dungeon.
    graph: Graph,
    /// The user-controlled explorer.
    player: Player,
    /// The pursuer.
    enemy: Enemy,
    /// The magic map.
    overlay: MapOverlay,
    /// Room that wins the game.
    exit: RoomId,
    /// Progress of the game.
    state: State,
    /// Neighbor order used by the enemy's searches.
    order: O,
}

impl Session {
    /// Starts a session on the built-in dungeon.
    ///
    /// This function seeds a random number generator from the configuration (or from entropy if
    /// no seed is given), uses it to place the treasures and then hands it to the enemy for its
    /// route shuffles.
    ///
    /// # Errors
    ///
    /// This function may return errors if the built-in dungeon cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let graph = dungeon::example(&mut rng, config.treasures)?;
        let enemy = Enemy::new(
            dungeon::ENEMY_START,
            config.recompute_interval,
            config.enemy_speed,
        );

        Self::new(
            graph,
            Player::new(dungeon::PLAYER_START),
            enemy,
            dungeon::EXIT_ROOM,
            Shuffled::new(rng),
        )
    }
}

impl<O: NeighborOrder> Session<O> {
    /// Starts a session on the given dungeon.
    ///
    /// The player's starting room is marked as visited.
    ///
    /// # Errors
    ///
    /// This function returns an error if the player's room is not part of the graph.
    pub fn new(
        mut graph: Graph,
        player: Player,
        enemy: Enemy,
        exit: RoomId,
        order: O,
    ) -> Result<Self> {
        graph
            .room_mut(player.room())
            .ok_or_eyre("the player must start in a room of the dungeon")?
            .mark_visited();

        Ok(Self {
            graph,
            player,
            enemy,
            overlay: MapOverlay::new(),
            exit,
            state: State::Playing,
            order,
        })
    }

    /// Advances the session by one frame.
    ///
    /// This function applies the inputs in order, then lets the enemy move by `dt` seconds, then
    /// checks for the end of the game. A capture is checked before the exit, so a player who
    /// reaches the exit in the same frame the enemy catches them loses. Both checks only look at
    /// the rooms at the end of the frame: a player who walks into the enemy's room while the enemy
    /// steps out of it is not caught. A session that has already ended ignores both the inputs and
    /// the elapsed time.
    pub fn tick(&mut self, dt: f64, inputs: &[Input]) -> Snapshot<'_> {
        if self.state.is_terminal() {
            return self.snapshot();
        }

        for &input in inputs {
            match input {
                Input::MoveTo(room) => {
                    let _ = self.request_move(room);
                }
                Input::ToggleMap => self.toggle_map_overlay(),
            }
        }

        self.enemy
            .update(dt, &self.graph, self.player.room(), &mut self.order);

        if self.enemy.room() == self.player.room() {
            self.state = State::Lost;
            info!(
                "captured in room {} with score {}",
                self.player.room(),
                self.player.score()
            );
        } else if self
            .graph
            .room(self.player.room())
            .is_some_and(Room::is_exit)
        {
            self.state = State::Won;
            info!("escaped through room {} with score {}", self.exit, self.player.score());
        }

        self.snapshot()
    }

    /// Asks to move the player into a room, returning whether the move happened.
    ///
    /// Requests are ignored once the session has ended.
    pub fn request_move(&mut self, room: RoomId) -> bool {
        !self.state.is_terminal() && self.player.move_to(&mut self.graph, room)
    }

    /// Shows the magic map from the player's room to the exit, or hides it if shown.
    ///
    /// Requests are ignored once the session has ended.
    pub fn toggle_map_overlay(&mut self) {
        if !self.state.is_terminal() {
            self.overlay
                .toggle(&self.graph, self.player.room(), self.exit);
        }
    }

    /// Returns a read-only view of the session.
    #[must_use]
    pub const fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            graph: &self.graph,
            player_room: self.player.room(),
            score: self.player.score(),
            enemy_room: self.enemy.room(),
            overlay: &self.overlay,
            state: self.state,
        }
    }

    /// Returns the progress of the session.
    #[must_use]
    pub const fn state(&self) -> State {
        self.state
    }

    /// Returns the dungeon graph.
    #[must_use]
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Returns the player.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Returns the enemy.
    #[must_use]
    pub const fn enemy(&self) -> &Enemy {
        &self.enemy
    }
}
