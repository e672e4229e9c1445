//! Core application state and frame driver for the dungeon game.

use std::{io, mem, time::Instant};

use color_eyre::eyre::Result;
use log::info;
use ratatui::DefaultTerminal;

use crate::{
    config::Config,
    events,
    graph::RoomId,
    session::{Input, Session},
    types::{GameOverItem, MainMenuItem, Screen},
    ui,
};

/// Application state container for the dungeon game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to. It acts as the frame
/// driver of the game session: it gathers the inputs of a frame, measures how long the frame took
/// and hands both to [`Session::tick`].
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Settings every new session is started with.
    pub(crate) config: Config,
    /// Game session currently being played or last played.
    pub(crate) session: Session,
    /// Position of the cursor among the neighbors of the player's room.
    ///
    /// This field picks which neighbor a move request targets. It is reduced modulo the number of
    /// neighbors when read, so it never has to be fixed up when the player changes rooms.
    pub(crate) cursor: usize,
    /// Inputs gathered since the last frame was advanced.
    pub(crate) pending: Vec<Input>,
    /// Time at which the last frame was advanced.
    pub(crate) last_frame: Instant,
}

impl App {
    /// Creates a new instance of the App structure sitting on the main menu.
    ///
    /// This function already builds a session from the configuration even though
    /// [`App::start_game`] replaces it with a fresh one. The app always owns a session so every
    /// screen can read a snapshot, and building one here reports a bad configuration before the
    /// terminal is taken over.
    ///
    /// # Errors
    ///
    /// This function may return errors if the first session cannot be set up.
    pub fn new(config: Config) -> Result<Self> {
        let session = Session::from_config(&config)?;

        Ok(Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::StartGame),
            config,
            session,
            cursor: 0,
            pending: Vec::new(),
            last_frame: Instant::now(),
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| ui::draw(self, frame).map_err(io::Error::other))?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Throws away the current session and starts a fresh one on the in-game screen.
    ///
    /// # Errors
    ///
    /// This function may return errors if the session cannot be set up.
    pub(crate) fn start_game(&mut self) -> Result<()> {
        self.session = Session::from_config(&self.config)?;
        self.cursor = 0;
        self.pending.clear();
        self.last_frame = Instant::now();
        self.screen = Screen::InGame;
        info!("new game started");

        Ok(())
    }

    /// Returns the neighbor of the player's room the cursor points at.
    pub(crate) fn selected_room(&self) -> Option<RoomId> {
        let neighbors = self
            .session
            .graph()
            .neighbors(self.session.player().room());

        neighbors.get(self.cursor.checked_rem(neighbors.len())?).copied()
    }

    /// Moves the cursor to the next neighbor.
    pub(crate) fn select_next(&mut self) {
        self.cursor = self.cursor.wrapping_add(1);
    }

    /// Moves the cursor to the previous neighbor.
    pub(crate) fn select_previous(&mut self) {
        let count = self
            .session
            .graph()
            .neighbors(self.session.player().room())
            .len();
        if let Some(current) = self.cursor.checked_rem(count) {
            self.cursor = current.checked_sub(1).unwrap_or(count - 1);
        }
    }

    /// Queues a move into the neighbor under the cursor.
    pub(crate) fn queue_move(&mut self) {
        if let Some(room) = self.selected_room() {
            self.pending.push(Input::MoveTo(room));
            self.cursor = 0;
        }
    }

    /// Queues a magic map toggle.
    pub(crate) fn queue_map_toggle(&mut self) {
        self.pending.push(Input::ToggleMap);
    }

    /// Advances the session by the wall-clock time elapsed since the previous frame.
    pub(crate) fn advance(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;
        self.step(dt);
    }

    /// Advances the session by `dt` seconds with the queued inputs.
    ///
    /// This function moves to the game over screen as soon as the session reaches an end.
    pub(crate) fn step(&mut self, dt: f64) {
        let inputs = mem::take(&mut self.pending);
        let state = self.session.tick(dt, &inputs).state;

        if state.is_terminal() {
            self.screen = Screen::GameOver(GameOverItem::PlayAgain);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dungeon, session::State};

    /// Creates an app with a fixed seed and an enemy too slow to matter.
    fn test_app() -> App {
        let config = Config {
            seed: Some(4),
            recompute_interval: 1_000.0,
            enemy_speed: 0.001,
            ..Config::default()
        };
        App::new(config).expect("failed to create app")
    }

    #[test]
    fn test_new_starts_on_main_menu() {
        let app = test_app();

        assert!(!app.exit);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::StartGame));
        assert_eq!(app.session.state(), State::Playing);
    }

    #[test]
    fn test_start_game_rebuilds_the_seeded_dungeon() {
        let mut app = test_app();
        let initial = app.session.graph().clone();
        app.pending.push(Input::ToggleMap);

        app.start_game().expect("failed to start game");

        assert_eq!(app.session.graph(), &initial);
        assert_eq!(app.session.state(), State::Playing);
        assert!(!app.session.snapshot().overlay.is_active());
        assert!(app.pending.is_empty());
    }

    #[test]
    fn test_cursor_cycles_through_neighbors() {
        let mut app = test_app();
        let neighbors = app.session.graph().neighbors(dungeon::PLAYER_START).to_vec();

        assert_eq!(app.selected_room(), neighbors.first().copied());
        app.select_next();
        assert_eq!(app.selected_room(), neighbors.get(1).copied());
        app.select_next();
        assert_eq!(app.selected_room(), neighbors.first().copied());
        app.select_previous();
        assert_eq!(app.selected_room(), neighbors.last().copied());
    }

    #[test]
    fn test_queued_move_is_applied_on_step() {
        let mut app = test_app();
        app.start_game().expect("failed to start game");
        let target = app.selected_room().expect("start room has neighbors");

        app.queue_move();
        assert_eq!(app.session.player().room(), dungeon::PLAYER_START);

        app.step(0.016);
        assert_eq!(app.session.player().room(), target);
        assert!(app.pending.is_empty());
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_queued_map_toggle_is_applied_on_step() {
        let mut app = test_app();
        app.start_game().expect("failed to start game");

        app.queue_map_toggle();
        app.step(0.016);

        assert!(app.session.snapshot().overlay.is_active());
    }

    #[test]
    fn test_terminal_state_switches_to_game_over() {
        let mut app = test_app();
        app.start_game().expect("failed to start game");

        // The slow enemy never leaves its starting room, so walking into it ends the game.
        for room in [1, 2, 3, 7] {
            app.pending.push(Input::MoveTo(room));
            app.step(0.016);
            assert_eq!(app.screen, Screen::InGame);
        }
        app.pending.push(Input::MoveTo(dungeon::ENEMY_START));
        app.step(0.016);

        assert_eq!(app.session.state(), State::Lost);
        assert_eq!(app.screen, Screen::GameOver(GameOverItem::PlayAgain));
    }
}
