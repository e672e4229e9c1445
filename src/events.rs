//! Event handling functions for user input and application state updates.

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{
    types::{GameOverItem, MainMenuItem, Screen},
    App,
};

/// Handles input events and advances the game by one frame.
///
/// This function polls for keyboard events for at most the configured tick rate and dispatches
/// them to [`handle_key`]. When the in-game screen is up, the session is advanced afterwards by the
/// time that elapsed since the previous frame.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(app.config.tick_rate())? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code)?;
            }
        }
    }

    if matches!(app.screen, Screen::InGame) {
        app.advance();
    }

    Ok(())
}

/// Dispatches a single key press to the handler of the pressed key.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('j') => handle_j_events(app),
        KeyCode::Char('k') => handle_k_events(app),
        KeyCode::Char('l') => handle_l_events(app)?,
        KeyCode::Char('h') => handle_h_events(app),
        KeyCode::Char('m') => handle_m_events(app),
        _ => {}
    }

    Ok(())
}

/// Handles 'j' key press events for downward navigation.
///
/// This function moves down in menus and, while in game, moves the room cursor to the next
/// neighbor of the player's room.
pub(crate) fn handle_j_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => {
            app.screen = Screen::MainMenu(MainMenuItem::Quit);
        }
        Screen::GameOver(GameOverItem::PlayAgain) => {
            app.screen = Screen::GameOver(GameOverItem::Quit);
        }
        Screen::InGame => app.select_next(),
        _ => {}
    }
}

/// Handles 'k' key press events for upward navigation.
///
/// This function moves up in menus and, while in game, moves the room cursor to the previous
/// neighbor of the player's room.
pub(crate) fn handle_k_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        Screen::GameOver(GameOverItem::Quit) => {
            app.screen = Screen::GameOver(GameOverItem::PlayAgain);
        }
        Screen::InGame => app.select_previous(),
        _ => {}
    }
}

/// Handles 'l' key press events for selection.
///
/// This function confirms menu entries and, while in game, asks to move the player into the room
/// under the cursor.
pub(crate) fn handle_l_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) | Screen::GameOver(GameOverItem::PlayAgain) => {
            app.start_game()?;
        }
        Screen::MainMenu(MainMenuItem::Quit) | Screen::GameOver(GameOverItem::Quit) => {
            app.exit = true;
        }
        Screen::InGame => app.queue_move(),
    }

    Ok(())
}

/// Handles 'h' key press events for backward navigation.
///
/// This function returns to the main menu from the in-game and game over screens. Leaving a game
/// abandons it; picking "Start Game" afterwards begins a new one.
pub(crate) fn handle_h_events(app: &mut App) {
    if matches!(app.screen, Screen::InGame | Screen::GameOver(_)) {
        app.pending.clear();
        app.screen = Screen::MainMenu(MainMenuItem::StartGame);
    }
}

/// Handles 'm' key press events, which toggle the magic map while in game.
pub(crate) fn handle_m_events(app: &mut App) {
    if matches!(app.screen, Screen::InGame) {
        app.queue_map_toggle();
    }
}
