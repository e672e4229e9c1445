//! Type definitions and enums for the application screens and menus.

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Main menu screen of the game.
    MainMenu(MainMenuItem),
    /// In-game dungeon screen.
    ///
    /// This variant represents the screen where the dungeon graph is drawn and the session is
    /// advanced every frame.
    InGame,
    /// End of game screen.
    ///
    /// This variant represents the screen shown once the player escaped or got caught, offering to
    /// play again.
    GameOver(GameOverItem),
}

/// Main menu navigation options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MainMenuItem {
    /// "Start Game" menu option.
    StartGame,
    /// "Quit" menu option.
    Quit,
}

/// Game over menu navigation options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GameOverItem {
    /// "Play Again" menu option.
    PlayAgain,
    /// "Quit" menu option.
    Quit,
}

/// Generic menu type configuration.
///
/// This enumeration holds the different specifics particular to each generic menu type in the
/// application's interface. Generic here means they share enough features to be considered worth
/// joining together part of their functionality. Each variant stores the number of rows the menu
/// takes up.
pub(crate) enum MenuType {
    /// Main menu configuration.
    MainMenu(u8),
    /// Game over menu configuration.
    GameOver(u8),
}

impl MenuType {
    /// Returns the string representation of the menu type.
    ///
    /// This function provides the display name for each menu variant, used as the title in the
    /// menu's border when rendering the interface.
    pub(crate) const fn repr(&self) -> &str {
        match self {
            Self::MainMenu(_) => "Dungeon Pathfinder",
            Self::GameOver(_) => "Game Over",
        }
    }

    /// Returns the number of rows stored by the menu type variant.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::GameOver(value) => *value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_variants() {
        let main_menu = Screen::MainMenu(MainMenuItem::StartGame);
        let in_game = Screen::InGame;
        let game_over = Screen::GameOver(GameOverItem::PlayAgain);

        assert_eq!(main_menu, Screen::MainMenu(MainMenuItem::StartGame));
        assert_eq!(game_over, Screen::GameOver(GameOverItem::PlayAgain));
        assert_ne!(main_menu, in_game);
        assert_ne!(game_over, Screen::GameOver(GameOverItem::Quit));
    }

    #[test]
    fn test_menu_type_repr() {
        assert_eq!(MenuType::MainMenu(2).repr(), "Dungeon Pathfinder");
        assert_eq!(MenuType::GameOver(3).repr(), "Game Over");
    }

    #[test]
    fn test_menu_type_value() {
        assert_eq!(MenuType::MainMenu(2).value(), 2);
        assert_eq!(MenuType::GameOver(3).value(), 3);
    }

    #[test]
    fn test_debug_implementations() {
        assert_eq!(format!("{:?}", Screen::InGame), "InGame");
        assert_eq!(format!("{:?}", MainMenuItem::Quit), "Quit");
        assert_eq!(format!("{:?}", GameOverItem::PlayAgain), "PlayAgain");
    }
}
