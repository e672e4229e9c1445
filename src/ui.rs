//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Circle, Line as Corridor},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    dungeon::{WORLD_HEIGHT, WORLD_WIDTH},
    graph::{Room, RoomId},
    session::{Snapshot, State},
    types::{GameOverItem, MainMenuItem, MenuType, Screen},
    App,
};

/// Radius of a room circle, in dungeon units.
const ROOM_RADIUS: f64 = 35.0;

/// Horizontal distance between a room center and the player or enemy marker, in dungeon units.
const MARKER_OFFSET: f64 = 18.0;

/// Vertical distance between a room center and its treasure marker, in dungeon units.
const TREASURE_OFFSET: f64 = 18.0;

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from layout lookups or inconsistent dungeon data.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match app.screen {
        Screen::MainMenu(item) => main_menu(frame, item),
        Screen::InGame => in_game(app, frame)?,
        Screen::GameOver(item) => game_over(app, frame, item),
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the generic layout structure for the main and game over menus.
///
/// This function creates the common layout and block structure used by both menus. The generic
/// part includes the centered positioning and border styling, while the specific menu content is
/// handled by the caller using the [`MenuType`] parameter.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: MenuType) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Percentage(40),
        Constraint::Percentage(30),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(u16::from(menu.value() + 2))])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); menu.value().into()]).split(inner_space)
}

/// Renders the main menu screen with navigation options.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
#[expect(
    clippy::missing_asserts_for_indexing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::MainMenu(2));

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    let (start_style, quit_style) = match item {
        MainMenuItem::StartGame => (active_content_style, content_style),
        MainMenuItem::Quit => (content_style, active_content_style),
    };

    frame.render_widget(
        Line::styled("Start Game", start_style).centered(),
        inner_layout[0],
    );
    frame.render_widget(Line::styled("Quit", quit_style).centered(), inner_layout[1]);
}

/// Renders the game over screen with the outcome and the replay options.
///
/// This function shows whether the player escaped or got caught, along with the final score, on
/// top of the same kind of menu as the main menu.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
#[expect(
    clippy::missing_asserts_for_indexing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn game_over(app: &App, frame: &mut Frame, item: GameOverItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::GameOver(3));
    let snapshot = app.session.snapshot();

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    let outcome = if snapshot.state == State::Won {
        Line::styled(
            format!("Escaped! Final score: {}", snapshot.score),
            Style::default().fg(Color::Yellow),
        )
    } else {
        Line::styled(
            format!("Captured! Score: {}", snapshot.score),
            Style::default().fg(Color::Red),
        )
    };

    let (again_style, quit_style) = match item {
        GameOverItem::PlayAgain => (active_content_style, content_style),
        GameOverItem::Quit => (content_style, active_content_style),
    };

    frame.render_widget(outcome.centered(), inner_layout[0]);
    frame.render_widget(
        Line::styled("Play Again", again_style).centered(),
        inner_layout[1],
    );
    frame.render_widget(Line::styled("Quit", quit_style).centered(), inner_layout[2]);
}

/// Renders the in-game screen with the dungeon graph and the score line.
///
/// This function draws every corridor and room of the current session on a [`Canvas`], marking the
/// player, the enemy, the treasures and the room under the cursor. While the magic map is active,
/// the corridors along its route are highlighted.
///
/// # Errors
///
/// This function may return errors if a layout area is missing or a corridor leads to an unknown
/// room.
#[expect(
    clippy::too_many_lines,
    reason = "UI rendering function requires many lines for layout and drawing operations."
)]
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let snapshot = app.session.snapshot();
    let selected = app.selected_room();

    let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).split(frame.area());
    let dungeon_area = *layout
        .first()
        .ok_or_eyre("failed to get dungeon area from layout")?;
    let hud_area = *layout
        .last()
        .ok_or_eyre("failed to get hud area from layout")?;

    // Pre-compute the shapes to handle errors before the paint closure
    let mut corridors = Vec::new();
    for (first, second) in snapshot.graph.edges() {
        let (x1, y1) = to_canvas(
            snapshot
                .graph
                .room(first)
                .ok_or_eyre("corridor starts in an unknown room")?
                .position(),
        );
        let (x2, y2) = to_canvas(
            snapshot
                .graph
                .room(second)
                .ok_or_eyre("corridor ends in an unknown room")?
                .position(),
        );
        let color = if snapshot.overlay.highlights(first, second) {
            Color::LightYellow
        } else {
            Color::DarkGray
        };
        corridors.push(Corridor::new(x1, y1, x2, y2, color));
    }

    let rooms: Vec<Circle> = snapshot
        .graph
        .rooms()
        .map(|room| {
            let (x, y) = to_canvas(room.position());
            Circle {
                x,
                y,
                radius: ROOM_RADIUS,
                color: room_color(&snapshot, room, selected),
            }
        })
        .collect();

    let dungeon = Canvas::default()
        .block(
            Block::bordered()
                .title("Dungeon")
                .title_alignment(Alignment::Center)
                .style(Color::Green)
                .border_type(BorderType::Rounded),
        )
        .x_bounds([
            -half_extent(WORLD_WIDTH),
            half_extent(WORLD_WIDTH),
        ])
        .y_bounds([
            -half_extent(WORLD_HEIGHT),
            half_extent(WORLD_HEIGHT),
        ])
        .marker(Marker::Braille)
        .paint(|ctx| {
            for corridor in &corridors {
                ctx.draw(corridor);
            }
            ctx.layer();
            for room in &rooms {
                ctx.draw(room);
            }

            for room in snapshot.graph.rooms() {
                let (x, y) = to_canvas(room.position());
                ctx.print(
                    x,
                    y,
                    Line::styled(room.id().to_string(), Style::default().fg(Color::White)),
                );
                if room.has_treasure() {
                    ctx.print(
                        x,
                        y - TREASURE_OFFSET,
                        Line::styled("*", Style::default().fg(Color::Yellow)),
                    );
                }
            }

            if let Some(room) = snapshot.graph.room(snapshot.enemy_room) {
                let (x, y) = to_canvas(room.position());
                ctx.print(
                    x + MARKER_OFFSET,
                    y,
                    Line::styled("E", Style::default().fg(Color::Red)),
                );
            }
            if let Some(room) = snapshot.graph.room(snapshot.player_room) {
                let (x, y) = to_canvas(room.position());
                ctx.print(
                    x - MARKER_OFFSET,
                    y,
                    Line::styled("@", Style::default().fg(Color::LightBlue)),
                );
            }
        });

    frame.render_widget(dungeon, dungeon_area);

    let hud_block = Block::bordered()
        .title("(j/k) pick room / (l) move / (m) magic map / (h) menu / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    let hud_inner = hud_block.inner(hud_area);
    let map_status = if snapshot.overlay.is_active() {
        "ACTIVE (BFS)"
    } else {
        "inactive"
    };

    frame.render_widget(hud_block, hud_area);
    frame.render_widget(
        Line::raw(format!("Score: {} | Map: {map_status}", snapshot.score)).centered(),
        hud_inner,
    );

    Ok(())
}

/// Picks the fill color of a room circle.
///
/// The player's room wins over the cursor, which wins over the exit, which wins over the visited
/// shade.
fn room_color(snapshot: &Snapshot<'_>, room: &Room, selected: Option<RoomId>) -> Color {
    if room.id() == snapshot.player_room {
        Color::Green
    } else if selected == Some(room.id()) {
        Color::Cyan
    } else if room.is_exit() {
        Color::Yellow
    } else if room.visited() {
        Color::DarkGray
    } else {
        Color::Gray
    }
}

/// Returns half of a dungeon extent, as used for the symmetric canvas bounds.
fn half_extent(extent: i32) -> f64 {
    f64::from(rounded_div::i32(extent, 2))
}

/// Transforms a dungeon position to canvas coordinates.
///
/// Dungeon positions grow rightwards and downwards from the top left corner, while the canvas is
/// centered on the origin with the vertical axis pointing up.
fn to_canvas((x, y): (i32, i32)) -> (f64, f64) {
    (
        f64::from(x) - half_extent(WORLD_WIDTH),
        half_extent(WORLD_HEIGHT) - f64::from(y),
    )
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng as _};
    use ratatui::{backend::TestBackend, buffer::Cell, Terminal};

    use super::*;
    use crate::{
        config::Config,
        enemy::Enemy,
        graph::Graph,
        player::Player,
        search::Shuffled,
        session::{Input, Session},
    };

    /// Creates a seeded test app whose enemy never moves.
    fn create_test_app() -> App {
        let config = Config {
            seed: Some(1),
            recompute_interval: 1_000.0,
            enemy_speed: 0.001,
            ..Config::default()
        };
        App::new(config).expect("failed to create app")
    }

    /// Creates a test terminal with known dimensions for UI testing.
    fn create_test_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(100, 40);
        Terminal::new(backend).expect("failed to create test terminal")
    }

    /// Collects the rendered symbols of the terminal into a single string.
    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(Cell::symbol)
            .collect()
    }

    #[test]
    fn test_draw_main_menu() {
        let app = create_test_app();
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing main menu should succeed");
        let text = screen_text(&terminal);
        assert!(text.contains("Start Game"), "main menu should list its entries");
        assert!(text.contains("Quit"), "main menu should list its entries");
    }

    #[test]
    fn test_draw_in_game() {
        let mut app = create_test_app();
        app.start_game().expect("failed to start game");
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing in-game screen should succeed");
        let text = screen_text(&terminal);
        assert!(text.contains("Score: 0"), "hud should show the score");
        assert!(text.contains("Map: inactive"), "hud should show the map status");
        assert!(text.contains('@'), "player marker should be drawn");
        assert!(text.contains('E'), "enemy marker should be drawn");
    }

    #[test]
    fn test_draw_in_game_with_magic_map() {
        let mut app = create_test_app();
        app.start_game().expect("failed to start game");
        app.pending.push(Input::ToggleMap);
        app.step(0.016);
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing in-game screen should succeed");
        assert!(
            screen_text(&terminal).contains("Map: ACTIVE (BFS)"),
            "hud should show the active map"
        );
    }

    #[test]
    fn test_draw_game_over_lost() {
        let mut app = create_test_app();
        app.start_game().expect("failed to start game");
        for room in [1, 2, 3, 7, 11] {
            app.pending.push(Input::MoveTo(room));
            app.step(0.016);
        }
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing game over screen should succeed");
        let text = screen_text(&terminal);
        assert!(text.contains("Captured!"), "outcome should be shown");
        assert!(text.contains("Play Again"), "replay option should be shown");
    }

    #[test]
    fn test_draw_game_over_won() {
        let mut app = create_test_app();
        app.start_game().expect("failed to start game");
        let mut graph = Graph::new();
        graph.add_room(0, 0, 0).expect("failed to add room");
        graph.add_room(1, 100, 0).expect("failed to add room");
        graph.add_edge(0, 1).expect("failed to add edge");
        graph.room_mut(1).expect("room 1 should exist").set_exit(true);
        app.session = Session::new(
            graph,
            Player::new(0),
            Enemy::new(0, 1_000.0, 0.001),
            1,
            Shuffled::new(StdRng::seed_from_u64(1)),
        )
        .expect("failed to start session");
        app.pending.push(Input::MoveTo(1));
        app.step(0.016);
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            draw(&app, frame).expect("drawing should succeed in test");
        });

        assert!(result.is_ok(), "drawing game over screen should succeed");
        let text = screen_text(&terminal);
        assert!(text.contains("Escaped!"), "outcome should be shown");
        assert!(!text.contains("Captured!"), "only the real outcome should be shown");
    }

    #[test]
    fn test_clear_function() {
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            clear(frame);
        });

        assert!(result.is_ok(), "clearing screen should succeed");
    }

    #[test]
    fn test_init_menu_rows() {
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            let layout = init_menu(frame, MenuType::MainMenu(2));
            assert_eq!(layout.len(), 2, "main menu should have 2 items");
            let layout = init_menu(frame, MenuType::GameOver(3));
            assert_eq!(layout.len(), 3, "game over menu should have 3 rows");
        });

        assert!(result.is_ok(), "initializing menus should succeed");
    }

    #[test]
    fn test_to_canvas_centers_and_flips() {
        assert_eq!(to_canvas((500, 350)), (0.0, 0.0));
        assert_eq!(to_canvas((0, 0)), (-500.0, 350.0));
        assert_eq!(to_canvas((1000, 700)), (500.0, -350.0));
    }

    #[test]
    fn test_room_color_precedence() {
        let app = create_test_app();
        let snapshot = app.session.snapshot();
        let room = |id| snapshot.graph.room(id).expect("room should exist");

        assert_eq!(room_color(&snapshot, room(0), Some(0)), Color::Green);
        assert_eq!(room_color(&snapshot, room(11), Some(11)), Color::Cyan);
        assert_eq!(room_color(&snapshot, room(11), None), Color::Yellow);
        assert_eq!(room_color(&snapshot, room(5), None), Color::Gray);
    }
}
