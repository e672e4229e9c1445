//! This crate contains the source code for the binary for the game dungeon pathfinder.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use dungeon_pathfinder::{config::Config, logging, App};

fn main() -> Result<()> {
    install()?;

    let config = Config::parse();
    logging::init(&config)?;
    let mut app = App::new(config)?;

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}
