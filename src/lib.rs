//! This crate contains the source code for the dungeon pathfinder game.
//!
//! The dungeon is an undirected graph of rooms joined by corridors. The player walks from room to
//! room collecting treasures and looking for the exit, a magic map shows the shortest way out with
//! a breadth-first search, and an enemy gives chase along routes found by a randomized depth-first
//! search. The game core lives in [`graph`], [`search`], [`player`], [`enemy`], [`map_overlay`] and
//! [`session`]; the terminal front end driving it is exposed through [`App`].

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
pub mod config;
pub mod dungeon;
pub mod enemy;
mod events;
pub mod graph;
pub mod logging;
pub mod map_overlay;
pub mod player;
pub mod search;
pub mod session;
mod types;
mod ui;

pub use app::App;
