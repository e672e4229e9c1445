//! Command line configuration module.

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::dungeon::DEFAULT_TREASURES;

/// Default seconds between two enemy replans.
pub const DEFAULT_RECOMPUTE_INTERVAL: f64 = 1.0;

/// Default enemy speed in rooms per second.
pub const DEFAULT_ENEMY_SPEED: f64 = 0.5;

/// Default frame driver poll timeout in milliseconds, about sixty frames per second.
pub const DEFAULT_TICK_RATE_MS: u64 = 16;

/// Settings for a game session and its terminal front end.
///
/// This structure is parsed from the command line once at startup and handed to the application
/// by value. Every numeric option is validated while parsing, so the rest of the crate can rely on
/// intervals and speeds being finite and strictly positive.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(version, about)]
pub struct Config {
    /// Seed for treasure placement and enemy routing; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Seconds between two enemy route computations.
    #[arg(long, default_value_t = DEFAULT_RECOMPUTE_INTERVAL, value_parser = positive)]
    pub recompute_interval: f64,
    /// Enemy speed in rooms per second.
    #[arg(long, default_value_t = DEFAULT_ENEMY_SPEED, value_parser = positive)]
    pub enemy_speed: f64,
    /// Number of treasures hidden in the dungeon.
    #[arg(long, default_value_t = DEFAULT_TREASURES)]
    pub treasures: usize,
    /// Milliseconds to wait for input before advancing a frame.
    #[arg(long, default_value_t = DEFAULT_TICK_RATE_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_rate: u64,
    /// File to write logs to; logging is off when omitted.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            recompute_interval: DEFAULT_RECOMPUTE_INTERVAL,
            enemy_speed: DEFAULT_ENEMY_SPEED,
            treasures: DEFAULT_TREASURES,
            tick_rate: DEFAULT_TICK_RATE_MS,
            log_file: None,
        }
    }
}

impl Config {
    /// Returns the frame driver poll timeout.
    #[must_use]
    pub const fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate)
    }
}

/// Parses a finite, strictly positive number.
fn positive(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|err| format!("`{raw}` is not a number: {err}"))?;

    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("`{raw}` must be a finite number greater than zero"))
    }
}
