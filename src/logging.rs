//! Logging setup module.
//!
//! The terminal belongs to the user interface while the game runs, so log records go to a file
//! instead of stderr. The filter follows `RUST_LOG` and falls back to `info`.

use std::fs::File;

use color_eyre::eyre::Result;
use env_logger::{Builder, Env, Target};

use crate::config::Config;

/// Installs the global logger if the configuration names a log file.
///
/// # Errors
///
/// This function may return errors if:
/// - The log file cannot be created
/// - A global logger has already been installed
pub fn init(config: &Config) -> Result<()> {
    let Some(path) = config.log_file.as_deref() else {
        return Ok(());
    };

    let file = File::create(path)?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;

    log::info!("logging to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_without_log_file_is_a_no_op() {
        assert!(init(&Config::default()).is_ok());
    }

    #[test]
    fn test_init_unwritable_log_file_fails() {
        // The file is created before the global logger is touched, so this never installs one.
        let config = Config {
            log_file: Some(
                std::env::temp_dir()
                    .join("dungeon-pathfinder-missing-directory")
                    .join("game.log"),
            ),
            ..Config::default()
        };

        assert!(init(&config).is_err());
    }
}
