//! Host configuration: environment variables and the command line.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use log::LevelFilter;

use crate::hub::GameChoice;
use crate::term::BellMode;

pub const DEFAULT_STORE_PATH: &str = ".tui-arcade.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// JSON file holding every game's high score
    pub store_path: PathBuf,
    /// File log; `None` installs no logger
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u32>,
    pub bell: BellMode,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            log_path: None,
            log_level: LevelFilter::Info,
            seed: None,
            bell: BellMode::Off,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; unparsable values fall back to the
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let store_path = non_empty(lookup("ARCADE_STORE_PATH"))
            .map(PathBuf::from)
            .unwrap_or(defaults.store_path);
        let log_path = non_empty(lookup("ARCADE_LOG_PATH")).map(PathBuf::from);
        let log_level = non_empty(lookup("ARCADE_LOG_LEVEL"))
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.log_level);
        let seed = non_empty(lookup("ARCADE_SEED")).and_then(|s| s.parse().ok());
        let bell = non_empty(lookup("ARCADE_BELL"))
            .and_then(|s| BellMode::from_str(&s))
            .unwrap_or(defaults.bell);

        Self {
            store_path,
            log_path,
            log_level,
            seed,
            bell,
        }
    }

    /// The configured seed, or one derived from the clock
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}

/// `tui-arcade [2048|snake|fall]`. `Ok(None)` opens the hub menu.
pub fn parse_args(args: &[String]) -> Result<Option<GameChoice>> {
    match args {
        [] => Ok(None),
        [name] => GameChoice::from_arg(name)
            .map(Some)
            .ok_or_else(|| anyhow!("unknown game: {} (expected 2048, snake or fall)", name)),
        [_, extra, ..] => Err(anyhow!("unexpected argument: {}", extra)),
    }
}
