//! Game controllers - stateful sessions over the pure engines
//!
//! Each controller owns one session, drives a [`tui_arcade_core`] engine,
//! persists its high score through a [`GameStore`] and reports score, loss and
//! win through [`GameCallbacks`]. The shell only ever sees the [`Game`] trait
//! plus the per-game action methods wired into its control table.
//!
//! # Module Structure
//!
//! - [`contract`]: `Game`, `GameCallbacks`, `GameEvent`, `GameEnv`
//! - [`ticker`]: elapsed-time to step conversion for real-time games
//! - [`store`]: namespaced JSON persistence and the high-score helper
//! - [`audio`]: sound-effect hook
//! - [`game2048`], [`snake`], [`falling`]: the three controllers

pub mod audio;
pub mod contract;
pub mod falling;
pub mod game2048;
pub mod snake;
pub mod store;
pub mod ticker;

pub use tui_arcade_core as core;
pub use tui_arcade_types as types;

pub use audio::{AudioSink, NoAudio, Sfx};
pub use contract::{ChannelCallbacks, Game, GameCallbacks, GameEnv, GameEvent};
pub use falling::{ActivePiece, FallingBlocks};
pub use game2048::Game2048;
pub use snake::SnakeGame;
pub use store::{GameStore, HighScore, JsonFileBackend, KeyValueBackend, MemoryBackend};
pub use ticker::{Pacing, TickLoop};
