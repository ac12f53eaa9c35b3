//! TUI Arcade (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof and adds the host pieces:
//! per-game presets ([`hub`]), configuration ([`config`]), the file logger
//! ([`logger`]) and the event-driven application ([`app`]).

pub use tui_arcade_core as core;
pub use tui_arcade_engine as engine;
pub use tui_arcade_input as input;
pub use tui_arcade_shell as shell;
pub use tui_arcade_term as term;
pub use tui_arcade_types as types;

pub mod app;
pub mod config;
pub mod hub;
pub mod logger;
