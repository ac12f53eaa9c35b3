//! Terminal input module (shell-facing).
//!
//! This module is independent of any game. It normalizes `crossterm` key
//! events into DOM-style [`KeyInput`] values (a character `key` plus a physical
//! `code`) that control tables match against, and turns pointer press/drag/
//! release sequences into swipe directions or drag steps.

pub mod gesture;
pub mod map;

pub use tui_arcade_types as types;

pub use gesture::{DragSteps, DragTracker, SwipeTracker};
pub use map::{should_quit, KeyInput};
