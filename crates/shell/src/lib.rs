//! Game shell - lifecycle, input routing and UI surface for any game
//!
//! The shell knows nothing about a particular game. A [`ShellConfig`] names
//! the UI elements, a factory for the controller, a control table and an
//! optional gesture handler; [`GameShell`] then owns the [`AppState`] machine
//! and routes keys, clicks, pointer gestures and time to the controller.
//!
//! [`AppState`]: tui_arcade_types::AppState

pub mod control;
pub mod game_shell;
pub mod surface;
pub mod swipe;

pub use tui_arcade_engine as engine;
pub use tui_arcade_types as types;

pub use control::{Action, ControlMapping};
pub use game_shell::{GameFactory, GameShell, ShellConfig, ShellElements};
pub use surface::{ids, Element, ElementKind, Surface};
pub use swipe::{DirectionalSwipe, DragStepper, SwipeHandlers};
