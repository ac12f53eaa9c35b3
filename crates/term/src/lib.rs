//! Terminal front end: framebuffer, diff renderer and the views drawn into it.
//!
//! Drawing is pure (framebuffer in, hit regions out); only
//! [`TerminalRenderer`] and [`TerminalBell`] touch the terminal.

pub mod bell;
pub mod boards;
pub mod chrome;
pub mod fb;
pub mod layout;
pub mod menu;
pub mod renderer;

pub use bell::{BellMode, TerminalBell};
pub use boards::BoardView;
pub use chrome::ArcadeView;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use layout::{HitMap, HitTarget, Rect, Viewport};
pub use menu::{HubMenu, MenuEntry};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
