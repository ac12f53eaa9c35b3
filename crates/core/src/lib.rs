//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the simulation rules of every game in the hub.
//! It has **zero dependencies** on UI, storage, audio or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical sessions
//! - **Testable**: Every rule is a plain function over plain data
//! - **Portable**: Runs under the terminal host, in tests and in benches
//!
//! # Module Structure
//!
//! - [`merge`]: 2048 slide-and-merge over a 4x4 grid
//! - [`snake`]: Snake head movement, wall/self collision and food fallback
//! - [`stack`]: Falling-block piece matrices, collision and line clearing
//! - [`rng`]: Seeded LCG and the 7-bag piece dispenser
//!
//! # Example
//!
//! ```
//! use tui_arcade_core::merge::{create_empty_grid, move_grid};
//! use tui_arcade_core::types::Direction;
//!
//! let mut grid = create_empty_grid();
//! grid[0] = [0, 0, 2, 2];
//!
//! let result = move_grid(&grid, Direction::Left);
//! assert_eq!(result.grid[0], [4, 0, 0, 0]);
//! assert_eq!(result.score, 4);
//! assert!(result.has_moved);
//! ```

pub mod merge;
pub mod rng;
pub mod snake;
pub mod stack;

pub use tui_arcade_types as types;

// Re-export commonly used types for convenience
pub use merge::{Grid, MoveResult};
pub use rng::{PieceBag, SimpleRng};
pub use stack::{PieceMatrix, Row, Well};
