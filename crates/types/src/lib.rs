//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used by every game in the hub.
//! All types are plain data with no external dependencies, so they can be used
//! from the engines, the controllers, the shell and the terminal views alike.
//!
//! # Boards
//!
//! | Game | Board | Notes |
//! |------|-------|-------|
//! | 2048 | 4x4 numeric grid | `0` means empty |
//! | Snake | `cols x rows` tiles of `SNAKE_TILE_SIZE` px | coordinates are pixels |
//! | Falling blocks | 10 columns x 20 rows | `0/1` placed-block grid |
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host poll interval (~60 FPS) |
//! | `SNAKE_FPS` | 10 | Snake simulation steps per second |
//! | `FALL_TICK_MS` | 500 | Gravity interval for falling blocks |
//!
//! # Examples
//!
//! ```
//! use tui_arcade_types::{AppState, Direction, PieceKind, Point};
//!
//! let d = Direction::from_str("up").unwrap();
//! assert_eq!(d.delta(), Point::new(0, -1));
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(AppState::default(), AppState::Stopped);
//! ```

/// Host poll interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// 2048 grid edge length
pub const GRID_SIZE: usize = 4;

/// Tile value that wins a 2048 session
pub const WIN_VALUE: u32 = 2048;

/// Probability that a spawned 2048 tile is a 2 (otherwise 4)
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;

/// Snake tile size in pixels
pub const SNAKE_TILE_SIZE: i32 = 20;

/// Snake simulation rate (steps per second)
pub const SNAKE_FPS: u32 = 10;

/// Points awarded per food eaten
pub const SNAKE_FOOD_SCORE: u32 = 10;

/// Default snake board width in tiles
pub const SNAKE_DEFAULT_COLS: i32 = 24;

/// Default snake board height in tiles
pub const SNAKE_DEFAULT_ROWS: i32 = 16;

/// Falling-block board width in cells
pub const FALL_COLS: usize = 10;

/// Falling-block board height in cells
pub const FALL_ROWS: usize = 20;

/// Gravity interval for falling blocks (one row per tick)
pub const FALL_TICK_MS: u32 = 500;

/// Line clear scoring table, indexed by cleared-line count.
///
/// - 1 line: 100
/// - 2 lines: 300
/// - 3 lines: 500
/// - 4 lines: 800
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Minimum pointer travel (in terminal cells) for a release to count as a swipe
pub const MIN_SWIPE_DISTANCE: i32 = 3;

/// Pointer travel per falling-block drag step (in terminal cells)
pub const DRAG_STEP_DISTANCE: i32 = 2;

/// Pointer travel that turns a tap into a drag (in terminal cells)
pub const TAP_SLOP: i32 = 1;

/// Integer coordinate pair.
///
/// The snake engine uses pixel coordinates (multiples of the tile size); the
/// pointer trackers use terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True for the stationary (0, 0) vector
    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

/// The four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector in screen coordinates (y grows downward)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_arcade_types::{Direction, Point};
    ///
    /// assert_eq!(Direction::Left.delta(), Point::new(-1, 0));
    /// assert_eq!(Direction::Down.delta(), Point::new(0, 1));
    /// ```
    pub fn delta(&self) -> Point {
        match self {
            Direction::Up => Point::new(0, -1),
            Direction::Down => Point::new(0, 1),
            Direction::Left => Point::new(-1, 0),
            Direction::Right => Point::new(1, 0),
        }
    }

    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// States of the app-level lifecycle machine.
///
/// Owned exclusively by the game shell; controllers only see the
/// start/stop/pause/resume calls it makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    Stopped,
    Playing,
    Paused,
    GameOver,
    Win,
}

impl AppState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppState::Stopped => "stopped",
            AppState::Playing => "playing",
            AppState::Paused => "paused",
            AppState::GameOver => "gameover",
            AppState::Win => "win",
        }
    }
}

/// How keyboard input is matched against a control table.
///
/// - **Key**: character-based value (`"w"`, `"W"`, `"ArrowUp"`)
/// - **Code**: physical key position (`"KeyW"`, `"Space"`), layout independent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMatchMode {
    #[default]
    Key,
    Code,
}

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_arcade_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}
