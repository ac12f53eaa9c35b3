//! Grid-merge module - 2048 slide-and-merge rules
//!
//! The grid is a fixed 4x4 array of tile values where `0` is empty.
//! Every move is expressed as "slide left": the rows (or columns) are
//! extracted so that the requested direction points left, each line is
//! compacted and merged, and the result is written back with the inverse
//! transform.
//!
//! All functions are pure. Randomness is injected through [`SimpleRng`].

use std::borrow::Cow;

use crate::rng::SimpleRng;
use crate::types::{Direction, GRID_SIZE, SPAWN_TWO_PROBABILITY, WIN_VALUE};

/// One line of the grid
pub type Line = [u32; GRID_SIZE];

/// The 4x4 board, row-major (`grid[row][col]`)
pub type Grid = [Line; GRID_SIZE];

/// Outcome of [`move_grid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub grid: Grid,
    /// Sum of all tiles produced by merges in this move
    pub score: u32,
    /// Whether any cell changed value
    pub has_moved: bool,
}

/// Create a grid of empty cells
pub fn create_empty_grid() -> Grid {
    [[0; GRID_SIZE]; GRID_SIZE]
}

/// Empty cells as `(row, col)`, in row-major order
pub fn empty_cells(grid: &Grid) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    for (row, line) in grid.iter().enumerate() {
        for (col, &value) in line.iter().enumerate() {
            if value == 0 {
                cells.push((row, col));
            }
        }
    }
    cells
}

/// Place a 2 (90%) or a 4 (10%) on a uniformly chosen empty cell.
///
/// Returns `Cow::Borrowed(grid)` untouched when the grid has no empty cell,
/// so callers can tell a no-op apart without comparing cells.
pub fn add_random_tile<'a>(grid: &'a Grid, rng: &mut SimpleRng) -> Cow<'a, Grid> {
    let empty = empty_cells(grid);
    if empty.is_empty() {
        return Cow::Borrowed(grid);
    }

    let mut next = *grid;
    let (row, col) = empty[rng.next_index(empty.len())];
    next[row][col] = if rng.next_f64() < SPAWN_TWO_PROBABILITY { 2 } else { 4 };
    Cow::Owned(next)
}

/// Slide a line to the left and merge adjacent equal tiles.
///
/// A tile produced by a merge never merges again in the same call, so
/// `[2, 2, 2, 0]` becomes `[4, 2, 0, 0]` and `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`.
/// Returns the new line and the sum of the merged tiles.
pub fn slide_and_merge_row(row: &Line) -> (Line, u32) {
    let mut out = [0; GRID_SIZE];
    let mut score = 0;
    let mut write = 0;
    // Tile waiting for a partner; cleared once merged or emitted.
    let mut pending: Option<u32> = None;

    for &value in row.iter().filter(|&&v| v != 0) {
        match pending {
            Some(prev) if prev == value => {
                out[write] = prev * 2;
                score += prev * 2;
                write += 1;
                pending = None;
            }
            Some(prev) => {
                out[write] = prev;
                write += 1;
                pending = Some(value);
            }
            None => pending = Some(value),
        }
    }
    if let Some(prev) = pending {
        out[write] = prev;
    }

    (out, score)
}

/// Read the lines of `grid` oriented so that `direction` points left
fn extract_lines(grid: &Grid, direction: Direction) -> [Line; GRID_SIZE] {
    let mut lines = [[0; GRID_SIZE]; GRID_SIZE];
    for i in 0..GRID_SIZE {
        for j in 0..GRID_SIZE {
            lines[i][j] = match direction {
                Direction::Left => grid[i][j],
                Direction::Right => grid[i][GRID_SIZE - 1 - j],
                Direction::Up => grid[j][i],
                Direction::Down => grid[GRID_SIZE - 1 - j][i],
            };
        }
    }
    lines
}

/// Inverse of [`extract_lines`]
fn insert_lines(lines: &[Line; GRID_SIZE], direction: Direction) -> Grid {
    let mut grid = create_empty_grid();
    for i in 0..GRID_SIZE {
        for j in 0..GRID_SIZE {
            let value = lines[i][j];
            match direction {
                Direction::Left => grid[i][j] = value,
                Direction::Right => grid[i][GRID_SIZE - 1 - j] = value,
                Direction::Up => grid[j][i] = value,
                Direction::Down => grid[GRID_SIZE - 1 - j][i] = value,
            }
        }
    }
    grid
}

/// Apply one move to the whole grid
pub fn move_grid(grid: &Grid, direction: Direction) -> MoveResult {
    let mut lines = extract_lines(grid, direction);
    let mut score = 0;

    for line in lines.iter_mut() {
        let (merged, line_score) = slide_and_merge_row(line);
        *line = merged;
        score += line_score;
    }

    let next = insert_lines(&lines, direction);
    MoveResult {
        grid: next,
        score,
        has_moved: next != *grid,
    }
}

/// True when an empty cell or an orthogonally adjacent equal pair exists
pub fn has_available_moves(grid: &Grid) -> bool {
    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE {
            let value = grid[r][c];
            if value == 0 {
                return true;
            }
            if c + 1 < GRID_SIZE && grid[r][c + 1] == value {
                return true;
            }
            if r + 1 < GRID_SIZE && grid[r + 1][c] == value {
                return true;
            }
        }
    }
    false
}

/// True when any tile reached [`WIN_VALUE`]
pub fn has_won(grid: &Grid) -> bool {
    grid.iter().flatten().any(|&v| v >= WIN_VALUE)
}
