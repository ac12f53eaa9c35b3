//! Stack module - piece matrices, collision and line clearing
//!
//! Pieces are small 0/1 matrices (at most 4x4) placed on a 10x20 well of
//! placed blocks. Coordinates: `x` grows to the right, `y` grows downward, and
//! a piece at `(x, y)` covers well cell `(x + px, y + py)` for every set cell
//! `(px, py)` of its matrix. Rows above the well (`y < 0`) are always free, so
//! pieces can enter from the top.
//!
//! Every function here is pure: rotation returns a new matrix and
//! [`clear_lines`] returns a new well.

use crate::types::{PieceKind, FALL_COLS, FALL_ROWS, LINE_SCORES};

/// Largest matrix edge (the I piece)
pub const MAX_PIECE_EDGE: usize = 4;

/// One row of placed blocks
pub type Row = [u8; FALL_COLS];

/// The full placed-block grid (`well[y][x]`)
pub type Well = [Row; FALL_ROWS];

/// A tetromino shape as a small 0/1 matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceMatrix {
    rows: u8,
    cols: u8,
    cells: [[u8; MAX_PIECE_EDGE]; MAX_PIECE_EDGE],
}

impl PieceMatrix {
    /// Build a matrix from rows of equal length (at most 4x4)
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let mut cells = [[0; MAX_PIECE_EDGE]; MAX_PIECE_EDGE];
        let height = rows.len().min(MAX_PIECE_EDGE);
        let width = rows.first().map_or(0, |r| r.len()).min(MAX_PIECE_EDGE);
        for (y, row) in rows.iter().take(height).enumerate() {
            for (x, &v) in row.iter().take(width).enumerate() {
                cells[y][x] = u8::from(v != 0);
            }
        }
        Self {
            rows: height as u8,
            cols: width as u8,
            cells,
        }
    }

    /// Spawn orientation of a piece kind
    pub fn spawn(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::from_rows(&[
                &[0, 0, 0, 0],
                &[1, 1, 1, 1],
                &[0, 0, 0, 0],
                &[0, 0, 0, 0],
            ]),
            PieceKind::O => Self::from_rows(&[&[1, 1], &[1, 1]]),
            PieceKind::T => Self::from_rows(&[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]]),
            PieceKind::S => Self::from_rows(&[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]]),
            PieceKind::Z => Self::from_rows(&[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]]),
            PieceKind::J => Self::from_rows(&[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]]),
            PieceKind::L => Self::from_rows(&[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]]),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Cell value at `(x, y)` inside the matrix; out-of-range reads are 0
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x >= self.cols() || y >= self.rows() {
            return 0;
        }
        self.cells[y][x]
    }

    /// Offsets `(px, py)` of every set cell, row by row
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows()).flat_map(move |y| {
            (0..self.cols()).filter_map(move |x| (self.cells[y][x] != 0).then_some((x, y)))
        })
    }

    /// Matrix rows as slices (for rendering and tests)
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows())
            .map(|y| self.cells[y][..self.cols()].to_vec())
            .collect()
    }
}

/// Rotate 90° clockwise: `rotated[x][rows - 1 - y] = piece[y][x]`
pub fn rotate_piece(piece: &PieceMatrix) -> PieceMatrix {
    let rows = piece.rows();
    let cols = piece.cols();
    let mut cells = [[0; MAX_PIECE_EDGE]; MAX_PIECE_EDGE];
    for y in 0..rows {
        for x in 0..cols {
            cells[x][rows - 1 - y] = piece.cells[y][x];
        }
    }
    PieceMatrix {
        rows: cols as u8,
        cols: rows as u8,
        cells,
    }
}

/// Rotate 90° counter-clockwise (three clockwise turns)
pub fn rotate_piece_ccw(piece: &PieceMatrix) -> PieceMatrix {
    rotate_piece(&rotate_piece(&rotate_piece(piece)))
}

/// Create a well of empty cells
pub fn create_empty_well() -> Well {
    [[0; FALL_COLS]; FALL_ROWS]
}

/// Check whether `piece` fits at `(x, y)`.
///
/// Every set cell must land inside `[0, cols)` horizontally and above the
/// bottom boundary; cells on visible rows must also be unoccupied. Cells on
/// negative rows never collide.
pub fn is_valid_move(grid: &[Row], piece: &PieceMatrix, x: i32, y: i32) -> bool {
    let rows = grid.len() as i32;
    let cols = FALL_COLS as i32;

    piece.filled().all(|(px, py)| {
        let nx = x + px as i32;
        let ny = y + py as i32;
        if nx < 0 || nx >= cols || ny >= rows {
            return false;
        }
        ny < 0 || grid[ny as usize][nx as usize] == 0
    })
}

/// Remove every full row, shifting the rest down.
///
/// Returns the new grid (empty rows prepended at the top) and the number of
/// rows removed. The input is left untouched.
pub fn clear_lines<const R: usize>(grid: &[Row; R]) -> ([Row; R], u32) {
    let mut out = [[0; FALL_COLS]; R];
    let mut write = R;
    let mut cleared = 0;

    for row in grid.iter().rev() {
        if row.iter().all(|&c| c != 0) {
            cleared += 1;
        } else {
            write -= 1;
            out[write] = *row;
        }
    }

    (out, cleared)
}

/// Write the set cells of `piece` into a copy of `grid`.
///
/// Cells above the visible board are dropped.
pub fn merge_piece(grid: &Well, piece: &PieceMatrix, x: i32, y: i32) -> Well {
    let mut out = *grid;
    for (px, py) in piece.filled() {
        let nx = x + px as i32;
        let ny = y + py as i32;
        if ny >= 0 && (ny as usize) < FALL_ROWS && nx >= 0 && (nx as usize) < FALL_COLS {
            out[ny as usize][nx as usize] = 1;
        }
    }
    out
}

/// Column where a freshly spawned piece is centred
pub fn spawn_x(piece: &PieceMatrix) -> i32 {
    (FALL_COLS / 2) as i32 - (piece.cols() / 2) as i32
}

/// Landing row of `piece` dropped straight down from `(x, y)`.
///
/// Preview only; nothing is mutated.
pub fn ghost_y(grid: &[Row], piece: &PieceMatrix, x: i32, y: i32) -> i32 {
    let mut landing = y;
    while is_valid_move(grid, piece, x, landing + 1) {
        landing += 1;
    }
    landing
}

/// Points for clearing `lines` rows at once
pub fn line_clear_score(lines: u32) -> u32 {
    LINE_SCORES
        .get(lines as usize)
        .copied()
        .unwrap_or(LINE_SCORES[LINE_SCORES.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_t_clockwise() {
        let rotated = rotate_piece(&PieceMatrix::spawn(PieceKind::T));
        assert_eq!(
            rotated.to_rows(),
            vec![vec![0, 1, 0], vec![0, 1, 1], vec![0, 1, 0]]
        );
    }

    #[test]
    fn test_rotate_i_to_vertical() {
        let rotated = rotate_piece(&PieceMatrix::spawn(PieceKind::I));
        assert_eq!(
            rotated.to_rows(),
            vec![
                vec![0, 0, 1, 0],
                vec![0, 0, 1, 0],
                vec![0, 0, 1, 0],
                vec![0, 0, 1, 0]
            ]
        );
    }

    #[test]
    fn test_rotate_non_square_swaps_dimensions() {
        let bar = PieceMatrix::from_rows(&[&[1, 1, 1]]);
        let rotated = rotate_piece(&bar);
        assert_eq!((rotated.rows(), rotated.cols()), (3, 1));
        assert_eq!(rotated.to_rows(), vec![vec![1], vec![1], vec![1]]);
    }

    #[test]
    fn test_ccw_undoes_cw() {
        let l = PieceMatrix::spawn(PieceKind::L);
        assert_eq!(rotate_piece_ccw(&rotate_piece(&l)), l);
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let start = PieceMatrix::spawn(kind);
            let mut piece = start;
            for _ in 0..4 {
                piece = rotate_piece(&piece);
            }
            assert_eq!(piece, start, "{:?}", kind);
        }
    }

    #[test]
    fn test_valid_move_bounds() {
        let well = create_empty_well();
        let o = PieceMatrix::spawn(PieceKind::O);
        assert!(is_valid_move(&well, &o, 0, 0));
        assert!(!is_valid_move(&well, &o, -1, 0));
        // Flush against the right wall and the floor
        assert!(is_valid_move(&well, &o, (FALL_COLS - 2) as i32, (FALL_ROWS - 2) as i32));
        assert!(!is_valid_move(&well, &o, (FALL_COLS - 1) as i32, 0));
        assert!(!is_valid_move(&well, &o, 0, (FALL_ROWS - 1) as i32));
        // Above the top is free
        assert!(is_valid_move(&well, &o, 0, -2));
    }

    #[test]
    fn test_valid_move_blocked_by_stack() {
        let mut well = create_empty_well();
        well[FALL_ROWS - 1][1] = 1;
        let o = PieceMatrix::spawn(PieceKind::O);
        assert!(!is_valid_move(&well, &o, 0, (FALL_ROWS - 2) as i32));
        assert!(is_valid_move(&well, &o, 2, (FALL_ROWS - 2) as i32));
    }

    #[test]
    fn test_clear_two_full_rows_above_partial() {
        let full = [1u8; FALL_COLS];
        let mut partial = [1u8; FALL_COLS];
        partial[9] = 0;
        let grid: [Row; 3] = [full, full, partial];

        let (out, cleared) = clear_lines(&grid);
        assert_eq!(cleared, 2);
        assert_eq!(out, [[0; FALL_COLS], [0; FALL_COLS], partial]);
    }

    #[test]
    fn test_clear_lines_counts_and_compacts() {
        let full = [1u8; FALL_COLS];
        let mut partial = [0u8; FALL_COLS];
        partial[0] = 1;
        let grid: [Row; 4] = [[0; FALL_COLS], partial, full, full];

        let (out, cleared) = clear_lines(&grid);
        assert_eq!(cleared, 2);
        assert_eq!(out[3], partial);
        assert_eq!(out[0], [0; FALL_COLS]);
        assert_eq!(out[1], [0; FALL_COLS]);
        assert_eq!(out[2], [0; FALL_COLS]);
        // Input untouched
        assert_eq!(grid[3], full);
    }

    #[test]
    fn test_merge_piece_drops_hidden_cells() {
        let well = create_empty_well();
        let piece = PieceMatrix::spawn(PieceKind::O);
        let merged = merge_piece(&well, &piece, 0, -1);
        assert_eq!(merged[0][0], 1);
        assert_eq!(merged[0][1], 1);
        assert_eq!(merged.iter().flatten().filter(|&&c| c != 0).count(), 2);
    }

    #[test]
    fn test_spawn_x_centres_piece() {
        assert_eq!(spawn_x(&PieceMatrix::spawn(PieceKind::I)), 3);
        assert_eq!(spawn_x(&PieceMatrix::spawn(PieceKind::O)), 4);
        assert_eq!(spawn_x(&PieceMatrix::spawn(PieceKind::T)), 4);
    }

    #[test]
    fn test_ghost_lands_on_floor_and_stack() {
        let mut well = create_empty_well();
        let o = PieceMatrix::spawn(PieceKind::O);
        assert_eq!(ghost_y(&well, &o, 4, 0), (FALL_ROWS - 2) as i32);

        well[FALL_ROWS - 1][4] = 1;
        assert_eq!(ghost_y(&well, &o, 4, 0), (FALL_ROWS - 3) as i32);
    }

    #[test]
    fn test_line_clear_score_table() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 100);
        assert_eq!(line_clear_score(2), 300);
        assert_eq!(line_clear_score(3), 500);
        assert_eq!(line_clear_score(4), 800);
    }
}
