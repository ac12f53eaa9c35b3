//! Board painters: each controller's state drawn into a framebuffer.
//!
//! Pure (no I/O). The chrome positions the board; a painter only fills the
//! area it reports through [`BoardView::board_size`].

use tui_arcade_core::{stack::PieceMatrix, Well};
use tui_arcade_engine::{FallingBlocks, Game2048, SnakeGame};
use tui_arcade_types::{PieceKind, GRID_SIZE, SNAKE_TILE_SIZE};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
const PANEL_VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

/// Terminal columns per 2048 tile
pub const TILE_W: u16 = 6;
/// Terminal rows per 2048 tile
pub const TILE_H: u16 = 3;

pub trait BoardView {
    /// Board area in terminal cells, excluding the frame
    fn board_size(&self) -> (u16, u16);

    /// Paint the board with its top-left corner at `(x, y)`
    fn draw_board(&self, fb: &mut FrameBuffer, x: u16, y: u16);

    /// Optional panel to the right of the board. Returns rows used.
    fn draw_panel(&self, _fb: &mut FrameBuffer, _x: u16, _y: u16) -> u16 {
        0
    }
}

/// Tile colours follow the usual 2048 palette, darkest text on light tiles.
fn tile_style(value: u32) -> CellStyle {
    let (bg, fg) = match value {
        0 => (Rgb::new(60, 58, 50), Rgb::new(60, 58, 50)),
        2 => (Rgb::new(238, 228, 218), Rgb::new(119, 110, 101)),
        4 => (Rgb::new(237, 224, 200), Rgb::new(119, 110, 101)),
        8 => (Rgb::new(242, 177, 121), Rgb::new(249, 246, 242)),
        16 => (Rgb::new(245, 149, 99), Rgb::new(249, 246, 242)),
        32 => (Rgb::new(246, 124, 95), Rgb::new(249, 246, 242)),
        64 => (Rgb::new(246, 94, 59), Rgb::new(249, 246, 242)),
        128 => (Rgb::new(237, 207, 114), Rgb::new(249, 246, 242)),
        256 => (Rgb::new(237, 204, 97), Rgb::new(249, 246, 242)),
        512 => (Rgb::new(237, 200, 80), Rgb::new(249, 246, 242)),
        1024 => (Rgb::new(237, 197, 63), Rgb::new(249, 246, 242)),
        2048 => (Rgb::new(237, 194, 46), Rgb::new(249, 246, 242)),
        _ => (Rgb::new(60, 58, 50), Rgb::new(249, 246, 242)),
    };
    CellStyle::new(fg, bg).bold()
}

fn digits(value: u32) -> u16 {
    let mut n = value;
    let mut len = 1;
    while n >= 10 {
        n /= 10;
        len += 1;
    }
    len
}

impl BoardView for Game2048 {
    fn board_size(&self) -> (u16, u16) {
        (GRID_SIZE as u16 * TILE_W, GRID_SIZE as u16 * TILE_H)
    }

    fn draw_board(&self, fb: &mut FrameBuffer, x: u16, y: u16) {
        for (row, line) in self.grid().iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                let tx = x + col as u16 * TILE_W;
                let ty = y + row as u16 * TILE_H;
                let style = tile_style(value);
                // One column of gutter on the right of each tile
                fb.fill_rect(tx, ty, TILE_W - 1, TILE_H, ' ', style);
                fb.fill_rect(
                    tx + TILE_W - 1,
                    ty,
                    1,
                    TILE_H,
                    ' ',
                    CellStyle::new(BOARD_BG, BOARD_BG),
                );
                if value != 0 {
                    let w = digits(value);
                    let vx = tx + (TILE_W - 1).saturating_sub(w) / 2;
                    fb.put_u32(vx, ty + TILE_H / 2, value, style);
                }
            }
        }
    }
}

impl BoardView for SnakeGame {
    fn board_size(&self) -> (u16, u16) {
        let (cols, rows) = self.board_size();
        ((cols as u16).saturating_mul(2), rows as u16)
    }

    fn draw_board(&self, fb: &mut FrameBuffer, x: u16, y: u16) {
        let (w, h) = BoardView::board_size(self);
        fb.fill_rect(x, y, w, h, ' ', CellStyle::new(BOARD_BG, BOARD_BG));

        let tile = |p: tui_arcade_types::Point| {
            (
                x + (p.x / SNAKE_TILE_SIZE) as u16 * 2,
                y + (p.y / SNAKE_TILE_SIZE) as u16,
            )
        };

        let body = self.body();
        if body.is_empty() {
            return;
        }

        let food = CellStyle::new(Rgb::new(230, 70, 70), BOARD_BG).bold();
        let (fx, fy) = tile(self.food());
        fb.put_str(fx, fy, "◆◆", food);

        let segment = CellStyle::new(Rgb::new(90, 200, 110), BOARD_BG);
        let head = CellStyle::new(Rgb::new(160, 255, 170), BOARD_BG).bold();
        for (i, &p) in body.iter().enumerate().rev() {
            let (sx, sy) = tile(p);
            fb.put_str(sx, sy, "██", if i == 0 { head } else { segment });
        }
    }
}

fn piece_fg(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

fn draw_matrix(
    fb: &mut FrameBuffer,
    x: u16,
    y: u16,
    matrix: &PieceMatrix,
    at: (i32, i32),
    ch: char,
    style: CellStyle,
) {
    for (px, py) in matrix.filled() {
        let cx = at.0 + px as i32;
        let cy = at.1 + py as i32;
        if cx < 0 || cy < 0 {
            continue;
        }
        fb.fill_rect(x + cx as u16 * 2, y + cy as u16, 2, 1, ch, style);
    }
}

fn draw_well(fb: &mut FrameBuffer, x: u16, y: u16, well: &Well) {
    let empty = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
    let locked = CellStyle::new(Rgb::new(170, 170, 185), BOARD_BG);
    for (row, line) in well.iter().enumerate() {
        for (col, &cell) in line.iter().enumerate() {
            let (ch, style) = if cell != 0 { ('█', locked) } else { ('·', empty) };
            let cx = x + col as u16 * 2;
            let cy = y + row as u16;
            fb.put_char(cx, cy, ch, style);
            fb.put_char(cx + 1, cy, if cell != 0 { '█' } else { ' ' }, style);
        }
    }
}

impl BoardView for FallingBlocks {
    fn board_size(&self) -> (u16, u16) {
        let well = self.well();
        ((well[0].len() as u16) * 2, well.len() as u16)
    }

    fn draw_board(&self, fb: &mut FrameBuffer, x: u16, y: u16) {
        draw_well(fb, x, y, self.well());
        if !self.is_running() {
            return;
        }

        let piece = self.current();
        let ghost = CellStyle::new(Rgb::new(140, 140, 140), BOARD_BG).dim();
        draw_matrix(
            fb,
            x,
            y,
            &piece.matrix,
            (piece.x, self.ghost_y()),
            '░',
            ghost,
        );

        let active = CellStyle::new(piece_fg(piece.kind), BOARD_BG).bold();
        draw_matrix(fb, x, y, &piece.matrix, (piece.x, piece.y), '█', active);
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, x: u16, y: u16) -> u16 {
        fb.put_str(x, y, "LINES", PANEL_LABEL);
        fb.put_u32(x, y + 1, self.lines(), PANEL_VALUE);

        fb.put_str(x, y + 3, "NEXT", PANEL_LABEL);
        let next = self.next_piece();
        let style = CellStyle::new(piece_fg(next), Rgb::new(0, 0, 0));
        draw_matrix(fb, x, y + 4, &PieceMatrix::spawn(next), (0, 0), '█', style);
        8
    }
}
