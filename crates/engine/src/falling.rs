//! Falling-block controller
//!
//! Real-time: one gravity step every [`FALL_TICK_MS`]. Pieces come from a
//! 7-bag and enter centred on the top row; a piece that cannot enter ends the
//! session.

use tui_arcade_core::stack::{
    clear_lines, create_empty_well, ghost_y, is_valid_move, line_clear_score, merge_piece,
    rotate_piece, rotate_piece_ccw, spawn_x,
};
use tui_arcade_core::{PieceBag, PieceMatrix, Well};
use tui_arcade_types::{PieceKind, FALL_TICK_MS};

use crate::audio::{play_or_log, AudioSink, Sfx};
use crate::contract::{Game, GameCallbacks, GameEnv};
use crate::store::HighScore;
use crate::ticker::{Pacing, TickLoop};

/// Storage namespace
pub const NAMESPACE: &str = "geometric-fall";

/// The piece under player control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub matrix: PieceMatrix,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    /// Spawn orientation, centred on the top row
    pub fn spawn(kind: PieceKind) -> Self {
        let matrix = PieceMatrix::spawn(kind);
        Self {
            kind,
            matrix,
            x: spawn_x(&matrix),
            y: 0,
        }
    }
}

#[derive(Debug, Clone)]
struct Session {
    well: Well,
    current: ActivePiece,
    next: PieceKind,
    score: u32,
    lines: u32,
    is_running: bool,
    is_paused: bool,
}

impl Session {
    fn with_pieces(current: PieceKind, next: PieceKind) -> Self {
        Self {
            well: create_empty_well(),
            current: ActivePiece::spawn(current),
            next,
            score: 0,
            lines: 0,
            is_running: false,
            is_paused: false,
        }
    }

    /// Draws the first two pieces of a new cycle
    fn fresh(bag: &mut PieceBag) -> Self {
        bag.begin_cycle();
        let current = bag.draw();
        Self::with_pieces(current, bag.draw())
    }

    /// Shows the pieces the next session will open with, drawing nothing
    fn idle(bag: &mut PieceBag) -> Self {
        bag.begin_cycle();
        let current = bag.peek(0).unwrap_or(PieceKind::I);
        let next = bag.peek(1).unwrap_or(PieceKind::O);
        Self::with_pieces(current, next)
    }
}

pub struct FallingBlocks {
    callbacks: Box<dyn GameCallbacks>,
    audio: Box<dyn AudioSink>,
    high_score: HighScore,
    bag: PieceBag,
    ticker: TickLoop,
    session: Session,
}

impl FallingBlocks {
    pub fn new(env: GameEnv, mut callbacks: Box<dyn GameCallbacks>) -> Self {
        let high_score = HighScore::load(env.store);
        let mut bag = PieceBag::new(env.seed);
        let session = Session::idle(&mut bag);
        callbacks.on_score_update(0, high_score.get());
        Self {
            callbacks,
            audio: env.audio,
            high_score,
            bag,
            ticker: TickLoop::new(FALL_TICK_MS, Pacing::Interval),
            session,
        }
    }

    fn accepts_input(&self) -> bool {
        self.session.is_running && !self.session.is_paused
    }

    fn fits(&self, matrix: &PieceMatrix, x: i32, y: i32) -> bool {
        is_valid_move(&self.session.well, matrix, x, y)
    }

    /// Move the active piece by `(dx, dy)` if it fits
    fn shift(&mut self, dx: i32, dy: i32) -> bool {
        let piece = self.session.current;
        if !self.fits(&piece.matrix, piece.x + dx, piece.y + dy) {
            return false;
        }
        self.session.current.x += dx;
        self.session.current.y += dy;
        true
    }

    fn turn(&mut self, rotated: PieceMatrix) {
        let piece = self.session.current;
        if self.fits(&rotated, piece.x, piece.y) {
            self.session.current.matrix = rotated;
        }
    }

    pub fn move_left(&mut self) {
        if self.accepts_input() {
            self.shift(-1, 0);
        }
    }

    pub fn move_right(&mut self) {
        if self.accepts_input() {
            self.shift(1, 0);
        }
    }

    /// Soft drop by one row. Never locks the piece.
    pub fn move_down(&mut self) {
        if self.accepts_input() {
            self.shift(0, 1);
        }
    }

    pub fn rotate_right(&mut self) {
        if self.accepts_input() {
            self.turn(rotate_piece(&self.session.current.matrix));
        }
    }

    pub fn rotate_left(&mut self) {
        if self.accepts_input() {
            self.turn(rotate_piece_ccw(&self.session.current.matrix));
        }
    }

    /// Hard drop: fall until blocked and lock immediately
    pub fn drop_piece(&mut self) {
        if !self.accepts_input() {
            return;
        }
        while self.shift(0, 1) {}
        self.lock_piece();
    }

    fn gravity_step(&mut self) {
        if !self.shift(0, 1) {
            self.lock_piece();
        }
    }

    fn lock_piece(&mut self) {
        let piece = self.session.current;
        let merged = merge_piece(&self.session.well, &piece.matrix, piece.x, piece.y);
        let (well, cleared) = clear_lines(&merged);
        self.session.well = well;

        if cleared > 0 {
            self.session.score += line_clear_score(cleared);
            self.session.lines += cleared;
            let high = self.high_score.offer(self.session.score);
            self.callbacks.on_score_update(self.session.score, high);
            play_or_log(self.audio.as_mut(), Sfx::Clear);
        } else {
            play_or_log(self.audio.as_mut(), Sfx::Place);
        }

        self.session.current = ActivePiece::spawn(self.session.next);
        self.session.next = self.bag.draw();

        let spawned = self.session.current;
        if !self.fits(&spawned.matrix, spawned.x, spawned.y) {
            self.game_over();
        }
    }

    fn halt(&mut self) {
        self.session.is_running = false;
        self.session.is_paused = false;
        self.ticker.cancel();
    }

    fn game_over(&mut self) {
        self.halt();
        log::info!(
            "falling blocks over with score {} after {} lines",
            self.session.score,
            self.session.lines
        );
        play_or_log(self.audio.as_mut(), Sfx::Fail);
        self.callbacks.on_game_over(self.session.score);
    }

    /// Replace the placed-block grid (sets up positions)
    pub fn set_well(&mut self, well: Well) {
        self.session.well = well;
    }

    /// Replace the active piece (sets up positions)
    pub fn set_current(&mut self, piece: ActivePiece) {
        self.session.current = piece;
    }

    pub fn well(&self) -> &Well {
        &self.session.well
    }

    pub fn current(&self) -> &ActivePiece {
        &self.session.current
    }

    pub fn next_piece(&self) -> PieceKind {
        self.session.next
    }

    /// Row where the active piece would land if dropped now
    pub fn ghost_y(&self) -> i32 {
        let piece = &self.session.current;
        ghost_y(&self.session.well, &piece.matrix, piece.x, piece.y)
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn lines(&self) -> u32 {
        self.session.lines
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.get()
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running
    }

    pub fn is_paused(&self) -> bool {
        self.session.is_paused
    }
}

impl Game for FallingBlocks {
    fn start(&mut self) {
        self.ticker.cancel();
        self.session = Session::fresh(&mut self.bag);
        self.session.is_running = true;
        self.ticker.start();
        log::debug!("falling blocks session started");
        self.callbacks.on_score_update(0, self.high_score.get());
    }

    fn stop(&mut self) {
        self.halt();
        self.session = Session::idle(&mut self.bag);
        self.callbacks.on_score_update(0, self.high_score.get());
    }

    fn can_pause(&self) -> bool {
        true
    }

    fn pause(&mut self) {
        if self.session.is_running {
            self.session.is_paused = true;
            self.ticker.cancel();
        }
    }

    fn resume(&mut self) {
        if self.session.is_paused {
            self.session.is_paused = false;
            self.ticker.start();
        }
    }

    fn destroy(&mut self) {
        self.halt();
    }

    fn tick(&mut self, elapsed_ms: u32) {
        let steps = self.ticker.advance(elapsed_ms);
        for _ in 0..steps {
            if !self.ticker.is_running() || !self.accepts_input() {
                break;
            }
            self.gravity_step();
        }
    }
}
