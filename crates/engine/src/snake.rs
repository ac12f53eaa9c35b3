//! Snake controller
//!
//! Real-time: the host feeds elapsed time through [`Game::tick`] and the
//! snake advances [`SNAKE_FPS`] times per second. Direction changes are
//! queued and applied on the next step.
//!
//! The board is measured in pixels, snapped down to whole tiles of
//! [`SNAKE_TILE_SIZE`].

use std::collections::{HashSet, VecDeque};

use anyhow::{bail, Result};
use tui_arcade_core::snake::{
    find_first_empty_tile, is_grid_full, is_reverse_direction, is_self_collision,
    is_wall_collision, move_head,
};
use tui_arcade_core::SimpleRng;
use tui_arcade_types::{Point, SNAKE_FOOD_SCORE, SNAKE_FPS, SNAKE_TILE_SIZE};

use crate::audio::{play_or_log, AudioSink, Sfx};
use crate::contract::{Game, GameCallbacks, GameEnv};
use crate::store::HighScore;
use crate::ticker::{Pacing, TickLoop};

/// Storage namespace
pub const NAMESPACE: &str = "snake";

#[derive(Debug, Clone)]
struct Session {
    /// Head first
    body: VecDeque<Point>,
    food: Point,
    direction: Point,
    next_direction: Point,
    score: u32,
    is_running: bool,
    is_paused: bool,
}

impl Session {
    fn idle() -> Self {
        Self {
            body: VecDeque::new(),
            food: Point::ZERO,
            direction: Point::ZERO,
            next_direction: Point::ZERO,
            score: 0,
            is_running: false,
            is_paused: false,
        }
    }
}

pub struct SnakeGame {
    callbacks: Box<dyn GameCallbacks>,
    audio: Box<dyn AudioSink>,
    high_score: HighScore,
    rng: SimpleRng,
    ticker: TickLoop,
    width: i32,
    height: i32,
    session: Session,
}

/// Round a pixel extent down to whole tiles
fn snap(extent: i32) -> i32 {
    extent - extent % SNAKE_TILE_SIZE
}

impl SnakeGame {
    /// Create a controller drawing onto a `width x height` pixel surface.
    ///
    /// Fails when the surface cannot hold a single tile.
    pub fn new(
        env: GameEnv,
        mut callbacks: Box<dyn GameCallbacks>,
        width: i32,
        height: i32,
    ) -> Result<Self> {
        if width < SNAKE_TILE_SIZE || height < SNAKE_TILE_SIZE {
            bail!(
                "snake surface {}x{} is smaller than one {}px tile",
                width,
                height,
                SNAKE_TILE_SIZE
            );
        }

        let high_score = HighScore::load(env.store);
        callbacks.on_score_update(0, high_score.get());
        Ok(Self {
            callbacks,
            audio: env.audio,
            high_score,
            rng: SimpleRng::new(env.seed),
            ticker: TickLoop::new(1000 / SNAKE_FPS, Pacing::Frame),
            width: snap(width),
            height: snap(height),
            session: Session::idle(),
        })
    }

    /// Request a turn; applied on the next step.
    ///
    /// Ignored while idle or paused, and when it would reverse onto the neck.
    pub fn queue_move(&mut self, dx: i32, dy: i32) {
        if !self.session.is_running || self.session.is_paused {
            return;
        }
        let next = Point::new(dx, dy);
        if is_reverse_direction(self.session.direction, next) {
            return;
        }
        self.session.next_direction = next;
    }

    pub fn move_up(&mut self) {
        self.queue_move(0, -1);
    }

    pub fn move_down(&mut self) {
        self.queue_move(0, 1);
    }

    pub fn move_left(&mut self) {
        self.queue_move(-1, 0);
    }

    pub fn move_right(&mut self) {
        self.queue_move(1, 0);
    }

    /// Adapt to a new surface size.
    ///
    /// Segments are clamped inside the new bounds and food that fell outside
    /// is respawned. Returns false when nothing changed or the surface is too
    /// small (the old size is kept).
    pub fn resize(&mut self, width: i32, height: i32) -> bool {
        if width < SNAKE_TILE_SIZE || height < SNAKE_TILE_SIZE {
            return false;
        }
        let (width, height) = (snap(width), snap(height));
        if width == self.width && height == self.height {
            return false;
        }
        self.width = width;
        self.height = height;

        let max_x = width - SNAKE_TILE_SIZE;
        let max_y = height - SNAKE_TILE_SIZE;
        for segment in self.session.body.iter_mut() {
            segment.x = segment.x.clamp(0, max_x);
            segment.y = segment.y.clamp(0, max_y);
        }

        let food = self.session.food;
        if is_wall_collision(food, width, height) {
            self.spawn_food();
        }
        true
    }

    /// Board size in tiles
    pub fn board_size(&self) -> (i32, i32) {
        (self.width / SNAKE_TILE_SIZE, self.height / SNAKE_TILE_SIZE)
    }

    /// Board size in pixels
    pub fn surface_size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn body(&self) -> &VecDeque<Point> {
        &self.session.body
    }

    pub fn food(&self) -> Point {
        self.session.food
    }

    pub fn direction(&self) -> Point {
        self.session.direction
    }

    pub fn score(&self) -> u32 {
        self.session.score
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

    fn step(&mut self) {
        self.session.direction = self.session.next_direction;
        if self.session.direction.is_zero() {
            return;
        }

        let Some(&head) = self.session.body.front() else {
            return;
        };
        let head = move_head(head, self.session.direction, SNAKE_TILE_SIZE);

        if is_wall_collision(head, self.width, self.height)
            || is_self_collision(head, &self.session.body)
        {
            self.game_over();
            return;
        }

        self.session.body.push_front(head);
        if head == self.session.food {
            self.eat();
        } else {
            self.session.body.pop_back();
        }
    }

    fn eat(&mut self) {
        self.session.score += SNAKE_FOOD_SCORE;
        let high = self.high_score.offer(self.session.score);
        self.callbacks.on_score_update(self.session.score, high);
        play_or_log(self.audio.as_mut(), Sfx::Eat);
        self.spawn_food();
    }

    /// Place food on a free tile; a board with no free tile is a win
    fn spawn_food(&mut self) {
        let (cols, rows) = self.board_size();
        if is_grid_full(self.session.body.len(), cols, rows) {
            self.win();
            return;
        }

        let max_attempts = (cols * rows).max(0) as u32;
        for _ in 0..max_attempts {
            let food = Point::new(
                self.rng.next_range(cols as u32) as i32 * SNAKE_TILE_SIZE,
                self.rng.next_range(rows as u32) as i32 * SNAKE_TILE_SIZE,
            );
            if !is_self_collision(food, &self.session.body) {
                self.session.food = food;
                return;
            }
        }

        let occupied: HashSet<Point> = self.session.body.iter().copied().collect();
        match find_first_empty_tile(cols, rows, SNAKE_TILE_SIZE, &occupied) {
            Some(tile) => self.session.food = tile,
            None => self.win(),
        }
    }

    fn halt(&mut self) {
        self.session.is_running = false;
        self.session.is_paused = false;
        self.ticker.cancel();
    }

    fn game_over(&mut self) {
        play_or_log(self.audio.as_mut(), Sfx::Fail);
        self.halt();
        log::info!("snake over with score {}", self.session.score);
        self.callbacks.on_game_over(self.session.score);
    }

    fn win(&mut self) {
        self.halt();
        log::info!("snake won with score {}", self.session.score);
        self.callbacks.on_game_win(self.session.score);
        play_or_log(self.audio.as_mut(), Sfx::Complete);
    }
}

impl Game for SnakeGame {
    fn start(&mut self) {
        self.ticker.cancel();
        let (cols, rows) = self.board_size();
        let mut session = Session::idle();
        session.body.push_back(Point::new(
            cols / 2 * SNAKE_TILE_SIZE,
            rows / 2 * SNAKE_TILE_SIZE,
        ));
        session.is_running = true;
        self.session = session;

        self.spawn_food();
        self.callbacks.on_score_update(0, self.high_score.get());

        // A one-tile board is won by spawn_food before the loop starts
        if self.session.is_running {
            self.ticker.start();
            log::debug!("snake session started on {}x{} tiles", cols, rows);
        }
    }

    fn stop(&mut self) {
        self.halt();
        self.session = Session::idle();
        self.callbacks.on_score_update(0, self.high_score.get());
    }

    fn can_pause(&self) -> bool {
        true
    }

    fn pause(&mut self) {
        if !self.session.is_running {
            return;
        }
        self.session.is_paused = true;
        self.ticker.cancel();
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
            if !self.ticker.is_running() || !self.session.is_running || self.session.is_paused {
                break;
            }
            self.step();
        }
    }
}
