//! 2048 controller
//!
//! Turn-based: the grid only changes in response to [`Game2048::move_tiles`].

use tui_arcade_core::merge::{
    add_random_tile, create_empty_grid, has_available_moves, has_won, move_grid, Grid,
};
use tui_arcade_core::SimpleRng;
use tui_arcade_types::Direction;

use crate::audio::{play_or_log, AudioSink, Sfx};
use crate::contract::{Game, GameCallbacks, GameEnv};
use crate::store::HighScore;

/// Storage namespace
pub const NAMESPACE: &str = "2048";

#[derive(Debug, Clone)]
struct Session {
    grid: Grid,
    score: u32,
    is_running: bool,
    has_reached_win: bool,
}

impl Session {
    fn idle() -> Self {
        Self {
            grid: create_empty_grid(),
            score: 0,
            is_running: false,
            has_reached_win: false,
        }
    }
}

pub struct Game2048 {
    callbacks: Box<dyn GameCallbacks>,
    audio: Box<dyn AudioSink>,
    high_score: HighScore,
    rng: SimpleRng,
    session: Session,
}

impl Game2048 {
    pub fn new(env: GameEnv, mut callbacks: Box<dyn GameCallbacks>) -> Self {
        let high_score = HighScore::load(env.store);
        callbacks.on_score_update(0, high_score.get());
        Self {
            callbacks,
            audio: env.audio,
            high_score,
            rng: SimpleRng::new(env.seed),
            session: Session::idle(),
        }
    }

    /// Slide every tile towards `direction`.
    ///
    /// Ignored unless a session is running. A move that changes nothing draws
    /// no new tile and raises no callback.
    pub fn move_tiles(&mut self, direction: Direction) {
        if !self.session.is_running {
            return;
        }

        let result = move_grid(&self.session.grid, direction);
        if !result.has_moved {
            return;
        }

        self.session.score += result.score;
        let high = self.high_score.offer(self.session.score);
        self.callbacks.on_score_update(self.session.score, high);

        let sfx = if result.score > 0 { Sfx::Hit } else { Sfx::Place };
        play_or_log(self.audio.as_mut(), sfx);

        self.session.grid = add_random_tile(&result.grid, &mut self.rng).into_owned();

        if !self.session.has_reached_win && has_won(&self.session.grid) {
            self.session.has_reached_win = true;
            self.session.is_running = false;
            log::info!("2048 won with score {}", self.session.score);
            self.callbacks.on_game_win(self.session.score);
            play_or_log(self.audio.as_mut(), Sfx::Complete);
            return;
        }

        if !has_available_moves(&self.session.grid) {
            self.session.is_running = false;
            log::info!("2048 over with score {}", self.session.score);
            self.callbacks.on_game_over(self.session.score);
            play_or_log(self.audio.as_mut(), Sfx::Fail);
        }
    }

    pub fn move_up(&mut self) {
        self.move_tiles(Direction::Up);
    }

    pub fn move_down(&mut self) {
        self.move_tiles(Direction::Down);
    }

    pub fn move_left(&mut self) {
        self.move_tiles(Direction::Left);
    }

    pub fn move_right(&mut self) {
        self.move_tiles(Direction::Right);
    }

    /// Replace the grid of the current session (sets up positions)
    pub fn set_grid(&mut self, grid: Grid) {
        self.session.grid = grid;
    }

    pub fn grid(&self) -> &Grid {
        &self.session.grid
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
}

impl Game for Game2048 {
    fn start(&mut self) {
        let mut grid = create_empty_grid();
        for _ in 0..2 {
            grid = add_random_tile(&grid, &mut self.rng).into_owned();
        }
        self.session = Session {
            grid,
            is_running: true,
            ..Session::idle()
        };
        log::debug!("2048 session started");
        self.callbacks.on_score_update(0, self.high_score.get());
    }

    fn stop(&mut self) {
        self.session = Session::idle();
        self.callbacks.on_score_update(0, self.high_score.get());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{ChannelCallbacks, GameEvent};
    use std::sync::mpsc::Receiver;

    fn game() -> (Game2048, Receiver<GameEvent>) {
        let (cb, rx) = ChannelCallbacks::pair();
        (Game2048::new(GameEnv::in_memory(NAMESPACE, 7), Box::new(cb)), rx)
    }

    fn tiles(grid: &Grid) -> usize {
        grid.iter().flatten().filter(|&&v| v != 0).count()
    }

    #[test]
    fn test_construction_reports_high_score() {
        let (_game, rx) = game();
        assert_eq!(
            rx.try_recv().ok(),
            Some(GameEvent::ScoreUpdate {
                score: 0,
                high_score: 0
            })
        );
    }

    #[test]
    fn test_start_places_two_tiles() {
        let (mut game, _rx) = game();
        game.start();
        assert!(game.is_running());
        assert_eq!(tiles(game.grid()), 2);
    }

    #[test]
    fn test_moves_ignored_before_start() {
        let (mut game, rx) = game();
        rx.try_iter().count();
        game.move_left();
        assert_eq!(rx.try_iter().count(), 0);
        assert_eq!(tiles(game.grid()), 0);
    }

    #[test]
    fn test_merge_scores_and_spawns() {
        let (mut game, rx) = game();
        game.start();
        let mut grid = create_empty_grid();
        grid[0] = [0, 0, 2, 2];
        game.set_grid(grid);
        rx.try_iter().count();

        game.move_left();
        assert_eq!(game.grid()[0][0], 4);
        assert_eq!(game.score(), 4);
        assert_eq!(game.high_score(), 4);
        assert_eq!(tiles(game.grid()), 2);
        assert_eq!(
            rx.try_recv().ok(),
            Some(GameEvent::ScoreUpdate {
                score: 4,
                high_score: 4
            })
        );
    }

    #[test]
    fn test_noop_move_raises_nothing() {
        let (mut game, rx) = game();
        game.start();
        let mut grid = create_empty_grid();
        grid[0] = [2, 4, 8, 16];
        game.set_grid(grid);
        rx.try_iter().count();

        game.move_left();
        assert_eq!(rx.try_iter().count(), 0);
        assert_eq!(*game.grid(), grid);
    }

    #[test]
    fn test_reaching_2048_wins_once() {
        let (mut game, rx) = game();
        game.start();
        let mut grid = create_empty_grid();
        grid[0] = [1024, 1024, 0, 0];
        game.set_grid(grid);
        rx.try_iter().count();

        game.move_left();
        assert!(!game.is_running());
        let events: Vec<GameEvent> = rx.try_iter().collect();
        assert_eq!(events.last(), Some(&GameEvent::GameWin { final_score: 2048 }));
    }

    #[test]
    fn test_stuck_board_ends_game() {
        let (mut game, rx) = game();
        game.start();
        // The last merge opens one hole; whatever spawns there has no partner
        game.set_grid([
            [8, 16, 32, 32],
            [16, 8, 128, 256],
            [32, 64, 16, 8],
            [64, 32, 8, 16],
        ]);
        rx.try_iter().count();

        game.move_left();
        assert!(!game.is_running());
        let events: Vec<GameEvent> = rx.try_iter().collect();
        assert_eq!(events.last(), Some(&GameEvent::GameOver { final_score: 64 }));

        // Further input is ignored
        game.move_up();
        assert_eq!(rx.try_iter().count(), 0);
    }

    #[test]
    fn test_stop_keeps_high_score() {
        let (mut game, _rx) = game();
        game.start();
        let mut grid = create_empty_grid();
        grid[1] = [8, 8, 0, 0];
        game.set_grid(grid);
        game.move_left();
        game.stop();
        assert!(!game.is_running());
        assert_eq!(game.score(), 0);
        assert_eq!(game.high_score(), 16);
    }
}
