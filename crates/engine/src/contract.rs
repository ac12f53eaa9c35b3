//! Game contract - what every controller exposes to the shell
//!
//! The shell drives a controller only through [`Game`]; controllers report
//! back only through [`GameCallbacks`]. Callbacks are invoked synchronously
//! from inside the call that produced the event (a move, a tick), at most once
//! per logical event.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::audio::{AudioSink, NoAudio};
use crate::store::{GameStore, MemoryBackend};

/// Lifecycle operations the shell calls on a controller
pub trait Game {
    /// Begin a fresh session, discarding any previous one
    fn start(&mut self);

    /// End the session; the high score survives
    fn stop(&mut self);

    /// Whether [`pause`](Game::pause)/[`resume`](Game::resume) are supported.
    ///
    /// A game without pause support restarts on every Enter.
    fn can_pause(&self) -> bool {
        false
    }

    fn pause(&mut self) {}

    fn resume(&mut self) {}

    /// Release timers before the controller is dropped
    fn destroy(&mut self) {}

    /// Advance real-time games by `elapsed_ms` of host time
    fn tick(&mut self, _elapsed_ms: u32) {}
}

/// Notifications raised by a controller
pub trait GameCallbacks {
    fn on_score_update(&mut self, score: u32, high_score: u32);

    fn on_game_over(&mut self, final_score: u32);

    /// Games without a win condition never call this
    fn on_game_win(&mut self, _final_score: u32) {}
}

/// A callback, as a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ScoreUpdate { score: u32, high_score: u32 },
    GameOver { final_score: u32 },
    GameWin { final_score: u32 },
}

/// Forwards every callback into an mpsc channel.
///
/// The shell keeps the receiving end and drains it after each dispatch.
#[derive(Debug, Clone)]
pub struct ChannelCallbacks {
    tx: Sender<GameEvent>,
}

impl ChannelCallbacks {
    pub fn new(tx: Sender<GameEvent>) -> Self {
        Self { tx }
    }

    /// Create callbacks together with the receiver they feed
    pub fn pair() -> (Self, Receiver<GameEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self::new(tx), rx)
    }

    fn send(&self, event: GameEvent) {
        if self.tx.send(event).is_err() {
            log::debug!("game event dropped, receiver gone: {:?}", event);
        }
    }
}

impl GameCallbacks for ChannelCallbacks {
    fn on_score_update(&mut self, score: u32, high_score: u32) {
        self.send(GameEvent::ScoreUpdate { score, high_score });
    }

    fn on_game_over(&mut self, final_score: u32) {
        self.send(GameEvent::GameOver { final_score });
    }

    fn on_game_win(&mut self, final_score: u32) {
        self.send(GameEvent::GameWin { final_score });
    }
}

/// Collaborators injected into every controller
pub struct GameEnv {
    pub store: GameStore,
    pub audio: Box<dyn AudioSink>,
    pub seed: u32,
}

impl GameEnv {
    pub fn new(store: GameStore, audio: Box<dyn AudioSink>, seed: u32) -> Self {
        Self { store, audio, seed }
    }

    /// Silent environment backed by a private in-memory store
    pub fn in_memory(namespace: &str, seed: u32) -> Self {
        Self::new(
            GameStore::new(namespace, Box::new(MemoryBackend::new())),
            Box::new(NoAudio),
            seed,
        )
    }
}
