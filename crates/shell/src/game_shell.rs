//! The game shell - lifecycle state machine shared by every game
//!
//! A [`GameShell`] owns one controller, one [`Surface`] and the current
//! [`AppState`]. Every input source (keys, clicks, pointer gestures, time) is
//! dispatched through it:
//!
//! ```text
//!            Enter/play/start             Enter/pause (can_pause)
//!  Stopped ──────────────────► Playing ◄──────────────────────► Paused
//!     ▲                         │   │        Enter/play (resume)
//!     │ stop                    │   │
//!     └─────────────────────────┘   ├── on_game_over ──► GameOver ─┐
//!                                   └── on_game_win  ──► Win ──────┤
//!                                         Enter/play/restart       │
//!                                   Playing ◄──────────────────────┘
//! ```
//!
//! Game actions bound in the control table only run while `Playing`.
//! Controller callbacks arrive as [`GameEvent`]s and are applied right after
//! the dispatch that raised them.

use std::sync::mpsc::Receiver;

use anyhow::{bail, Result};
use tui_arcade_engine::{ChannelCallbacks, Game, GameCallbacks, GameEvent};
use tui_arcade_input::KeyInput;
use tui_arcade_types::{AppState, KeyMatchMode, Point};

use crate::control::{find_by_key, match_value, ControlMapping};
use crate::surface::{Element, Surface};
use crate::swipe::SwipeHandlers;

/// Ids of the elements a game uses. Only the game element is required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShellElements {
    pub game: &'static str,

    pub score: Option<&'static str>,
    pub high_score: Option<&'static str>,
    pub final_score: Option<&'static str>,
    pub win_score: Option<&'static str>,

    pub start_screen: Option<&'static str>,
    pub game_over_screen: Option<&'static str>,
    pub win_screen: Option<&'static str>,

    pub play_btn: Option<&'static str>,
    pub pause_btn: Option<&'static str>,
    pub stop_btn: Option<&'static str>,
    pub start_btn: Option<&'static str>,
    pub restart_btn: Option<&'static str>,
    pub win_restart_btn: Option<&'static str>,
}

impl ShellElements {
    pub fn new(game: &'static str) -> Self {
        Self {
            game,
            ..Self::default()
        }
    }

    /// Keep only the ids present on `surface`
    fn resolve(&self, surface: &Surface) -> Self {
        let keep = |id: Option<&'static str>| id.filter(|id| surface.contains(id));
        Self {
            game: self.game,
            score: keep(self.score),
            high_score: keep(self.high_score),
            final_score: keep(self.final_score),
            win_score: keep(self.win_score),
            start_screen: keep(self.start_screen),
            game_over_screen: keep(self.game_over_screen),
            win_screen: keep(self.win_screen),
            play_btn: keep(self.play_btn),
            pause_btn: keep(self.pause_btn),
            stop_btn: keep(self.stop_btn),
            start_btn: keep(self.start_btn),
            restart_btn: keep(self.restart_btn),
            win_restart_btn: keep(self.win_restart_btn),
        }
    }
}

/// Builds the controller from the resolved game element
pub type GameFactory<G> = Box<dyn FnOnce(&Element, Box<dyn GameCallbacks>) -> Result<G>>;

pub struct ShellConfig<G> {
    pub elements: ShellElements,
    pub create_game: GameFactory<G>,
    pub controls: Vec<ControlMapping<G>>,
    pub key_match_mode: KeyMatchMode,
    /// Ask for pause support; effective only when the controller has it too
    pub can_pause: bool,
    pub swipe: Option<Box<dyn SwipeHandlers<G>>>,
}

impl<G> ShellConfig<G> {
    pub fn new<F>(elements: ShellElements, create_game: F) -> Self
    where
        F: FnOnce(&Element, Box<dyn GameCallbacks>) -> Result<G> + 'static,
    {
        Self {
            elements,
            create_game: Box::new(create_game),
            controls: Vec::new(),
            key_match_mode: KeyMatchMode::Key,
            can_pause: true,
            swipe: None,
        }
    }

    pub fn with_controls(mut self, controls: Vec<ControlMapping<G>>) -> Self {
        self.controls = controls;
        self
    }

    pub fn with_key_match_mode(mut self, mode: KeyMatchMode) -> Self {
        self.key_match_mode = mode;
        self
    }

    pub fn with_can_pause(mut self, can_pause: bool) -> Self {
        self.can_pause = can_pause;
        self
    }

    pub fn with_swipe(mut self, swipe: Box<dyn SwipeHandlers<G>>) -> Self {
        self.swipe = Some(swipe);
        self
    }
}

pub struct GameShell<G> {
    game: G,
    surface: Surface,
    state: AppState,
    ids: ShellElements,
    controls: Vec<ControlMapping<G>>,
    key_match_mode: KeyMatchMode,
    can_pause: bool,
    swipe: Option<Box<dyn SwipeHandlers<G>>>,
    events: Receiver<GameEvent>,
}

impl<G: Game> GameShell<G> {
    /// Resolve the elements, create the controller and lay out the stopped
    /// state.
    ///
    /// Fails (after logging) when the game element is missing or the factory
    /// fails. Control selectors without a matching surface control are not
    /// bound.
    pub fn new(config: ShellConfig<G>, mut surface: Surface) -> Result<Self> {
        let ShellConfig {
            elements,
            create_game,
            mut controls,
            key_match_mode,
            can_pause,
            swipe,
        } = config;

        let Some(game_element) = surface.element(elements.game) else {
            log::error!("[GameShell] game element #{} not found", elements.game);
            bail!("game element #{} not found", elements.game);
        };

        let (callbacks, events) = ChannelCallbacks::pair();
        let game = match create_game(game_element, Box::new(callbacks)) {
            Ok(game) => game,
            Err(e) => {
                log::error!("[GameShell] failed to create game: {:#}", e);
                return Err(e.context("failed to create game"));
            }
        };

        for control in controls.iter_mut() {
            if let Some(selector) = control.selector {
                if !surface.has_selector(selector) {
                    log::debug!("[GameShell] control {} not on surface", selector);
                    control.selector = None;
                }
            }
        }

        let ids = elements.resolve(&surface);
        let can_pause = can_pause && game.can_pause();
        lay_out_stopped(&mut surface, &ids);

        let mut shell = Self {
            game,
            surface,
            state: AppState::Stopped,
            ids,
            controls,
            key_match_mode,
            can_pause,
            swipe,
            events,
        };
        shell.drain_events();
        log::info!("[GameShell] #{} ready", shell.ids.game);
        Ok(shell)
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn can_pause(&self) -> bool {
        self.can_pause
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Id of the game element
    pub fn game_element(&self) -> &'static str {
        self.ids.game
    }

    /// Record a new game-area size after the host resized; the controller is
    /// resized separately through [`Self::game_mut`].
    pub fn resize_game_element(&mut self, width: u16, height: u16) {
        self.surface.resize_game(self.ids.game, width, height);
    }

    /// Handle a keydown. Returns true when the key was consumed.
    ///
    /// Enter toggles pause while playing (when supported) and otherwise
    /// starts or resumes. Other keys only act while playing.
    pub fn key_down(&mut self, input: &KeyInput) -> bool {
        if input.is_enter() {
            if self.state == AppState::Playing && self.can_pause {
                self.set_paused();
            } else {
                self.set_playing();
            }
            self.drain_events();
            return true;
        }

        if self.state != AppState::Playing {
            return false;
        }

        let value = match_value(input, self.key_match_mode);
        let Some(control) = find_by_key(&self.controls, value) else {
            return false;
        };
        (control.action)(&mut self.game);
        self.drain_events();
        true
    }

    /// Handle a click on a visible button id or control selector.
    ///
    /// Returns true when the target was recognized.
    pub fn click(&mut self, target: &str) -> bool {
        let ids = self.ids;
        let is = |id: Option<&'static str>| id == Some(target);

        if is(ids.play_btn) || is(ids.start_btn) || is(ids.restart_btn) || is(ids.win_restart_btn) {
            if !self.surface.is_visible(target) {
                return false;
            }
            self.set_playing();
        } else if is(ids.pause_btn) {
            if !self.surface.is_visible(target) {
                return false;
            }
            self.set_paused();
        } else if is(ids.stop_btn) {
            if !self.surface.is_visible(target) {
                return false;
            }
            self.set_stopped();
        } else {
            let Some(control) = self
                .controls
                .iter()
                .find(|c| c.selector == Some(target))
                .copied()
            else {
                return false;
            };
            if self.state == AppState::Playing {
                (control.action)(&mut self.game);
            }
        }
        self.drain_events();
        true
    }

    pub fn pointer_down(&mut self, at: Point) {
        if let Some(swipe) = self.swipe.as_mut() {
            swipe.touch_start(at, self.state, &mut self.game);
        }
        self.drain_events();
    }

    pub fn pointer_move(&mut self, at: Point) {
        if let Some(swipe) = self.swipe.as_mut() {
            swipe.touch_move(at, self.state, &mut self.game);
        }
        self.drain_events();
    }

    pub fn pointer_up(&mut self, at: Point) {
        if let Some(swipe) = self.swipe.as_mut() {
            swipe.touch_end(at, self.state, &mut self.game);
        }
        self.drain_events();
    }

    /// Advance real-time games while playing
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.state != AppState::Playing {
            return;
        }
        self.game.tick(elapsed_ms);
        self.drain_events();
    }

    /// Let the controller release its timers
    pub fn destroy(&mut self) {
        self.game.destroy();
    }

    fn transition(&mut self, next: AppState) {
        if self.state != next {
            log::debug!("[GameShell] {} -> {}", self.state.as_str(), next.as_str());
        }
        self.state = next;
    }

    fn set_playing(&mut self) {
        if self.state == AppState::Paused && self.can_pause {
            self.game.resume();
        } else {
            self.game.start();
        }
        self.transition(AppState::Playing);

        let ids = self.ids;
        let s = &mut self.surface;
        hide(s, ids.play_btn);
        show(s, ids.pause_btn);
        show(s, ids.stop_btn);
        hide(s, ids.start_screen);
        hide(s, ids.game_over_screen);
        hide(s, ids.win_screen);
    }

    fn set_paused(&mut self) {
        if !self.can_pause {
            return;
        }
        self.transition(AppState::Paused);
        self.game.pause();

        let ids = self.ids;
        show(&mut self.surface, ids.play_btn);
        hide(&mut self.surface, ids.pause_btn);
    }

    fn set_stopped(&mut self) {
        self.transition(AppState::Stopped);
        self.game.stop();
        lay_out_stopped(&mut self.surface, &self.ids);
    }

    fn set_finished(&mut self, next: AppState, screen: Option<&'static str>) {
        self.transition(next);
        let ids = self.ids;
        let s = &mut self.surface;
        show(s, ids.play_btn);
        hide(s, ids.pause_btn);
        hide(s, ids.stop_btn);
        show(s, screen);
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                GameEvent::ScoreUpdate { score, high_score } => {
                    set_text(&mut self.surface, self.ids.score, score);
                    set_text(&mut self.surface, self.ids.high_score, high_score);
                }
                GameEvent::GameOver { final_score } => {
                    set_text(&mut self.surface, self.ids.final_score, final_score);
                    self.set_finished(AppState::GameOver, self.ids.game_over_screen);
                }
                GameEvent::GameWin { final_score } => {
                    set_text(&mut self.surface, self.ids.win_score, final_score);
                    self.set_finished(AppState::Win, self.ids.win_screen);
                }
            }
        }
    }
}

fn show(surface: &mut Surface, id: Option<&str>) {
    if let Some(id) = id {
        surface.show(id);
    }
}

fn hide(surface: &mut Surface, id: Option<&str>) {
    if let Some(id) = id {
        surface.hide(id);
    }
}

fn set_text(surface: &mut Surface, id: Option<&str>, value: u32) {
    if let Some(id) = id {
        surface.set_text(id, &value.to_string());
    }
}

fn lay_out_stopped(surface: &mut Surface, ids: &ShellElements) {
    show(surface, ids.play_btn);
    hide(surface, ids.pause_btn);
    hide(surface, ids.stop_btn);
    show(surface, ids.start_screen);
    hide(surface, ids.game_over_screen);
    hide(surface, ids.win_screen);
}
