//! The running application: hub menu or one game, fed with terminal events.
//!
//! Terminal I/O stays in `main`; everything here works on crossterm event
//! values and a framebuffer, so the whole flow can be driven from tests.

use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::config::HostConfig;
use crate::engine::{
    falling, game2048, snake, AudioSink, Game, GameEnv, GameStore, JsonFileBackend, NoAudio,
};
use crate::hub::{self, GameChoice};
use crate::input::{should_quit, KeyInput};
use crate::shell::GameShell;
use crate::term::{
    ArcadeView, BellMode, BoardView, FrameBuffer, HitMap, HitTarget, HubMenu, TerminalBell,
    Viewport,
};
use crate::types::Point;

/// A mouse event reduced to what screens care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down(u16, u16),
    Drag(u16, u16),
    Up(u16, u16),
}

impl PointerEvent {
    pub fn from_mouse(event: &MouseEvent) -> Option<Self> {
        let (x, y) = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Down(x, y)),
            MouseEventKind::Drag(MouseButton::Left) => Some(PointerEvent::Drag(x, y)),
            MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Up(x, y)),
            _ => None,
        }
    }
}

/// One game behind a uniform interface
pub trait Screen {
    /// Returns true when the key was consumed
    fn key_down(&mut self, input: &KeyInput) -> bool;
    fn pointer(&mut self, event: PointerEvent);
    fn tick(&mut self, elapsed_ms: u32);
    fn render(&mut self, viewport: Viewport, fb: &mut FrameBuffer);
    fn resize(&mut self, _viewport: Viewport) {}
    fn destroy(&mut self);
}

type Fit<G> = fn(&mut GameShell<G>, u16, u16);

pub struct GameScreen<G> {
    shell: GameShell<G>,
    view: ArcadeView,
    hits: HitMap,
    dragging: bool,
    fit: Option<Fit<G>>,
}

impl<G: Game + BoardView> GameScreen<G> {
    pub fn new(shell: GameShell<G>, title: &str) -> Self {
        Self {
            shell,
            view: ArcadeView::new(title),
            hits: HitMap::new(),
            dragging: false,
            fit: None,
        }
    }

    /// Re-fit the game area whenever the viewport changes
    pub fn with_fit(mut self, fit: Fit<G>) -> Self {
        self.fit = Some(fit);
        self
    }

    pub fn shell(&self) -> &GameShell<G> {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut GameShell<G> {
        &mut self.shell
    }

    pub fn hits(&self) -> &HitMap {
        &self.hits
    }
}

impl<G: Game + BoardView> Screen for GameScreen<G> {
    fn key_down(&mut self, input: &KeyInput) -> bool {
        self.shell.key_down(input)
    }

    fn pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(x, y) => match self.hits.hit(x, y).cloned() {
                Some(HitTarget::Element(id)) => {
                    self.shell.click(&id);
                }
                Some(HitTarget::Board) => {
                    self.dragging = true;
                    self.shell.pointer_down(cell_point(x, y));
                }
                _ => {}
            },
            PointerEvent::Drag(x, y) if self.dragging => {
                self.shell.pointer_move(cell_point(x, y));
            }
            PointerEvent::Up(x, y) if self.dragging => {
                self.dragging = false;
                self.shell.pointer_up(cell_point(x, y));
            }
            _ => {}
        }
    }

    fn tick(&mut self, elapsed_ms: u32) {
        self.shell.tick(elapsed_ms);
    }

    fn render(&mut self, viewport: Viewport, fb: &mut FrameBuffer) {
        self.view
            .render_into(&self.shell, viewport, fb, &mut self.hits);
    }

    fn resize(&mut self, viewport: Viewport) {
        if let Some(fit) = self.fit {
            fit(&mut self.shell, viewport.width, viewport.height);
        }
    }

    fn destroy(&mut self) {
        self.shell.destroy();
    }
}

fn cell_point(x: u16, y: u16) -> Point {
    Point::new(x as i32, y as i32)
}

/// Where high scores live and how effects sound, shared by every game
#[derive(Debug, Clone)]
pub struct HostEnv {
    pub store_path: Option<PathBuf>,
    pub bell: BellMode,
    pub seed: u32,
}

impl HostEnv {
    pub fn from_config(config: &HostConfig) -> Self {
        Self {
            store_path: Some(config.store_path.clone()),
            bell: config.bell,
            seed: config.seed_or_clock(),
        }
    }

    /// In-memory store, silent, fixed seed
    pub fn detached(seed: u32) -> Self {
        Self {
            store_path: None,
            bell: BellMode::Off,
            seed,
        }
    }

    pub fn game_env(&self, namespace: &str) -> GameEnv {
        let audio: Box<dyn AudioSink> = match self.bell {
            BellMode::Off => Box::new(NoAudio),
            mode => Box::new(TerminalBell::stdout(mode)),
        };
        match &self.store_path {
            Some(path) => GameEnv::new(
                GameStore::new(namespace, Box::new(JsonFileBackend::new(path.clone()))),
                audio,
                self.seed,
            ),
            None => {
                let mut env = GameEnv::in_memory(namespace, self.seed);
                env.audio = audio;
                env
            }
        }
    }
}

/// Build the screen for `choice`, fitted to `viewport`
pub fn open_screen(
    choice: GameChoice,
    host: &HostEnv,
    viewport: Viewport,
) -> Result<Box<dyn Screen>> {
    let title = choice.title();
    let screen: Box<dyn Screen> = match choice {
        GameChoice::Game2048 => Box::new(GameScreen::new(
            hub::shell_2048(host.game_env(game2048::NAMESPACE))?,
            title,
        )),
        GameChoice::Snake => {
            let (cols, rows) = hub::snake_tiles_for(viewport.width, viewport.height);
            let shell = hub::shell_snake(host.game_env(snake::NAMESPACE), cols, rows)?;
            Box::new(GameScreen::new(shell, title).with_fit(hub::fit_snake))
        }
        GameChoice::Fall => Box::new(GameScreen::new(
            hub::shell_fall(host.game_env(falling::NAMESPACE))?,
            title,
        )),
    };
    log::info!("[app] opened {}", title);
    Ok(screen)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

enum Mode {
    Menu,
    Game(Box<dyn Screen>),
}

pub struct App {
    host: HostEnv,
    menu: HubMenu,
    menu_hits: HitMap,
    mode: Mode,
    viewport: Viewport,
}

impl App {
    pub fn new(host: HostEnv, viewport: Viewport) -> Self {
        Self {
            host,
            menu: HubMenu::new(hub::menu_entries()),
            menu_hits: HitMap::new(),
            mode: Mode::Menu,
            viewport,
        }
    }

    /// Start straight into a game (command-line choice)
    pub fn with_game(host: HostEnv, viewport: Viewport, choice: GameChoice) -> Result<Self> {
        let mut app = Self::new(host, viewport);
        app.open(choice)?;
        Ok(app)
    }

    pub fn in_game(&self) -> bool {
        matches!(self.mode, Mode::Game(_))
    }

    fn open(&mut self, choice: GameChoice) -> Result<()> {
        let screen = open_screen(choice, &self.host, self.viewport)?;
        self.mode = Mode::Game(screen);
        Ok(())
    }

    fn close(&mut self) {
        if let Mode::Game(screen) = &mut self.mode {
            screen.destroy();
        }
        self.mode = Mode::Menu;
    }

    pub fn handle_event(&mut self, event: &Event) -> Result<Flow> {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => {
                if let Some(pointer) = PointerEvent::from_mouse(mouse) {
                    self.handle_pointer(pointer)?;
                }
                Ok(Flow::Continue)
            }
            Event::Resize(w, h) => {
                self.resize(Viewport::new(*w, *h));
                Ok(Flow::Continue)
            }
            _ => Ok(Flow::Continue),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Flow> {
        if key.kind == KeyEventKind::Press && should_quit(key) {
            self.close();
            return Ok(Flow::Quit);
        }
        let Some(input) = KeyInput::from_key_event(key) else {
            return Ok(Flow::Continue);
        };

        match &mut self.mode {
            Mode::Menu => {
                if input.key() == "Escape" {
                    return Ok(Flow::Quit);
                }
                if let Some(index) = self.menu.key_down(&input) {
                    self.open(GameChoice::ALL[index])?;
                }
            }
            Mode::Game(screen) => {
                if input.key() == "Escape" {
                    self.close();
                } else {
                    screen.key_down(&input);
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn handle_pointer(&mut self, pointer: PointerEvent) -> Result<()> {
        match &mut self.mode {
            Mode::Menu => {
                if let PointerEvent::Down(x, y) = pointer {
                    if let Some(&HitTarget::MenuItem(index)) = self.menu_hits.hit(x, y) {
                        self.open(GameChoice::ALL[index])?;
                    }
                }
            }
            Mode::Game(screen) => screen.pointer(pointer),
        }
        Ok(())
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if let Mode::Game(screen) = &mut self.mode {
            screen.resize(viewport);
        }
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        if let Mode::Game(screen) = &mut self.mode {
            screen.tick(elapsed_ms);
        }
    }

    pub fn render(&mut self, fb: &mut FrameBuffer) {
        match &mut self.mode {
            Mode::Menu => self.menu.render_into(self.viewport, fb, &mut self.menu_hits),
            Mode::Game(screen) => screen.render(self.viewport, fb),
        }
    }
}
