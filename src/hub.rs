//! Hub presets: the surface, control table and swipe handling of each game.
//!
//! Element ids and control selectors match the pages each game shipped with,
//! so the shell behaves the same whichever front end hosts it.

use anyhow::Result;

use crate::engine::{FallingBlocks, Game2048, GameEnv, SnakeGame};
use crate::shell::{
    ids, ControlMapping, DirectionalSwipe, DragStepper, Element, GameShell, ShellConfig,
    ShellElements, Surface,
};
use crate::term::MenuEntry;
use crate::types::{
    Direction, KeyMatchMode, SNAKE_DEFAULT_COLS, SNAKE_DEFAULT_ROWS, SNAKE_TILE_SIZE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameChoice {
    Game2048,
    Snake,
    Fall,
}

impl GameChoice {
    pub const ALL: [GameChoice; 3] = [GameChoice::Game2048, GameChoice::Snake, GameChoice::Fall];

    pub fn from_arg(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "2048" => Some(GameChoice::Game2048),
            "snake" => Some(GameChoice::Snake),
            "fall" | "geometric-fall" | "blocks" => Some(GameChoice::Fall),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GameChoice::Game2048 => "2048",
            GameChoice::Snake => "SNAKE",
            GameChoice::Fall => "GEOMETRIC FALL",
        }
    }

    pub fn menu_entry(&self) -> MenuEntry {
        let blurb = match self {
            GameChoice::Game2048 => "slide and merge tiles up to 2048",
            GameChoice::Snake => "eat, grow, don't bite yourself",
            GameChoice::Fall => "stack falling blocks, clear lines",
        };
        MenuEntry {
            title: self.title(),
            blurb,
        }
    }
}

pub fn menu_entries() -> Vec<MenuEntry> {
    GameChoice::ALL.iter().map(GameChoice::menu_entry).collect()
}

fn add_scores(surface: &mut Surface) {
    surface
        .add_text(ids::SCORE, "Score")
        .add_text(ids::HIGH_SCORE, "Best")
        .add_text(ids::FINAL_SCORE, "Score");
}

fn add_dpad(surface: &mut Surface) {
    surface
        .add_control(".upBtn", "↑")
        .add_control(".downBtn", "↓")
        .add_control(".leftBtn", "←")
        .add_control(".rightBtn", "→");
}

// ---- 2048 -----------------------------------------------------------------

pub fn surface_2048() -> Surface {
    let mut surface = Surface::new();
    surface.add_game(ids::GRID, 0, 0);
    add_scores(&mut surface);
    surface
        .add_text(ids::WIN_SCORE, "Score")
        .add_screen(ids::START_SCREEN, "2048")
        .add_screen(ids::GAME_OVER_SCREEN, "Game over")
        .add_screen(ids::WIN_SCREEN, "You made 2048!")
        .add_button(ids::START_BTN, "Start")
        .add_button(ids::RESTART_BTN, "Try again")
        .add_button(ids::WIN_RESTART_BTN, "Play again");
    add_dpad(&mut surface);
    surface
}

pub fn config_2048(env: GameEnv) -> ShellConfig<Game2048> {
    let elements = ShellElements {
        score: Some(ids::SCORE),
        high_score: Some(ids::HIGH_SCORE),
        final_score: Some(ids::FINAL_SCORE),
        win_score: Some(ids::WIN_SCORE),
        start_screen: Some(ids::START_SCREEN),
        game_over_screen: Some(ids::GAME_OVER_SCREEN),
        win_screen: Some(ids::WIN_SCREEN),
        start_btn: Some(ids::START_BTN),
        restart_btn: Some(ids::RESTART_BTN),
        win_restart_btn: Some(ids::WIN_RESTART_BTN),
        ..ShellElements::new(ids::GRID)
    };

    ShellConfig::new(elements, move |_element, callbacks| {
        Ok(Game2048::new(env, callbacks))
    })
    .with_can_pause(false)
    .with_controls(vec![
        ControlMapping::new(&["ArrowUp", "w", "W"], Some(".upBtn"), Game2048::move_up),
        ControlMapping::new(&["ArrowDown", "s", "S"], Some(".downBtn"), Game2048::move_down),
        ControlMapping::new(&["ArrowLeft", "a", "A"], Some(".leftBtn"), Game2048::move_left),
        ControlMapping::new(&["ArrowRight", "d", "D"], Some(".rightBtn"), Game2048::move_right),
    ])
    .with_swipe(Box::new(DirectionalSwipe::new(Game2048::move_tiles)))
}

pub fn shell_2048(env: GameEnv) -> Result<GameShell<Game2048>> {
    GameShell::new(config_2048(env), surface_2048())
}

// ---- Snake ----------------------------------------------------------------

/// Terminal cells for a `cols x rows` tile board (two columns per tile)
pub fn snake_cells(cols: i32, rows: i32) -> (u16, u16) {
    ((cols.max(0) * 2) as u16, rows.max(0) as u16)
}

/// Pixel surface the snake controller sees for a game element
pub fn snake_pixels(element: &Element) -> (i32, i32) {
    let (w, h) = element.size();
    (
        (w / 2) as i32 * SNAKE_TILE_SIZE,
        h as i32 * SNAKE_TILE_SIZE,
    )
}

pub fn surface_snake(cols: i32, rows: i32) -> Surface {
    let (w, h) = snake_cells(cols, rows);
    let mut surface = Surface::new();
    surface.add_game(ids::GAME, w, h);
    add_scores(&mut surface);
    surface
        .add_text(ids::WIN_SCORE, "Score")
        .add_screen(ids::START_SCREEN, "Snake")
        .add_screen(ids::GAME_OVER_SCREEN, "Game over")
        .add_screen(ids::WIN_SCREEN, "The board is full!")
        .add_button(ids::PLAY, "Play")
        .add_button(ids::PAUSE, "Pause")
        .add_button(ids::STOP, "Stop")
        .add_button(ids::RESTART_BTN, "Play again")
        .add_button(ids::WIN_RESTART_BTN, "Play again");
    add_dpad(&mut surface);
    surface
}

fn snake_turn(game: &mut SnakeGame, direction: Direction) {
    let d = direction.delta();
    game.queue_move(d.x, d.y);
}

pub fn config_snake(env: GameEnv) -> ShellConfig<SnakeGame> {
    let elements = ShellElements {
        score: Some(ids::SCORE),
        high_score: Some(ids::HIGH_SCORE),
        final_score: Some(ids::FINAL_SCORE),
        win_score: Some(ids::WIN_SCORE),
        start_screen: Some(ids::START_SCREEN),
        game_over_screen: Some(ids::GAME_OVER_SCREEN),
        win_screen: Some(ids::WIN_SCREEN),
        play_btn: Some(ids::PLAY),
        pause_btn: Some(ids::PAUSE),
        stop_btn: Some(ids::STOP),
        restart_btn: Some(ids::RESTART_BTN),
        win_restart_btn: Some(ids::WIN_RESTART_BTN),
        ..ShellElements::new(ids::GAME)
    };

    ShellConfig::new(elements, move |element, callbacks| {
        let (width, height) = snake_pixels(element);
        SnakeGame::new(env, callbacks, width, height)
    })
    .with_key_match_mode(KeyMatchMode::Key)
    .with_controls(vec![
        ControlMapping::new(&["ArrowUp", "w", "W"], Some(".upBtn"), SnakeGame::move_up),
        ControlMapping::new(&["ArrowDown", "s", "S"], Some(".downBtn"), SnakeGame::move_down),
        ControlMapping::new(&["ArrowLeft", "a", "A"], Some(".leftBtn"), SnakeGame::move_left),
        ControlMapping::new(&["ArrowRight", "d", "D"], Some(".rightBtn"), SnakeGame::move_right),
    ])
    .with_swipe(Box::new(DirectionalSwipe::new(snake_turn)))
}

pub fn shell_snake(env: GameEnv, cols: i32, rows: i32) -> Result<GameShell<SnakeGame>> {
    GameShell::new(config_snake(env), surface_snake(cols, rows))
}

/// Board tiles that fit a viewport, capped at the default board
pub fn snake_tiles_for(width: u16, height: u16) -> (i32, i32) {
    // Frame, panel-free chrome rows above and below the board
    let cols = (width.saturating_sub(2) / 2) as i32;
    let rows = height.saturating_sub(10) as i32;
    (
        cols.clamp(1, SNAKE_DEFAULT_COLS),
        rows.clamp(1, SNAKE_DEFAULT_ROWS),
    )
}

/// Follow a viewport change: record the new element size and resize the
/// controller's surface.
pub fn fit_snake(shell: &mut GameShell<SnakeGame>, width: u16, height: u16) {
    let (cols, rows) = snake_tiles_for(width, height);
    let (w, h) = snake_cells(cols, rows);
    shell.resize_game_element(w, h);
    if shell
        .game_mut()
        .resize(cols * SNAKE_TILE_SIZE, rows * SNAKE_TILE_SIZE)
    {
        log::debug!("[hub] snake board resized to {}x{} tiles", cols, rows);
    }
}

// ---- Falling blocks -------------------------------------------------------

pub fn surface_fall() -> Surface {
    let mut surface = Surface::new();
    surface.add_game(ids::GAME, 0, 0);
    add_scores(&mut surface);
    surface
        .add_screen(ids::START_SCREEN, "Geometric Fall")
        .add_screen(ids::GAME_OVER_SCREEN, "Game over")
        .add_button(ids::PLAY, "Play")
        .add_button(ids::PAUSE, "Pause")
        .add_button(ids::STOP, "Stop")
        .add_button(ids::START_BTN, "Start")
        .add_button(ids::RESTART_BTN, "Try again")
        .add_control(".leftBtn", "←")
        .add_control(".rightBtn", "→")
        .add_control(".downBtn", "↓")
        .add_control(".rotateLeftBtn", "⟲")
        .add_control(".rotateRightBtn", "⟳")
        .add_control(".dropBtn", "Drop");
    surface
}

pub fn config_fall(env: GameEnv) -> ShellConfig<FallingBlocks> {
    let elements = ShellElements {
        score: Some(ids::SCORE),
        high_score: Some(ids::HIGH_SCORE),
        final_score: Some(ids::FINAL_SCORE),
        start_screen: Some(ids::START_SCREEN),
        game_over_screen: Some(ids::GAME_OVER_SCREEN),
        play_btn: Some(ids::PLAY),
        pause_btn: Some(ids::PAUSE),
        stop_btn: Some(ids::STOP),
        start_btn: Some(ids::START_BTN),
        restart_btn: Some(ids::RESTART_BTN),
        ..ShellElements::new(ids::GAME)
    };

    ShellConfig::new(elements, move |_element, callbacks| {
        Ok(FallingBlocks::new(env, callbacks))
    })
    .with_key_match_mode(KeyMatchMode::Code)
    .with_controls(vec![
        ControlMapping::new(
            &["ArrowUp", "KeyX"],
            Some(".rotateRightBtn"),
            FallingBlocks::rotate_right,
        ),
        ControlMapping::new(&["ArrowDown"], Some(".downBtn"), FallingBlocks::move_down),
        ControlMapping::new(&["ArrowLeft"], Some(".leftBtn"), FallingBlocks::move_left),
        ControlMapping::new(&["ArrowRight"], Some(".rightBtn"), FallingBlocks::move_right),
        ControlMapping::new(&["KeyZ"], Some(".rotateLeftBtn"), FallingBlocks::rotate_left),
        ControlMapping::new(&["Space"], Some(".dropBtn"), FallingBlocks::drop_piece),
    ])
    .with_swipe(Box::new(DragStepper::new(
        FallingBlocks::move_left,
        FallingBlocks::move_right,
        FallingBlocks::move_down,
        FallingBlocks::rotate_right,
    )))
}

pub fn shell_fall(env: GameEnv) -> Result<GameShell<FallingBlocks>> {
    GameShell::new(config_fall(env), surface_fall())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_from_arg() {
        assert_eq!(GameChoice::from_arg("2048"), Some(GameChoice::Game2048));
        assert_eq!(GameChoice::from_arg("Snake"), Some(GameChoice::Snake));
        assert_eq!(GameChoice::from_arg("geometric-fall"), Some(GameChoice::Fall));
        assert_eq!(GameChoice::from_arg("pong"), None);
        assert_eq!(menu_entries().len(), 3);
    }

    #[test]
    fn test_snake_cell_pixel_conversion() {
        let surface = surface_snake(20, 16);
        let element = surface.element(ids::GAME).unwrap();
        assert_eq!(element.size(), (40, 16));
        assert_eq!(snake_pixels(element), (20 * SNAKE_TILE_SIZE, 16 * SNAKE_TILE_SIZE));
    }

    #[test]
    fn test_snake_tiles_fit_small_terminals() {
        assert_eq!(snake_tiles_for(200, 100), (SNAKE_DEFAULT_COLS, SNAKE_DEFAULT_ROWS));
        assert_eq!(snake_tiles_for(22, 18), (10, 8));
        assert_eq!(snake_tiles_for(0, 0), (1, 1));
    }

    #[test]
    fn test_presets_build() {
        let shell = shell_2048(GameEnv::in_memory("2048", 1)).unwrap();
        assert!(!shell.can_pause());
        let shell = shell_snake(GameEnv::in_memory("snake", 1), 8, 6).unwrap();
        assert!(shell.can_pause());
        let shell = shell_fall(GameEnv::in_memory("geometric-fall", 1)).unwrap();
        assert!(shell.can_pause());
    }
}
