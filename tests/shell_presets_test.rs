//! The hub presets driven through the shell, as a player would.

use tui_arcade::engine::GameEnv;
use tui_arcade::hub::{shell_2048, shell_fall, shell_snake};
use tui_arcade::input::KeyInput;
use tui_arcade::shell::ids;
use tui_arcade::types::{AppState, Point, SNAKE_FPS};

fn enter() -> KeyInput {
    KeyInput::named("Enter")
}

fn arrow(name: &str) -> KeyInput {
    KeyInput::named(name)
}

#[test]
fn g2048_slide_left_merges_and_scores() {
    let mut shell = shell_2048(GameEnv::in_memory("2048", 5)).unwrap();
    assert_eq!(shell.surface().text(ids::SCORE), Some("0"));
    assert!(shell.surface().is_visible(ids::START_SCREEN));

    assert!(shell.key_down(&enter()));
    assert_eq!(shell.state(), AppState::Playing);
    assert!(!shell.surface().is_visible(ids::START_SCREEN));

    let mut grid = [[0; 4]; 4];
    grid[0] = [0, 0, 2, 2];
    shell.game_mut().set_grid(grid);
    assert!(shell.key_down(&arrow("ArrowLeft")));

    let grid = *shell.game().grid();
    assert_eq!(grid[0][0], 4);
    assert_eq!(shell.game().score(), 4);
    assert_eq!(shell.surface().text(ids::SCORE), Some("4"));
    assert_eq!(shell.surface().text(ids::HIGH_SCORE), Some("4"));
    // The merged 4 plus exactly one new tile
    let tiles: Vec<u32> = grid.iter().flatten().copied().filter(|&v| v != 0).collect();
    assert_eq!(tiles.len(), 2);
}

#[test]
fn g2048_enter_while_playing_restarts() {
    let mut shell = shell_2048(GameEnv::in_memory("2048", 5)).unwrap();
    shell.key_down(&enter());
    let mut grid = [[0; 4]; 4];
    grid[1] = [8, 8, 0, 0];
    shell.game_mut().set_grid(grid);
    shell.key_down(&KeyInput::from_char('a'));
    assert_eq!(shell.game().score(), 16);

    shell.key_down(&enter());
    assert_eq!(shell.state(), AppState::Playing);
    assert_eq!(shell.game().score(), 0);
    assert_eq!(shell.surface().text(ids::HIGH_SCORE), Some("16"));
}

#[test]
fn g2048_reaching_2048_shows_win_screen() {
    let mut shell = shell_2048(GameEnv::in_memory("2048", 5)).unwrap();
    shell.key_down(&enter());
    let mut grid = [[0; 4]; 4];
    grid[3] = [1024, 1024, 0, 0];
    shell.game_mut().set_grid(grid);

    shell.click(".leftBtn");
    assert_eq!(shell.state(), AppState::Win);
    assert!(shell.surface().is_visible(ids::WIN_SCREEN));
    assert_eq!(shell.surface().text(ids::WIN_SCORE), Some("2048"));

    // Further input is ignored until a restart
    assert!(!shell.key_down(&arrow("ArrowRight")));
    assert!(shell.click(ids::WIN_RESTART_BTN));
    assert_eq!(shell.state(), AppState::Playing);
    assert!(!shell.surface().is_visible(ids::WIN_SCREEN));
}

#[test]
fn snake_filling_the_board_is_a_win() {
    let mut shell = shell_snake(GameEnv::in_memory("snake", 3), 2, 1).unwrap();
    shell.key_down(&enter());
    assert_eq!(shell.game().food(), Point::new(0, 0));

    shell.key_down(&arrow("ArrowLeft"));
    shell.tick(1000 / SNAKE_FPS);

    assert_eq!(shell.state(), AppState::Win);
    assert!(shell.surface().is_visible(ids::WIN_SCREEN));
    assert!(!shell.surface().is_visible(ids::GAME_OVER_SCREEN));
    assert_eq!(shell.surface().text(ids::WIN_SCORE), Some("10"));
    assert!(shell.surface().is_visible(ids::PLAY));
    assert!(!shell.surface().is_visible(ids::STOP));
}

#[test]
fn snake_pause_freezes_and_stop_discards() {
    let mut shell = shell_snake(GameEnv::in_memory("snake", 3), 12, 8).unwrap();
    shell.key_down(&enter());
    shell.key_down(&KeyInput::from_char('d'));
    shell.tick(100);
    let head = shell.game().body()[0];

    assert!(shell.click(ids::PAUSE));
    assert_eq!(shell.state(), AppState::Paused);
    assert!(shell.surface().is_visible(ids::PLAY));
    shell.tick(500);
    assert_eq!(shell.game().body()[0], head);
    // Turns are ignored while paused
    assert!(!shell.key_down(&KeyInput::from_char('s')));

    shell.key_down(&enter());
    assert_eq!(shell.state(), AppState::Playing);
    shell.tick(100);
    assert_eq!(shell.game().body()[0].x, head.x + 20);

    assert!(shell.click(ids::STOP));
    assert_eq!(shell.state(), AppState::Stopped);
    assert!(shell.game().body().is_empty());
    assert!(shell.surface().is_visible(ids::START_SCREEN));
}

#[test]
fn fall_matches_physical_codes() {
    let mut shell = shell_fall(GameEnv::in_memory("geometric-fall", 11)).unwrap();
    shell.key_down(&enter());
    assert!(shell.game().is_running());

    let before = shell.game().current().x;
    // ArrowLeft is both key and code
    shell.key_down(&arrow("ArrowLeft"));
    assert_eq!(shell.game().current().x, before - 1);

    // "z" and "Z" share the KeyZ code
    let matrix = shell.game().current().matrix;
    assert!(shell.key_down(&KeyInput::from_char('Z')));
    assert!(shell.key_down(&KeyInput::from_char('z')));
    assert!(shell.key_down(&KeyInput::from_char('x')));
    assert!(shell.key_down(&KeyInput::from_char('x')));
    assert_eq!(shell.game().current().matrix, matrix);

    // A key value listed nowhere as a code is not consumed
    assert!(!shell.key_down(&KeyInput::from_char('q')));
}

#[test]
fn fall_hard_drop_locks_into_the_well() {
    let mut shell = shell_fall(GameEnv::in_memory("geometric-fall", 11)).unwrap();
    shell.key_down(&enter());
    shell.key_down(&KeyInput::from_char(' '));

    let filled: usize = shell
        .game()
        .well()
        .iter()
        .flatten()
        .filter(|&&c| c != 0)
        .count();
    assert_eq!(filled, 4);
    assert!(shell.game().is_running());
    assert_eq!(shell.surface().text(ids::SCORE), Some("0"));
}

#[test]
fn fall_pause_toggles_with_enter() {
    let mut shell = shell_fall(GameEnv::in_memory("geometric-fall", 11)).unwrap();
    shell.key_down(&enter());
    shell.key_down(&enter());
    assert_eq!(shell.state(), AppState::Paused);
    assert!(shell.game().is_paused());

    let y = shell.game().current().y;
    shell.tick(5_000);
    assert_eq!(shell.game().current().y, y);

    shell.key_down(&enter());
    shell.tick(500);
    assert_eq!(shell.game().current().y, y + 1);
}
