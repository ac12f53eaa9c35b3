//! Engine properties checked over long seeded runs.

use tui_arcade::core::merge::{add_random_tile, create_empty_grid, has_available_moves, move_grid};
use tui_arcade::core::SimpleRng;
use tui_arcade::engine::{ChannelCallbacks, FallingBlocks, Game, GameEnv, GameEvent};
use tui_arcade::types::Direction;

#[test]
fn merges_conserve_tile_sum_over_a_long_game() {
    let mut rng = SimpleRng::new(2024);
    let mut grid = create_empty_grid();
    grid = add_random_tile(&grid, &mut rng).into_owned();
    grid = add_random_tile(&grid, &mut rng).into_owned();

    for step in 0..500 {
        if !has_available_moves(&grid) {
            break;
        }
        let direction = Direction::ALL[rng.next_index(4)];
        let before: u32 = grid.iter().flatten().sum();
        let result = move_grid(&grid, direction);
        let after: u32 = result.grid.iter().flatten().sum();
        assert_eq!(before, after, "step {} {:?}", step, direction);
        if !result.has_moved {
            assert_eq!(result.score, 0);
            assert_eq!(result.grid, grid);
            continue;
        }
        grid = add_random_tile(&result.grid, &mut rng).into_owned();
    }
}

#[test]
fn falling_blocks_reports_game_over_exactly_once() {
    let (callbacks, rx) = ChannelCallbacks::pair();
    let mut game = FallingBlocks::new(
        GameEnv::in_memory("geometric-fall", 77),
        Box::new(callbacks),
    );
    game.start();

    // Hard drops without steering stack up in the middle until spawn fails
    for _ in 0..200 {
        if !game.is_running() {
            break;
        }
        game.drop_piece();
    }
    assert!(!game.is_running());

    // Nothing responds after the end
    game.drop_piece();
    game.tick(10_000);

    let overs = rx
        .try_iter()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(overs, 1);
}
