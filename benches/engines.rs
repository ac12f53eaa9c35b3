use std::collections::HashSet;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_arcade::core::merge::{has_available_moves, move_grid};
use tui_arcade::core::snake::find_first_empty_tile;
use tui_arcade::core::stack::{clear_lines, create_empty_well, ghost_y, rotate_piece};
use tui_arcade::core::{PieceBag, PieceMatrix};
use tui_arcade::engine::{ChannelCallbacks, FallingBlocks, Game, GameEnv};
use tui_arcade::term::{encode_diff_into, CellStyle, FrameBuffer};
use tui_arcade::types::{Direction, PieceKind, FALL_COLS, FALL_ROWS, TICK_MS};

fn bench_merge(c: &mut Criterion) {
    let grid = [[2, 2, 4, 4], [0, 8, 8, 0], [16, 0, 16, 0], [2, 4, 2, 4]];

    c.bench_function("move_grid_left", |b| {
        b.iter(|| move_grid(black_box(&grid), Direction::Left))
    });
    c.bench_function("has_available_moves", |b| {
        b.iter(|| has_available_moves(black_box(&grid)))
    });
}

fn bench_line_clear(c: &mut Criterion) {
    let mut well = create_empty_well();
    for row in well.iter_mut().skip(FALL_ROWS - 4) {
        *row = [1; FALL_COLS];
    }

    c.bench_function("clear_4_lines", |b| b.iter(|| clear_lines(black_box(&well))));
}

fn bench_piece_ops(c: &mut Criterion) {
    let well = create_empty_well();
    let t = PieceMatrix::spawn(PieceKind::T);

    c.bench_function("rotate_piece", |b| b.iter(|| rotate_piece(black_box(&t))));
    c.bench_function("ghost_y_empty_well", |b| {
        b.iter(|| ghost_y(black_box(&well), &t, 3, 0))
    });

    let mut bag = PieceBag::new(12345);
    c.bench_function("bag_draw", |b| b.iter(|| bag.draw()));
}

fn bench_first_empty_tile(c: &mut Criterion) {
    let occupied: HashSet<_> = (0..23)
        .flat_map(|x| (0..16).map(move |y| tui_arcade::types::Point::new(x * 20, y * 20)))
        .collect();

    c.bench_function("find_first_empty_tile_near_full", |b| {
        b.iter(|| find_first_empty_tile(24, 16, 20, black_box(&occupied)))
    });
}

fn bench_falling_tick(c: &mut Criterion) {
    let (callbacks, _rx) = ChannelCallbacks::pair();
    let mut game = FallingBlocks::new(GameEnv::in_memory("bench", 12345), Box::new(callbacks));
    game.start();

    c.bench_function("falling_tick_16ms", |b| {
        b.iter(|| {
            if !game.is_running() {
                game.start();
            }
            game.tick(black_box(TICK_MS));
        })
    });
}

fn bench_diff_encode(c: &mut Criterion) {
    let a = FrameBuffer::new(80, 24);
    let mut b_fb = a.clone();
    b_fb.put_str(10, 10, "Score 2048   Best 4096", CellStyle::default());
    let mut out = Vec::with_capacity(64 * 1024);

    c.bench_function("encode_diff_80x24", |b| {
        b.iter(|| {
            out.clear();
            encode_diff_into(black_box(&a), black_box(&b_fb), &mut out)
        })
    });
}

criterion_group!(
    benches,
    bench_merge,
    bench_line_clear,
    bench_piece_ops,
    bench_first_empty_tile,
    bench_falling_tick,
    bench_diff_encode
);
criterion_main!(benches);
