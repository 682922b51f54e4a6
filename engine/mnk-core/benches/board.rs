use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use mnk_core::{GameState, Player};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// A half-filled board so the win scan walks through mixed lines.
fn midgame(rows: usize, cols: usize, k: usize, seed: u64) -> GameState {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut state = GameState::new(rows, cols, k).unwrap();
    let mut player = Player::One;
    for _ in 0..(rows * cols) / 2 {
        let empty = state.empty_cells();
        let mv = empty[rng.gen_range(0..empty.len())];
        state.apply_move(mv, player).unwrap();
        if state.check_win(mv, player) {
            break;
        }
        player = player.other();
    }
    state
}

fn bench_check_win(c: &mut Criterion) {
    let mut group = c.benchmark_group("board_check_win");
    for (rows, cols, k) in [(3, 3, 3), (7, 7, 4), (15, 15, 5)] {
        let state = midgame(rows, cols, k, 3);
        let center = state.to_index(rows / 2, cols / 2);
        group.bench_function(format!("{}x{}_k{}", rows, cols, k), |b| {
            b.iter_batched(
                || state.clone(),
                |mut s| s.check_win(center, Player::One),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_ranked_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("board_ranked_moves");
    for (rows, cols, k) in [(3, 3, 3), (7, 7, 4), (15, 15, 5)] {
        let state = midgame(rows, cols, k, 5);
        group.bench_function(format!("{}x{}_k{}", rows, cols, k), |b| {
            b.iter(|| state.ranked_moves());
        });
    }
    group.finish();
}

fn bench_apply_undo(c: &mut Criterion) {
    let mut group = c.benchmark_group("board_apply_undo");
    let mut state = midgame(7, 7, 4, 9);
    let mv = state.empty_cells()[0];
    group.bench_function("apply_undo_7x7", |b| {
        b.iter(|| {
            let undo = state.apply_undoable(mv, Player::Two).unwrap();
            state.is_terminal(mv, Player::Two);
            state.undo(undo);
        });
    });
    group.bench_function("clone_apply_7x7", |b| {
        b.iter(|| {
            let mut scratch = state.clone();
            scratch.apply_move(mv, Player::Two).unwrap();
            scratch.is_terminal(mv, Player::Two)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_check_win, bench_ranked_moves, bench_apply_undo);
criterion_main!(benches);
