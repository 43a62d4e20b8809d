use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetro_duel::core::{Board, GameState, PieceQueue};
use tetro_duel::search::{candidate_placements, Evaluator, Node, SearchConfig};
use tetro_duel::types::Cell;

fn fresh_game() -> GameState {
    GameState::new(PieceQueue::seven_bag(12345, 2000), 12345)
}

fn bench_hard_drop(c: &mut Criterion) {
    let template = fresh_game();

    c.bench_function("hard_drop", |b| {
        b.iter_batched(
            || template.clone(),
            |mut state| black_box(state.hard_drop()),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_remove_rows(c: &mut Criterion) {
    c.bench_function("remove_4_rows", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for row in 0..4 {
                for col in 0..10 {
                    board.set(row, col, Cell::Garbage);
                }
            }
            board.remove_rows(black_box(&[0, 1, 2, 3]));
            board
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut state = fresh_game();

    c.bench_function("try_move", |b| {
        b.iter(|| {
            state.try_move(0, 1);
            state.try_move(0, -1);
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let mut state = fresh_game();

    c.bench_function("try_rotate", |b| {
        b.iter(|| {
            state.try_rotate(true);
        })
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let mut state = fresh_game();
    let outcome = state.hard_drop();
    let evaluator = Evaluator::default();

    c.bench_function("evaluate", |b| {
        b.iter(|| evaluator.evaluate(black_box(&state), black_box(&outcome)))
    });
}

fn bench_candidates(c: &mut Criterion) {
    let state = fresh_game();

    c.bench_function("candidate_placements", |b| {
        b.iter(|| candidate_placements(black_box(&state)))
    });
}

fn bench_expand(c: &mut Criterion) {
    let state = fresh_game();
    let config = SearchConfig::default();

    c.bench_function("expand_default_tree", |b| {
        b.iter(|| {
            let mut root = Node::root(state.clone());
            root.expand(&config);
            root.aggregate()
        })
    });
}

criterion_group!(
    benches,
    bench_hard_drop,
    bench_remove_rows,
    bench_try_move,
    bench_try_rotate,
    bench_evaluate,
    bench_candidates,
    bench_expand
);
criterion_main!(benches);
