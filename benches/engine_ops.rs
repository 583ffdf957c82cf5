use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use smart_2048::engine::{Board, Move};
use std::hint::black_box;

fn corpus() -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut boards = Vec::new();
    boards.push(Board::EMPTY);
    let mut b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    boards.push(b);
    let seq = [Move::Left, Move::Up, Move::Right, Move::Down];
    for i in 0..20 {
        b = b.make_move(seq[i % seq.len()], &mut rng);
        boards.push(b);
    }
    boards
}

fn bench_apply(c: &mut Criterion) {
    for dir in Move::ALL {
        c.bench_function(&format!("apply/{}", dir), |bch| {
            let boards = corpus();
            bch.iter(|| {
                let mut acc = 0usize;
                for &bd in &boards {
                    let (next, moved) = bd.apply(dir);
                    acc ^= next.count_empty() + moved as usize;
                }
                black_box(acc)
            })
        });
    }
}

fn bench_spawn(c: &mut Criterion) {
    c.bench_function("board/with_random_tile", |bch| {
        bch.iter_batched(
            || (Board::EMPTY, StdRng::seed_from_u64(7)),
            |(mut bd, mut rng)| {
                for _ in 0..16 {
                    bd = bd.with_random_tile(&mut rng);
                }
                black_box(bd)
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("board/make_move_left", |bch| {
        bch.iter_batched(
            || {
                let mut rng = StdRng::seed_from_u64(9);
                let bd = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
                (bd, rng)
            },
            |(mut bd, mut rng)| {
                for _ in 0..64 {
                    bd = bd.make_move(Move::Left, &mut rng);
                }
                black_box(bd)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_queries(c: &mut Criterion) {
    c.bench_function("query/is_terminal", |bch| {
        let boards = corpus();
        bch.iter(|| {
            let mut acc = 0usize;
            for bd in &boards {
                acc ^= bd.is_terminal() as usize;
            }
            black_box(acc)
        })
    });
    c.bench_function("query/empty_cells", |bch| {
        let boards = corpus();
        bch.iter(|| {
            let mut acc = 0usize;
            for bd in &boards {
                acc ^= bd.empty_cells().len();
            }
            black_box(acc)
        })
    });
    c.bench_function("query/score", |bch| {
        let boards = corpus();
        bch.iter(|| {
            let mut acc = 0u64;
            for bd in &boards {
                acc = acc.wrapping_add(bd.score());
            }
            black_box(acc)
        })
    });
}

criterion_group!(engine_ops, bench_apply, bench_spawn, bench_queries);
criterion_main!(engine_ops);
