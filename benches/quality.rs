#![cfg(feature = "bench-internal")]
use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use smart_2048::engine::{Board, Move};
use smart_2048::planner;
use std::hint::black_box;

fn corpus() -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(1337);
    let mut boards = Vec::new();
    boards.push(Board::EMPTY);
    let mut b = Board::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    boards.push(b);
    let seq = [Move::Left, Move::Up, Move::Right, Move::Down];
    for i in 0..24 {
        b = b.make_move(seq[i % seq.len()], &mut rng);
        boards.push(b);
    }
    boards
}

fn bench_quality(c: &mut Criterion) {
    let boards = corpus();
    c.bench_function("quality/value", |bch| {
        bch.iter(|| {
            let mut acc = 0i64;
            for &bd in &boards {
                acc = acc.wrapping_add(planner::quality_value(bd));
            }
            black_box(acc)
        })
    });
}

criterion_group!(quality, bench_quality);
criterion_main!(quality);
