//! Criterion benchmarks for the move loop.
//! Focus sizes: start blocks n in {4, 8, 12}.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p cubeball

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use cubeball::mc::Couplings;
use cubeball::Ball;
use rand::{rngs::StdRng, SeedableRng};

fn couplings(n: usize) -> Couplings {
    Couplings {
        alpha: 0.0,
        lambda: 0.0,
        epsilon: 0.01,
        target_volume: (n * n * n) as i64,
        target_area: 0,
    }
}

fn bench_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("moves");
    for &n in &[4usize, 8, 12] {
        let cpl = couplings(n);
        group.bench_with_input(BenchmarkId::new("random_move_x1000", n), &n, |b, &n| {
            b.iter_batched(
                || (Ball::with_start_size(n), StdRng::seed_from_u64(7)),
                |(mut ball, mut rng)| {
                    for _ in 0..1000 {
                        let _ = ball.perform_random_move(&cpl, &mut rng);
                    }
                    ball
                },
                BatchSize::LargeInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("check_valid_grow_all", n), &n, |b, &n| {
            let ball = Ball::with_start_size(n);
            b.iter(|| {
                ball.boundary_faces()
                    .filter(|&(f, _)| ball.check_valid_grow(f).is_some())
                    .count()
            })
        });

        group.bench_with_input(BenchmarkId::new("check_consistency", n), &n, |b, &n| {
            let ball = Ball::with_start_size(n);
            b.iter(|| ball.check_consistency().is_ok())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_moves);
criterion_main!(benches);
