//! Frame generation benchmarks on a full-size grid.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use kinesis::animation::strategies::{PatternCycler, RainDrops, TriangleWave};
use kinesis::animation::{approach, Animation};
use kinesis::grid::{Grid, GridSize};
use kinesis::options::{Options, PatternOptions, RainOptions, TriangleOptions};

fn approach_benchmark(c: &mut Criterion) {
    let _ = c.bench_function("approach", |b| {
        b.iter(|| {
            black_box(approach(
                black_box(-1000.0),
                black_box(-20000.0),
                black_box(202.5),
            ))
        })
    });
}

fn frame_benchmark(c: &mut Criterion) {
    let options = Options::default();
    let size = options.rig.grid_size();
    let mut group = c.benchmark_group("next_frame");

    let mut triangle = Animation::raw(
        size,
        TriangleWave::new(size, &TriangleOptions::default()),
    );
    let last = Grid::filled(size, -30000.0);
    let mut t = 0.0;
    let _ = group.bench_function("triangle", |b| {
        b.iter(|| {
            t += 0.05;
            black_box(triangle.next_frame(t, 0.05, &last))
        })
    });

    let mut rain = Animation::shader(
        size,
        RainDrops::new(size, &RainOptions::default()).with_seed(3),
    );
    let mut last = Grid::filled(size, 0.0);
    let mut t = 0.0;
    let _ = group.bench_function("rain", |b| {
        b.iter(|| {
            t += 0.05;
            if let Ok(outcome) = rain.next_frame(t, 0.05, &last) {
                if let Some(frame) = outcome.into_frame() {
                    last = frame;
                }
            }
        })
    });

    let velocity = options.rig.max_velocity
        * options.animations.targeted.velocity_fraction;
    let mut patterns = Animation::targeted(
        size,
        PatternCycler::new(size, &PatternOptions::default()),
        velocity,
    );
    let mut last = Grid::filled(size, 0.0);
    let mut t = 0.0;
    let _ = group.bench_function("patterns", |b| {
        b.iter(|| {
            t += 0.05;
            if let Ok(outcome) = patterns.next_frame(t, 0.05, &last) {
                if let Some(frame) = outcome.into_frame() {
                    last = frame;
                }
            }
        })
    });

    group.finish();
}

fn grid_size_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("rain_grid_size");

    for rows in [10, 40, 160] {
        let size = GridSize::new(rows, 8);
        let mut rain = Animation::shader(
            size,
            RainDrops::new(size, &RainOptions::default()).with_seed(5),
        );
        let last = Grid::filled(size, 0.0);
        let _ = group.bench_function(format!("{rows}x8"), |b| {
            b.iter(|| black_box(rain.next_frame(1.0, 0.05, &last)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    approach_benchmark,
    frame_benchmark,
    grid_size_benchmark
);
criterion_main!(benches);
