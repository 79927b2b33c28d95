use std::{hint::black_box, time::Duration};

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use optimal_box::{solve, Bounds, ConfigBuilder, MaxIterations, StepDirection};

pub fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("slow");
    group
        .sample_size(50)
        .measurement_time(Duration::from_secs(60))
        .warm_up_time(Duration::from_secs(10))
        .noise_threshold(0.02)
        .significance_level(0.01);

    let len = 10000;
    let initial_point = (1..(len + 1))
        .map(|x| 0.5 + 0.5 * (x as f64) / (len as f64))
        .collect::<Vec<_>>();

    for direction in [StepDirection::Steepest, StepDirection::ConjugateGradient] {
        group.bench_function(&format!("{direction:?} skewed_sphere {len}"), |b| {
            b.iter_batched(
                || initial_point.clone(),
                |initial_point| {
                    run(
                        direction,
                        black_box(Bounds::default()),
                        black_box(initial_point),
                    )
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(
            &format!("{direction:?} bounded skewed_sphere {len}"),
            |b| {
                b.iter_batched(
                    || initial_point.clone(),
                    |initial_point| {
                        run(
                            direction,
                            black_box(Bounds::new(vec![0.25; len], vec![])),
                            black_box(initial_point),
                        )
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

pub fn run(direction: StepDirection, bounds: Bounds<f64>, initial_point: Vec<f64>) -> Vec<f64> {
    solve(
        skewed_sphere,
        skewed_sphere_d,
        &initial_point,
        bounds,
        &ConfigBuilder::default()
            .direction(direction)
            .max_iterations(MaxIterations::new(1000).unwrap())
            .verbose(false)
            .build()
            .unwrap(),
    )
    .unwrap()
    .point
}

fn skewed_sphere(point: &[f64]) -> f64 {
    point
        .iter()
        .enumerate()
        .map(|(i, x)| (1.0 + (i as f64) / 100.0) * x.powi(2))
        .sum()
}

fn skewed_sphere_d(point: &[f64]) -> Vec<f64> {
    point
        .iter()
        .enumerate()
        .map(|(i, x)| 2.0 * (1.0 + (i as f64) / 100.0) * x)
        .collect()
}

criterion_group!(benches, bench_solve);
criterion_main!(benches);
