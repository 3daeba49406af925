//! Benchmarks for scale engines and scale maps.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use axial_core::{FixedScaleEngine, Interval, ScaleEngine, ScaleMap};

fn bench_linear_auto_scale(c: &mut Criterion) {
    let engine = ScaleEngine::linear();

    c.bench_function("linear_auto_scale", |b| {
        b.iter(|| engine.auto_scale(black_box(10), black_box(-3.7), black_box(128.4)))
    });
}

fn bench_linear_divide_scale(c: &mut Criterion) {
    let engine = ScaleEngine::linear();
    let auto = engine.auto_scale(10, -3.7, 128.4);

    c.bench_function("linear_divide_scale", |b| {
        b.iter(|| {
            engine.divide_scale(
                black_box(auto.x1),
                black_box(auto.x2),
                10,
                5,
                black_box(auto.step),
            )
        })
    });
}

fn bench_log10_divide_scale(c: &mut Criterion) {
    let engine = ScaleEngine::log10();
    let auto = engine.auto_scale(10, 0.0, 1.0e6);

    c.bench_function("log10_divide_scale_6_decades", |b| {
        b.iter(|| {
            engine.divide_scale(
                black_box(auto.x1),
                black_box(auto.x2),
                10,
                9,
                black_box(auto.step),
            )
        })
    });
}

fn bench_fixed_sliding_window(c: &mut Criterion) {
    let mut engine = ScaleEngine::Fixed(FixedScaleEngine::default().with_max_interval_width(60.0));
    let current = engine.divide_scale(0.0, 60.0, 10, 5, 0.0);
    let mut t = 0.0;

    c.bench_function("fixed_sliding_window", |b| {
        b.iter(|| {
            t += 0.016;
            let items = Interval::new(t, t + 60.0);
            engine.on_compute_scale_div(&items, &current);
            engine.divide_scale(black_box(t), black_box(t + 60.0), 10, 5, 0.0)
        })
    });
}

fn bench_scale_map_transform(c: &mut Criterion) {
    let mut map = ScaleMap::with_intervals(1.0, 1.0e6, 0.0, 800.0);
    map.set_transformation(ScaleEngine::log10().transformation());

    c.bench_function("scale_map_log_transform_1000", |b| {
        b.iter(|| {
            (1..=1000)
                .map(|i| map.transform(black_box(f64::from(i) * 1000.0)))
                .sum::<f64>()
        })
    });
}

criterion_group!(
    benches,
    bench_linear_auto_scale,
    bench_linear_divide_scale,
    bench_log10_divide_scale,
    bench_fixed_sliding_window,
    bench_scale_map_transform,
);
criterion_main!(benches);
