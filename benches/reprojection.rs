//! Throughput benchmark for the reprojection residual kernels.
//!
//! Each kernel is a fixed, bounded arithmetic expression; this benchmark
//! tracks the per-call cost of the full residual, the validity-only path,
//! and the parallel batch entry point.

use apex_reprojection::{
    par_reprojection_delta_batch, reprojection_delta, reprojection_is_valid, Equirectangular,
    LandmarkMatch, Linear, Pose3, DEFAULT_EPSILON,
};
use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::{Vector2, Vector4};
use std::hint::black_box;

fn setup() -> (Pose3<f64>, Pose3<f64>, Vector4<f64>) {
    let source_pose = Pose3::from_translation_euler(0.3, -0.2, 0.1, 0.05, -0.02, 0.6);
    let target_pose = Pose3::from_translation_euler(-0.1, 0.0, 0.4, 0.0, 0.03, -0.4);
    let calibration = Vector4::new(500.0, 500.0, 320.0, 240.0);
    (source_pose, target_pose, calibration)
}

fn bench_single(c: &mut Criterion) {
    let (source_pose, target_pose, calibration) = setup();
    let source_pixel = Vector2::new(411.0, 153.5);
    let target_pixel = Vector2::new(408.2, 151.9);

    c.bench_function("reprojection_delta/linear", |b| {
        b.iter(|| {
            reprojection_delta::<Linear, f64>(
                black_box(&source_pose),
                black_box(&calibration),
                black_box(&target_pose),
                black_box(&calibration),
                black_box(0.25),
                black_box(&source_pixel),
                black_box(&target_pixel),
                DEFAULT_EPSILON,
            )
        })
    });

    c.bench_function("reprojection_delta/equirectangular", |b| {
        b.iter(|| {
            reprojection_delta::<Equirectangular, f64>(
                black_box(&source_pose),
                black_box(&calibration),
                black_box(&target_pose),
                black_box(&calibration),
                black_box(0.25),
                black_box(&source_pixel),
                black_box(&target_pixel),
                DEFAULT_EPSILON,
            )
        })
    });

    c.bench_function("reprojection_is_valid/linear", |b| {
        b.iter(|| {
            reprojection_is_valid::<Linear, f64>(
                black_box(&source_pose),
                black_box(&calibration),
                black_box(&target_pose),
                black_box(0.25),
                black_box(&source_pixel),
                DEFAULT_EPSILON,
            )
        })
    });
}

fn bench_batch(c: &mut Criterion) {
    let (source_pose, target_pose, calibration) = setup();
    let matches: Vec<LandmarkMatch<f64>> = (0..10_000)
        .map(|i| LandmarkMatch {
            source_pixel: Vector2::new(100.0 + (i % 440) as f64, 50.0 + (i % 380) as f64),
            inverse_range: 0.05 + (i % 100) as f64 * 0.01,
            target_pixel: Vector2::new(102.0 + (i % 440) as f64, 51.0 + (i % 380) as f64),
        })
        .collect();

    c.bench_function("par_reprojection_delta_batch/linear/10k", |b| {
        b.iter(|| {
            par_reprojection_delta_batch::<Linear, f64>(
                black_box(&source_pose),
                black_box(&calibration),
                black_box(&target_pose),
                black_box(&calibration),
                black_box(&matches),
                DEFAULT_EPSILON,
            )
        })
    });
}

criterion_group!(benches, bench_single, bench_batch);
criterion_main!(benches);
