//! Benchmarks for tangent-space projection, inversion and transport
//!
//! Run with: cargo bench -p spdtangent-geometry

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nalgebra::DMatrix;
use spdtangent_core::test_helpers::{random_spd, random_spd_batch, seeded_rng};
use spdtangent_geometry::{Metric, TangentSpace};

fn benchmark_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("project");
    let mut rng = seeded_rng(0);

    for &(samples, n) in &[(64, 8), (256, 16), (128, 64)] {
        let cref: DMatrix<f64> = random_spd(n, &mut rng);
        let batch: Vec<DMatrix<f64>> = random_spd_batch(samples, n, &mut rng);
        let space = TangentSpace::new(&cref).unwrap();
        group.throughput(Throughput::Elements(samples as u64));

        for metric in Metric::ALL {
            group.bench_with_input(
                BenchmarkId::new(metric.as_str(), format!("{samples}x{n}")),
                &batch,
                |b, batch| b.iter(|| space.project(black_box(batch), metric).unwrap()),
            );
        }
    }

    group.finish();
}

fn benchmark_unprojection(c: &mut Criterion) {
    let mut group = c.benchmark_group("unproject");
    let mut rng = seeded_rng(1);

    for &(samples, n) in &[(64, 8), (256, 16)] {
        let cref: DMatrix<f64> = random_spd(n, &mut rng);
        let batch: Vec<DMatrix<f64>> = random_spd_batch(samples, n, &mut rng);
        let space = TangentSpace::new(&cref).unwrap();
        let packed = space.project(&batch, Metric::Riemann).unwrap();
        group.throughput(Throughput::Elements(samples as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{samples}x{n}")),
            &packed,
            |b, packed| b.iter(|| space.unproject(black_box(packed)).unwrap()),
        );
    }

    group.finish();
}

fn benchmark_transport(c: &mut Criterion) {
    let mut group = c.benchmark_group("project_with_transport");
    let mut rng = seeded_rng(2);

    for &(samples, n) in &[(64, 8), (256, 16)] {
        let source = TangentSpace::new(&random_spd::<f64, _>(n, &mut rng)).unwrap();
        let target = TangentSpace::new(&random_spd::<f64, _>(n, &mut rng)).unwrap();
        let batch: Vec<DMatrix<f64>> = random_spd_batch(samples, n, &mut rng);
        group.throughput(Throughput::Elements(samples as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{samples}x{n}")),
            &batch,
            |b, batch| {
                b.iter(|| {
                    source
                        .project_with_transport(black_box(batch), &target, Metric::Riemann)
                        .unwrap()
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_projection,
    benchmark_unprojection,
    benchmark_transport
);
criterion_main!(benches);
