//! Benchmark for noise sampling performance.
//!
//! Run with: cargo bench --package cavern_procedural --bench noise_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use cavern_procedural::noise::{CaveSeed, NoiseField, SimplexNoise};

fn benchmark_single_sample(c: &mut Criterion) {
    let noise = SimplexNoise::new(CaveSeed::new(42));

    c.bench_function("single_noise_sample", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(noise.sample(black_box(x), black_box(x * 0.7)))
        });
    });
}

fn benchmark_million_samples(c: &mut Criterion) {
    let noise = SimplexNoise::new(CaveSeed::new(42));

    let mut group = c.benchmark_group("million_samples");
    group.throughput(Throughput::Elements(1_000_000));
    group.sample_size(10);

    group.bench_function("1M_noise_samples", |b| {
        b.iter(|| {
            for i in 0..1_000_000 {
                let x = (i % 1000) as f64 * 0.1;
                let y = (i / 1000) as f64 * 0.1;
                black_box(noise.sample(x, y));
            }
        });
    });

    group.finish();
}

fn benchmark_integer_lattice(c: &mut Criterion) {
    // Chunk generation only ever samples at integer world positions.
    let noise = SimplexNoise::new(CaveSeed::new(42));

    c.bench_function("integer_lattice_sample", |b| {
        let mut x = 0i64;
        b.iter(|| {
            x = x.wrapping_add(1);
            black_box(noise.sample(black_box(x as f64), black_box((x / 2) as f64)))
        });
    });
}

criterion_group!(
    benches,
    benchmark_single_sample,
    benchmark_million_samples,
    benchmark_integer_lattice
);
criterion_main!(benches);
