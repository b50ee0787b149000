//! Benchmarks for the fire kernel.
//!
//! Performance budgets:
//! - `advance` at 80x24: < 100µs
//! - `encode_row` for one 80-dot row: < 2µs
//!
//! Run with: cargo bench -p ember-core --bench fire_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use ember_core::arena::required_bytes;
use ember_core::config::KernelConfig;
use ember_core::dots::DotsEffect;
use ember_core::fire::FireSession;
use ember_core::line::skeleton_line;

/// Common terminal sizes for benchmarking
const SIZES: &[(u16, u16, &str)] = &[
    (80, 24, "80x24"),   // Standard terminal
    (120, 40, "120x40"), // Large terminal
    (200, 60, "200x60"), // Extra-large
];

fn warmed_fire(width: u16, height: u16) -> FireSession {
    let config = KernelConfig::default().with_arena_capacity(required_bytes(width, height));
    let mut fire = FireSession::with_config(config);
    fire.configure(width, height).expect("arena sized for dims");
    for _ in 0..64 {
        fire.advance().expect("configured");
    }
    fire
}

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("fire/advance");
    for &(width, height, name) in SIZES {
        group.throughput(Throughput::Elements(width as u64 * height as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &(width, height), |b, &(w, h)| {
            let mut fire = warmed_fire(w, h);
            b.iter(|| {
                fire.advance().expect("configured");
                black_box(&fire);
            });
        });
    }
    group.finish();
}

fn bench_encode_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("fire/encode_frame");
    for &(width, height, name) in SIZES {
        group.throughput(Throughput::Elements(width as u64 * height as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &(width, height), |b, &(w, h)| {
            let fire = warmed_fire(w, h);
            let mut lines: Vec<Vec<u8>> = (0..h).map(|_| skeleton_line(b"", w as usize, b"")).collect();
            b.iter(|| {
                for (row, line) in lines.iter_mut().enumerate() {
                    fire.encode_row(black_box(line), 0, row as u16).expect("in range");
                }
            });
        });
    }
    group.finish();
}

fn bench_dots_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("dots/encode_frame");
    for &(width, height, name) in SIZES {
        group.throughput(Throughput::Elements(width as u64 * height as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &(width, height), |b, &(w, h)| {
            let mut dots = DotsEffect::new();
            dots.configure(123, w, h).expect("dots always configure");
            let mut lines: Vec<Vec<u8>> = (0..h).map(|_| skeleton_line(b"", w as usize, b"")).collect();
            b.iter(|| {
                for (row, line) in lines.iter_mut().enumerate() {
                    dots.encode_row(black_box(line), 0, row as u16).expect("in range");
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_advance, bench_encode_frame, bench_dots_frame);
criterion_main!(benches);
