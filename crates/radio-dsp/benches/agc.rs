//! AGC benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use num_complex::Complex;
use radio_dsp::agc::{AfAgc, IfAgc};

fn bench_if_agc(c: &mut Criterion) {
    let mut agc = IfAgc::new(1.0, 1.0e6, 0.0003);
    let input: Vec<Complex<f32>> = (0..4096)
        .map(|n| Complex::new((n as f32 * 0.01).sin(), (n as f32 * 0.01).cos()))
        .collect();

    c.bench_function("if_agc_4096", |b| b.iter(|| agc.process(black_box(&input))));
}

fn bench_af_agc(c: &mut Criterion) {
    let mut agc = AfAgc::new(1.0, 1.5, 0.6, 0.001);
    let mut buffer: Vec<f64> = (0..4096).map(|n| (n as f64 * 0.01).sin() * 0.3).collect();

    c.bench_function("af_agc_4096", |b| {
        b.iter(|| agc.process(black_box(&mut buffer)))
    });
}

criterion_group!(benches, bench_if_agc, bench_af_agc);
criterion_main!(benches);
