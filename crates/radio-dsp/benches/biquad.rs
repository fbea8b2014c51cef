//! Biquad filter benchmarks

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use radio_dsp::biquad::{Biquad, BiquadCoeffs};

fn bench_biquad_highpass(c: &mut Criterion) {
    let mut filter = Biquad::new(BiquadCoeffs::butterworth_highpass(30.0, 48_000.0));

    let mut buffer: Vec<f64> = (0..1024).map(|i| (i as f64 * 0.01).sin()).collect();

    c.bench_function("biquad_highpass_1024", |b| {
        b.iter(|| {
            filter.process_block(black_box(&mut buffer));
        })
    });
}

criterion_group!(benches, bench_biquad_highpass);
criterion_main!(benches);
