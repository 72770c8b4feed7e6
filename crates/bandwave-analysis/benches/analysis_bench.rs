//! Criterion benchmarks for bandwave-analysis components
//!
//! Run with: cargo bench -p bandwave-analysis

use bandwave_analysis::{AnalysisConfig, BandAnalyzer, analyze, analyze_parallel, fft::Fft};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::f32::consts::PI;

const SAMPLE_RATE: f32 = 44100.0;

/// Generate a complex test signal with multiple harmonics
fn generate_complex_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            let f1 = (2.0 * PI * 440.0 * t).sin();
            let f2 = 0.5 * (2.0 * PI * 880.0 * t).sin();
            let f3 = 0.25 * (2.0 * PI * 1320.0 * t).sin();
            let f4 = 0.125 * (2.0 * PI * 5280.0 * t).sin();
            (f1 + f2 + f3 + f4) * 0.5
        })
        .collect()
}

fn bench_fft(c: &mut Criterion) {
    let mut group = c.benchmark_group("FFT_Magnitudes");

    // Chunk sizes for 44.1 kHz at 60, 30 and 15 fps
    for size in [735, 1470, 2940] {
        let fft = Fft::new(size);
        let signal = generate_complex_signal(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(fft.magnitudes(black_box(&signal))))
        });
    }

    group.finish();
}

fn bench_chunk(c: &mut Criterion) {
    let analyzer = BandAnalyzer::new(AnalysisConfig::default()).expect("default config is valid");
    let chunk = generate_complex_signal(analyzer.chunk_size());

    c.bench_function("BandAnalyzer_chunk", |b| {
        b.iter(|| black_box(analyzer.analyze_chunk(black_box(&chunk))))
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pipeline_10s");
    group.sample_size(20);

    let config = AnalysisConfig::default();
    let signal = generate_complex_signal(441_000);

    group.bench_function("sequential", |b| {
        b.iter(|| black_box(analyze(black_box(&signal), &config)))
    });
    for workers in [2, 4] {
        group.bench_with_input(BenchmarkId::new("parallel", workers), &workers, |b, &w| {
            b.iter(|| black_box(analyze_parallel(black_box(&signal), &config, w)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fft, bench_chunk, bench_pipeline);
criterion_main!(benches);
