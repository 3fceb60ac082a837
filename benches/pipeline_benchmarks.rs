//! Benchmarks for signal pipeline performance

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use heart_rate_estimation::{
    filters::MovingAverageFilter,
    heart_rate::estimate_heart_rate,
    peak_detection::{adaptive_threshold, detect_peaks},
    pipeline::PulsePipeline,
};

/// Noisy brightness trace at 30 fps with a 72 bpm pulse
fn test_signal(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let t = i as f64 / 30.0;
            let pulse = 5.0 * (2.0 * std::f64::consts::PI * 1.2 * t).sin();
            140.0 + pulse + 0.5 * rand::random::<f64>()
        })
        .collect()
}

fn benchmark_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("moving_average");
    let signal = test_signal(1800);

    for window_size in [3, 5, 9, 15] {
        let filter = MovingAverageFilter::new(window_size).unwrap();
        group.bench_with_input(BenchmarkId::new("window_size", window_size), &signal, |b, data| {
            b.iter(|| black_box(filter.apply(black_box(data))));
        });
    }

    group.finish();
}

fn benchmark_peak_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("peak_detection");
    let smoothed = MovingAverageFilter::new(5).unwrap().apply(&test_signal(1800));
    let threshold = adaptive_threshold(&smoothed, 0.3).unwrap();

    group.bench_function("adaptive_threshold", |b| {
        b.iter(|| black_box(adaptive_threshold(black_box(&smoothed), 0.3)));
    });
    group.bench_function("detect_peaks", |b| {
        b.iter(|| black_box(detect_peaks(black_box(&smoothed), black_box(threshold))));
    });

    let peaks = detect_peaks(&smoothed, threshold);
    group.bench_function("estimate_heart_rate", |b| {
        b.iter(|| black_box(estimate_heart_rate(black_box(&peaks), 30.0)));
    });

    group.finish();
}

fn benchmark_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let pipeline = PulsePipeline::default();

    // 10 s, 1 min and 5 min recordings at 30 fps
    for len in [300, 1800, 9000] {
        let signal = test_signal(len);
        group.bench_with_input(BenchmarkId::new("process", len), &signal, |b, data| {
            b.iter(|| black_box(pipeline.process(black_box(data), 30.0)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_smoothing, benchmark_peak_detection, benchmark_pipeline);
criterion_main!(benches);
