//! End-to-end tests for the signal pipeline


use heart_rate_estimation::{
    filters::moving_average,
    heart_rate::{estimate_heart_rate, RateFormula},
    peak_detection::detect_peaks,
    pipeline::{HeartRateEstimate, PulsePipeline},
};
use test_helpers::{assert_close, cosine_signal, noisy_cosine_signal, sine_signal};

#[test]
fn test_documented_examples() {
    assert_eq!(moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap(), vec![2.0, 3.0, 4.0]);
    assert_eq!(detect_peaks(&[0.0, 1.0, 0.0, 1.0, 0.0, 2.0, 0.0], 0.5), vec![1, 3, 5]);
    assert_eq!(estimate_heart_rate(&[], 30.0).unwrap(), 0.0);
    assert_eq!(estimate_heart_rate(&[5], 30.0).unwrap(), 0.0);
    assert_close(estimate_heart_rate(&[10, 20, 30], 30.0).unwrap(), 20.0, 1e-9);
}

#[test]
fn test_sine_phase_smooths_into_plateaus() {
    // A 5 sample window centres each smoothed sample on n + 2. With sine
    // phase the crests fall at n = 2.5, 12.5, 22.5, so the two samples either
    // side of each crest are equal and no strict maximum exists.
    let intensities = sine_signal(30, 10.0, 100.0, 10.0);
    let analysis = PulsePipeline::default().analyze(&intensities, 30.0).unwrap();

    assert_eq!(analysis.smoothed.len(), 26);
    for crest in [0, 10, 20] {
        assert_close(analysis.smoothed[crest], analysis.smoothed[crest + 1], 1e-9);
    }
    assert!(analysis.peaks.is_empty());
    assert_eq!(HeartRateEstimate::from(analysis), HeartRateEstimate::fallback());
}

#[test]
fn test_periodic_signal_end_to_end() {
    // 30 samples, period 10 frames, recorded at 30 fps. Cosine phase puts
    // the crests on whole samples (n = 10, 20) so they survive smoothing.
    let intensities = cosine_signal(30, 10.0, 100.0, 10.0);
    let pipeline = PulsePipeline::default();

    let analysis = pipeline.analyze(&intensities, 30.0).unwrap();
    assert_eq!(analysis.smoothed.len(), 26);
    assert_eq!(analysis.peaks, vec![8, 18]);
    assert!(analysis.threshold.is_some());

    // 10 frames / 30 fps * 60
    assert_close(analysis.heart_rate, 20.0, 1e-9);
}

#[test]
fn test_periodic_signal_in_beats_per_minute() {
    let intensities = cosine_signal(30, 10.0, 100.0, 10.0);
    let pipeline = PulsePipeline::default().with_rate_formula(RateFormula::Frequency);

    let estimate = pipeline.process(&intensities, 30.0).unwrap();
    assert_eq!(estimate.peaks.len(), 2);
    assert_close(estimate.heart_rate, 180.0, 1e-6);
}

#[test]
fn test_longer_recording_peak_spacing() {
    // 10 seconds at 30 fps, 72 bpm is a 25 frame period
    let intensities = cosine_signal(300, 25.0, 140.0, 5.0);
    let estimate = PulsePipeline::default()
        .with_rate_formula(RateFormula::Frequency)
        .process(&intensities, 30.0)
        .unwrap();

    assert!(estimate.peaks.len() >= 10);
    for pair in estimate.peaks.windows(2) {
        assert!((24..=26).contains(&(pair[1] - pair[0])));
    }
    assert_close(estimate.heart_rate, 72.0, 3.0);
}

#[test]
fn test_noise_is_smoothed_out() {
    let intensities = noisy_cosine_signal(300, 25.0, 0.5, 42);
    let estimate = PulsePipeline::default()
        .with_rate_formula(RateFormula::Frequency)
        .process(&intensities, 30.0)
        .unwrap();

    assert!(estimate.is_detected());
    assert_close(estimate.heart_rate, 72.0, 10.0);
}

#[test]
fn test_pipeline_is_deterministic() {
    let intensities = noisy_cosine_signal(120, 12.0, 2.0, 7);
    let pipeline = PulsePipeline::default();

    let first = pipeline.process(&intensities, 29.97).unwrap();
    let second = pipeline.process(&intensities, 29.97).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.heart_rate.to_bits(), second.heart_rate.to_bits());
}

#[test]
fn test_flat_signal_has_no_heartbeat() {
    let estimate = PulsePipeline::default().process(&[128.0; 90], 30.0).unwrap();
    assert_eq!(estimate, HeartRateEstimate::fallback());
}

#[test]
fn test_peaks_index_smoothed_signal() {
    let intensities = noisy_cosine_signal(200, 15.0, 1.0, 3);
    let pipeline = PulsePipeline::default();
    let analysis = pipeline.analyze(&intensities, 30.0).unwrap();

    assert_eq!(analysis.smoothed.len(), intensities.len() - pipeline.window_size() + 1);
    for &i in &analysis.peaks {
        assert!(i > 0 && i < analysis.smoothed.len() - 1);
    }
    assert_eq!(HeartRateEstimate::from(analysis.clone()).peaks, analysis.peaks);
}

#[test]
fn test_higher_sensitivity_finds_no_more_peaks() {
    let intensities = noisy_cosine_signal(200, 15.0, 3.0, 11);
    let relaxed = PulsePipeline::new(5, 0.0).unwrap().process(&intensities, 30.0).unwrap();
    let strict = PulsePipeline::new(5, 1.0).unwrap().process(&intensities, 30.0).unwrap();

    assert!(strict.peaks.len() <= relaxed.peaks.len());
    assert!(strict.peaks.iter().all(|p| relaxed.peaks.contains(p)));
}
