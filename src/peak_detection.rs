//! Peak detection on smoothed intensity signals.
//!
//! A peak is a strict local maximum that also lies strictly above a
//! threshold. Endpoints are never candidates and plateaus never qualify.

use crate::statistics::Statistics;

/// Indices of strict local maxima above `threshold`, in ascending order
///
/// Candidates are `1..len - 1`; signals shorter than three samples have no
/// peaks.
#[must_use]
pub fn detect_peaks(signal: &[f64], threshold: f64) -> Vec<usize> {
    signal
        .windows(3)
        .enumerate()
        .filter_map(|(i, w)| {
            let (prev, value, next) = (w[0], w[1], w[2]);
            (value > prev && value > next && value > threshold).then_some(i + 1)
        })
        .collect()
}

/// Threshold derived from the signal itself: `mean + sensitivity * std`
///
/// Uses the population standard deviation. Returns `None` for an empty signal.
#[must_use]
pub fn adaptive_threshold(signal: &[f64], sensitivity: f64) -> Option<f64> {
    Statistics::from_samples(signal).map(|stats| stats.mean + sensitivity * stats.std_dev)
}
