//! Heart rate estimation from peak spacing.
//!
//! Each pair of consecutive peaks yields one per-interval rate; the estimate
//! is the arithmetic mean of those rates (mean-of-rates, not rate-of-means).

use crate::{
    constants::{FALLBACK_HEART_RATE, MIN_PEAKS_FOR_RATE, SECONDS_PER_MINUTE},
    Error, Result,
};
use serde::{Deserialize, Serialize};

/// How a single inter-peak interval is turned into a rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateFormula {
    /// `interval_frames / frame_rate * 60`
    #[default]
    ScaledInterval,
    /// `60 * frame_rate / interval_frames`, beats per minute
    Frequency,
}

impl std::str::FromStr for RateFormula {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "scaled_interval" | "scaledinterval" => Ok(Self::ScaledInterval),
            "frequency" | "bpm" => Ok(Self::Frequency),
            _ => Err(Error::ConfigError(format!("Unknown rate formula: {s}"))),
        }
    }
}

/// Converts peak indices into a heart rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeartRateEstimator {
    formula: RateFormula,
}

impl HeartRateEstimator {
    /// Create an estimator using `formula`
    #[must_use]
    pub fn new(formula: RateFormula) -> Self {
        Self { formula }
    }

    /// Formula in use
    #[must_use]
    pub fn formula(&self) -> RateFormula {
        self.formula
    }

    /// Estimate the rate from strictly increasing peak indices
    ///
    /// Fewer than two peaks give `0.0` whatever the frame rate.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the frame rate is not a positive finite
    /// number, the peaks are not strictly increasing, or the rate overflows.
    #[allow(clippy::cast_precision_loss)]
    pub fn estimate(&self, peaks: &[usize], frame_rate: f64) -> Result<f64> {
        if peaks.len() < MIN_PEAKS_FOR_RATE {
            return Ok(FALLBACK_HEART_RATE);
        }
        if !frame_rate.is_finite() || frame_rate <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "Frame rate must be positive and finite, got {frame_rate}"
            )));
        }

        let mut total = 0.0;
        for pair in peaks.windows(2) {
            if pair[1] <= pair[0] {
                return Err(Error::InvalidInput(format!(
                    "Peak indices must be strictly increasing, got {} then {}",
                    pair[0], pair[1]
                )));
            }
            let interval = (pair[1] - pair[0]) as f64;
            total += match self.formula {
                RateFormula::ScaledInterval => interval / frame_rate * SECONDS_PER_MINUTE,
                RateFormula::Frequency => SECONDS_PER_MINUTE * frame_rate / interval,
            };
        }

        let rate = total / (peaks.len() - 1) as f64;
        if !rate.is_finite() {
            return Err(Error::InvalidInput(format!(
                "Heart rate is not finite for frame rate {frame_rate}"
            )));
        }

        Ok(rate)
    }
}

/// Estimate with the default [`RateFormula::ScaledInterval`]
///
/// # Errors
///
/// See [`HeartRateEstimator::estimate`].
pub fn estimate_heart_rate(peaks: &[usize], frame_rate: f64) -> Result<f64> {
    HeartRateEstimator::default().estimate(peaks, frame_rate)
}
