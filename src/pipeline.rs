//! Pipeline orchestration: smoothing, adaptive thresholding, peak detection
//! and heart rate estimation over one complete intensity sequence.
//!
//! Every run is stateless. The same input always yields the same output.

use crate::{
    config::PipelineConfig,
    constants::{DEFAULT_SENSITIVITY, FALLBACK_HEART_RATE, MIN_PEAKS_FOR_RATE},
    filters::MovingAverageFilter,
    heart_rate::{HeartRateEstimator, RateFormula},
    peak_detection::{adaptive_threshold, detect_peaks},
    Error, Result,
};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};

/// Result record handed back to the caller
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeartRateEstimate {
    /// Estimated heart rate, `0.0` when fewer than two peaks were found
    pub heart_rate: f64,
    /// Peak indices into the smoothed signal
    pub peaks: Vec<usize>,
}

impl HeartRateEstimate {
    /// Record returned when processing fails
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            heart_rate: FALLBACK_HEART_RATE,
            peaks: Vec::new(),
        }
    }

    /// Whether enough peaks were found to estimate a rate
    #[must_use]
    pub fn is_detected(&self) -> bool {
        self.peaks.len() >= MIN_PEAKS_FOR_RATE
    }
}

/// Intermediate products of one pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct SignalAnalysis {
    /// Moving-average output
    pub smoothed: Vec<f64>,
    /// Adaptive threshold, `None` if the smoothed signal is empty
    pub threshold: Option<f64>,
    /// Peak indices into `smoothed`
    pub peaks: Vec<usize>,
    /// Estimated heart rate
    pub heart_rate: f64,
}

impl From<SignalAnalysis> for HeartRateEstimate {
    fn from(analysis: SignalAnalysis) -> Self {
        Self {
            heart_rate: analysis.heart_rate,
            peaks: analysis.peaks,
        }
    }
}

/// Stateless heart rate pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulsePipeline {
    filter: MovingAverageFilter,
    sensitivity: f64,
    estimator: HeartRateEstimator,
}

impl PulsePipeline {
    /// Create a pipeline with the given window size and threshold sensitivity
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a zero window or a non-finite sensitivity.
    pub fn new(window_size: usize, sensitivity: f64) -> Result<Self> {
        if !sensitivity.is_finite() {
            return Err(Error::InvalidInput(format!(
                "Sensitivity must be finite, got {sensitivity}"
            )));
        }
        Ok(Self {
            filter: MovingAverageFilter::new(window_size)?,
            sensitivity,
            estimator: HeartRateEstimator::default(),
        })
    }

    /// Build a pipeline from configuration
    ///
    /// # Errors
    ///
    /// See [`PulsePipeline::new`].
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        Ok(Self::new(config.window_size, config.sensitivity)?.with_rate_formula(config.rate_formula))
    }

    /// Use `formula` to convert intervals into a rate
    #[must_use]
    pub fn with_rate_formula(mut self, formula: RateFormula) -> Self {
        self.estimator = HeartRateEstimator::new(formula);
        self
    }

    /// Smoothing window size
    #[must_use]
    pub fn window_size(&self) -> usize {
        self.filter.window_size()
    }

    /// Threshold sensitivity
    #[must_use]
    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    /// Run every stage and keep the intermediate signals
    ///
    /// Short or empty inputs are not errors: they produce no peaks and a
    /// `0.0` heart rate.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a sample is not finite or the frame rate is
    /// not positive when a rate has to be computed.
    pub fn analyze(&self, intensities: &[f64], frame_rate: f64) -> Result<SignalAnalysis> {
        if let Some(position) = intensities.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "Intensity sample {position} is not finite"
            )));
        }

        let smoothed = self.filter.apply(intensities);
        let threshold = adaptive_threshold(&smoothed, self.sensitivity);

        let peaks = match threshold {
            Some(threshold) => detect_peaks(&smoothed, threshold),
            None => {
                debug!(
                    "Nothing to detect: {} samples is shorter than the {} sample window",
                    intensities.len(),
                    self.filter.window_size()
                );
                Vec::new()
            }
        };

        let heart_rate = self.estimator.estimate(&peaks, frame_rate)?;
        debug!(
            "Analyzed {} samples with {}: threshold {:?}, {} peaks, heart rate {:.2}",
            intensities.len(),
            self.filter,
            threshold,
            peaks.len(),
            heart_rate
        );

        Ok(SignalAnalysis {
            smoothed,
            threshold,
            peaks,
            heart_rate,
        })
    }

    /// Run the pipeline and return the result record
    ///
    /// # Errors
    ///
    /// See [`PulsePipeline::analyze`].
    pub fn process(&self, intensities: &[f64], frame_rate: f64) -> Result<HeartRateEstimate> {
        self.analyze(intensities, frame_rate).map(HeartRateEstimate::from)
    }
}

impl Default for PulsePipeline {
    fn default() -> Self {
        Self {
            filter: MovingAverageFilter::default(),
            sensitivity: DEFAULT_SENSITIVITY,
            estimator: HeartRateEstimator::default(),
        }
    }
}

/// Collapse any processing failure into the fallback record
///
/// Failures are logged at error level; a run that simply found too few
/// peaks is logged at info level and passed through.
#[must_use]
pub fn degrade_to_fallback(result: Result<HeartRateEstimate>) -> HeartRateEstimate {
    match result {
        Ok(estimate) => {
            if !estimate.is_detected() {
                info!("No heartbeat detected ({} peaks)", estimate.peaks.len());
            }
            estimate
        }
        Err(e) => {
            error!("Error processing signal: {e}");
            HeartRateEstimate::fallback()
        }
    }
}
