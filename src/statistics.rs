//! Summary statistics over a complete signal.

/// Statistical summary of a signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// Mean value of the data
    pub mean: f64,
    /// Population standard deviation of the data
    pub std_dev: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Range (max - min) of the data
    pub range: f64,
}

impl Statistics {
    /// Summarize `data`, or `None` if it is empty
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_samples(data: &[f64]) -> Option<Self> {
        if data.is_empty() {
            return None;
        }

        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;

        // Population variance (divide by N)
        let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();

        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            mean,
            std_dev,
            min,
            max,
            range: max - min,
        })
    }
}
