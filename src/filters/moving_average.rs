use crate::{constants::DEFAULT_WINDOW_SIZE, Error, Result};

/// Moving average filter
///
/// Each output sample is the unweighted mean of `window_size` consecutive
/// input samples. Edges are not padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovingAverageFilter {
    window_size: usize,
}

impl MovingAverageFilter {
    /// Create a filter with the given window
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `window_size` is zero.
    pub fn new(window_size: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(Error::InvalidInput(
                "Window size must be greater than 0".to_string(),
            ));
        }
        Ok(Self { window_size })
    }

    /// Window length in samples
    #[must_use]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Smooth a complete sequence
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn apply(&self, signal: &[f64]) -> Vec<f64> {
        let width = self.window_size as f64;
        signal
            .windows(self.window_size)
            .map(|window| window.iter().sum::<f64>() / width)
            .collect()
    }

    fn name(&self) -> &str {
        "MovingAverageFilter"
    }
}

impl Default for MovingAverageFilter {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl std::fmt::Display for MovingAverageFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name(), self.window_size)
    }
}

/// Smooth `signal` with a moving average of `window_size` samples
///
/// # Errors
///
/// Returns `InvalidInput` if `window_size` is zero.
pub fn moving_average(signal: &[f64], window_size: usize) -> Result<Vec<f64>> {
    Ok(MovingAverageFilter::new(window_size)?.apply(signal))
}

/// Length of the smoothed output for an input of `len` samples
#[must_use]
pub fn smoothed_len(len: usize, window_size: usize) -> usize {
    (len + 1).saturating_sub(window_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_moving_average() {
        let smoothed = moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
        assert_eq!(smoothed, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_window_of_one_is_identity() {
        let signal = [3.5, -1.0, 7.25];
        assert_eq!(moving_average(&signal, 1).unwrap(), signal.to_vec());
    }

    #[test]
    fn test_window_longer_than_signal() {
        assert!(moving_average(&[1.0, 2.0], 3).unwrap().is_empty());
        assert!(moving_average(&[], 5).unwrap().is_empty());
    }

    #[test]
    fn test_window_equal_to_signal() {
        assert_eq!(moving_average(&[2.0, 4.0, 6.0], 3).unwrap(), vec![4.0]);
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(MovingAverageFilter::new(0).is_err());
        assert!(moving_average(&[1.0, 2.0], 0).is_err());
    }

    #[test]
    fn test_display() {
        let filter = MovingAverageFilter::new(5).unwrap();
        assert_eq!(filter.to_string(), "MovingAverageFilter(5)");
    }

    proptest! {
        #[test]
        fn prop_smoothed_length(
            signal in prop::collection::vec(0.0f64..255.0, 0..200),
            window in 1usize..50
        ) {
            let smoothed = moving_average(&signal, window).unwrap();
            let expected = if window > signal.len() { 0 } else { signal.len() - window + 1 };
            prop_assert_eq!(smoothed.len(), expected);
            prop_assert_eq!(smoothed_len(signal.len(), window), expected);
        }

        #[test]
        fn prop_smoothed_within_input_range(
            signal in prop::collection::vec(0.0f64..255.0, 1..200),
            window in 1usize..20
        ) {
            let min = signal.iter().copied().fold(f64::INFINITY, f64::min);
            let max = signal.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            for value in moving_average(&signal, window).unwrap() {
                prop_assert!(value >= min - 1e-9 && value <= max + 1e-9);
            }
        }
    }
}
