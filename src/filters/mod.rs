//! Signal filtering algorithms for smoothing intensity sequences.
//!
//! Filters operate on a complete, bounded sequence and use valid-convolution
//! semantics: only output positions whose window fully overlaps the input are
//! produced, so the output is shorter than the input.

/// Moving average filter for simple smoothing
pub mod moving_average;

pub use moving_average::{moving_average, smoothed_len, MovingAverageFilter};
