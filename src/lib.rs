//! Heart rate estimation from fingertip video using remote photoplethysmography.
//!
//! This library provides:
//! - `OpenCV` video decoding into a per-frame brightness sequence
//! - A moving average filter with valid-convolution semantics
//! - Adaptive-threshold peak detection
//! - Heart rate estimation from peak spacing
//! - An HTTP service accepting video uploads
//!
//! The estimation pipeline consists of:
//! 1. Decode every frame and take its mean grayscale brightness
//! 2. Smooth the sequence with a moving average (window 5 by default)
//! 3. Threshold at `mean + 0.3 * std` of the smoothed signal
//! 4. Find strict local maxima above the threshold
//! 5. Convert the spacing between peaks into a rate
//!
//! # Examples
//!
//! ## Processing a Signal
//!
//! ```
//! use heart_rate_estimation::pipeline::PulsePipeline;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Brightness oscillating with a 10 frame period, crests on whole frames
//! let intensities: Vec<f64> = (0..30_u32)
//!     .map(|n| 100.0 + 10.0 * (2.0 * std::f64::consts::PI * f64::from(n) / 10.0).cos())
//!     .collect();
//!
//! let estimate = PulsePipeline::default().process(&intensities, 30.0)?;
//! assert_eq!(estimate.peaks, vec![8, 18]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Processing a Video File
//!
//! ```no_run
//! use heart_rate_estimation::{pipeline::PulsePipeline, video::analyze_video};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let estimate = analyze_video("fingertip.mp4", &PulsePipeline::default(), None)?;
//! println!("Heart rate: {:.2} ({} peaks)", estimate.heart_rate, estimate.peaks.len());
//! # Ok(())
//! # }
//! ```

/// Error types and result handling
pub mod error;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

/// Signal filtering algorithms for smoothing intensity sequences
pub mod filters;

/// Summary statistics over a signal
pub mod statistics;

/// Peak detection and adaptive thresholding
pub mod peak_detection;

/// Heart rate estimation from peak spacing
pub mod heart_rate;

/// End-to-end signal pipeline
pub mod pipeline;

/// Video decoding into brightness sequences
pub mod video;

/// HTTP service
pub mod server;

pub use error::{Error, Result};
