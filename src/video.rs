//! Video decoding: turns a recording into a per-frame brightness sequence.
//!
//! The capture handle is drained to completion before any signal processing
//! starts, so the pipeline only ever sees a fully materialized sequence.

use crate::{
    pipeline::{HeartRateEstimate, PulsePipeline},
    Error, Result,
};
use log::{debug, info};
use opencv::{
    core::{self, Mat},
    imgproc,
    prelude::*,
    videoio::{self, VideoCapture, CAP_PROP_FPS},
};
use std::path::Path;

/// Brightness samples decoded from one video
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityRecording {
    /// Mean grayscale brightness of each frame
    pub intensities: Vec<f64>,
    /// Frame rate reported by the container
    pub frame_rate: f64,
}

/// Decode `path` and compute the mean grayscale brightness of every frame
///
/// Decoding stops early once `max_frames` frames have been read.
///
/// # Errors
///
/// Returns `VideoError` if the file cannot be opened or reports no usable
/// frame rate, and `OpenCV` errors raised while decoding.
pub fn extract_intensities<P: AsRef<Path>>(path: P, max_frames: Option<usize>) -> Result<IntensityRecording> {
    let path = path.as_ref();
    let path_str = path
        .to_str()
        .ok_or_else(|| Error::VideoError(format!("Path is not valid UTF-8: {}", path.display())))?;

    debug!("Opening video file: {}", path.display());
    let mut capture = VideoCapture::from_file(path_str, videoio::CAP_ANY)?;
    if !capture.is_opened()? {
        return Err(Error::VideoError(format!("Could not open video: {}", path.display())));
    }

    let frame_rate = capture.get(CAP_PROP_FPS)?;
    if !frame_rate.is_finite() || frame_rate <= 0.0 {
        capture.release()?;
        return Err(Error::VideoError(format!("Video reports invalid frame rate {frame_rate}")));
    }

    let mut intensities = Vec::new();
    let mut frame = Mat::default();
    while capture.read(&mut frame)? {
        if frame.empty() {
            break;
        }
        intensities.push(frame_brightness(&frame)?);

        if max_frames.is_some_and(|limit| intensities.len() >= limit) {
            debug!("Frame limit of {} reached", intensities.len());
            break;
        }
    }
    capture.release()?;

    info!(
        "Decoded {} frames at {:.2} fps from {}",
        intensities.len(),
        frame_rate,
        path.display()
    );

    Ok(IntensityRecording {
        intensities,
        frame_rate,
    })
}

/// Mean grayscale brightness of a single frame
///
/// Color frames are assumed to be BGR or BGRA, as delivered by `OpenCV`.
///
/// # Errors
///
/// Returns `InvalidInput` for unsupported channel counts.
pub fn frame_brightness(frame: &Mat) -> Result<f64> {
    let code = match frame.channels() {
        1 => return Ok(core::mean(frame, &Mat::default())?[0]),
        3 => imgproc::COLOR_BGR2GRAY,
        4 => imgproc::COLOR_BGRA2GRAY,
        channels => {
            return Err(Error::InvalidInput(format!(
                "Unsupported frame channel count: {channels}"
            )))
        }
    };

    let mut gray = Mat::default();
    imgproc::cvt_color(frame, &mut gray, code, 0)?;
    Ok(core::mean(&gray, &Mat::default())?[0])
}

/// Decode `path` and run `pipeline` on the resulting sequence
///
/// # Errors
///
/// Propagates decoding and pipeline errors.
pub fn analyze_video<P: AsRef<Path>>(
    path: P,
    pipeline: &PulsePipeline,
    max_frames: Option<usize>,
) -> Result<HeartRateEstimate> {
    let recording = extract_intensities(path, max_frames)?;
    pipeline.process(&recording.intensities, recording.frame_rate)
}
