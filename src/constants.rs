//! Constants used throughout the application

/// Default moving average window size (frames)
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Default sensitivity `k` in `threshold = mean + k * std`
pub const DEFAULT_SENSITIVITY: f64 = 0.3;

/// Seconds per minute
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Minimum number of peaks needed to form one interval
pub const MIN_PEAKS_FOR_RATE: usize = 2;

/// Heart rate reported when no estimate is possible
pub const FALLBACK_HEART_RATE: f64 = 0.0;

/// Default listen address of the HTTP service
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";

/// Default multipart field carrying the uploaded video
pub const DEFAULT_UPLOAD_FIELD: &str = "video";

/// Default maximum request body size (100 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;
