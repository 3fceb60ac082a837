//! Configuration management for the heart rate estimation service

use crate::{
    constants::{
        DEFAULT_BIND_ADDRESS, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_SENSITIVITY, DEFAULT_UPLOAD_FIELD,
        DEFAULT_WINDOW_SIZE,
    },
    heart_rate::RateFormula,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Signal pipeline configuration
    pub pipeline: PipelineConfig,

    /// HTTP service configuration
    pub server: ServerConfig,

    /// Video decoding configuration
    pub video: VideoConfig,
}

/// Signal pipeline parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Moving average window size (frames)
    pub window_size: usize,

    /// Sensitivity `k` of the adaptive threshold `mean + k * std`
    pub sensitivity: f64,

    /// Interval-to-rate conversion
    pub rate_formula: RateFormula,
}

/// HTTP service parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_address: String,

    /// Multipart field carrying the video file
    pub upload_field: String,

    /// Maximum accepted request body size in bytes
    pub max_upload_bytes: usize,
}

/// Video decoding parameters
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Stop decoding after this many frames
    pub max_frames: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            sensitivity: DEFAULT_SENSITIVITY,
            rate_formula: RateFormula::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            upload_field: DEFAULT_UPLOAD_FIELD.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the text is not a valid configuration.
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.window_size == 0 {
            return Err(Error::ConfigError(
                "Moving average window size must be greater than 0".to_string(),
            ));
        }
        if !self.pipeline.sensitivity.is_finite() {
            return Err(Error::ConfigError("Sensitivity must be a finite number".to_string()));
        }

        if self.server.bind_address.parse::<SocketAddr>().is_err() {
            return Err(Error::ConfigError(format!(
                "Invalid bind address: {}",
                self.server.bind_address
            )));
        }
        if self.server.upload_field.is_empty() {
            return Err(Error::ConfigError("Upload field name must not be empty".to_string()));
        }
        if self.server.max_upload_bytes == 0 {
            return Err(Error::ConfigError(
                "Maximum upload size must be greater than 0".to_string(),
            ));
        }

        if self.video.max_frames == Some(0) {
            return Err(Error::ConfigError("Frame limit must be greater than 0".to_string()));
        }

        Ok(())
    }

    /// Socket address to listen on
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the bind address does not parse.
    pub fn bind_address(&self) -> Result<SocketAddr> {
        self.server
            .bind_address
            .parse()
            .map_err(|e| Error::ConfigError(format!("Invalid bind address {}: {e}", self.server.bind_address)))
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Heart Rate Estimation Configuration

# Signal pipeline
pipeline:
  window_size: 5
  sensitivity: 0.3
  # scaled_interval: mean of interval_seconds * 60
  # frequency: mean of 60 / interval_seconds
  rate_formula: scaled_interval

# HTTP service
server:
  bind_address: "0.0.0.0:5000"
  upload_field: "video"
  max_upload_bytes: 104857600

# Video decoding
video:
  max_frames: null
"#;
