//! Configuration for spam-rs

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::level_filters::LevelFilter;

use crate::error::{Result, SpamError};

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub preprocess: PreprocessConfig,
    pub training: TrainingConfig,
    pub logging: LoggingConfig,
}

/// Dataset ingestion settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// CSV file with a label column followed by the email text
    pub path: Option<String>,
    /// First row is a header
    pub has_headers: bool,
    /// Raw label value that marks spam; anything else is ham
    pub spam_marker: String,
    /// Drop the header block of each email and keep the body
    pub extract_body: bool,
}

/// Text cleaning settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Stop-word file, one word per line (built-in list when absent)
    pub stopwords_path: Option<String>,
}

/// Training settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Fraction of each label kept for training, in (0, 1]
    pub train_ratio: f64,
    /// Additive smoothing constant
    pub smoothing: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: None,
            has_headers: true,
            spam_marker: "1".to_string(),
            extract_body: true,
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            train_ratio: 0.8,
            smoothing: crate::classifier::DEFAULT_SMOOTHING,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SpamError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| SpamError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.training.validate()?;

        if self.dataset.spam_marker.trim().is_empty() {
            return Err(SpamError::Config("spam_marker must not be empty".to_string()));
        }

        if self.logging.level.parse::<LevelFilter>().is_err() {
            return Err(SpamError::Config(format!(
                "Unknown log level '{}', expected trace, debug, info, warn, error or off",
                self.logging.level
            )));
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(SpamError::Config(format!(
                "Unknown log format '{}', expected 'pretty' or 'json'",
                other
            ))),
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.train_ratio.is_finite() || self.train_ratio <= 0.0 || self.train_ratio > 1.0 {
            return Err(SpamError::Config(format!(
                "train_ratio must be in (0, 1], got {}",
                self.train_ratio
            )));
        }
        if !self.smoothing.is_finite() || self.smoothing <= 0.0 {
            return Err(SpamError::Config(format!(
                "smoothing must be positive, got {}",
                self.smoothing
            )));
        }
        Ok(())
    }
}
