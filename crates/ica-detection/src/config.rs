//! Detection configuration

use ica_core::{IcaError, IcaResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default target sensor label
pub const DEFAULT_TARGET_LABEL: &str = "E55";

/// Default z-score threshold for the excessive flag
pub const DEFAULT_THRESHOLD: f32 = 5.0;

/// Configuration for one detection invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Label of the sensor whose weights are scored
    pub target_label: String,
    /// Minimum z-score to classify a component as excessive
    pub threshold: f32,
    /// Directory the rendering collaborator writes figures into
    pub output_dir: PathBuf,
}

impl DetectionConfig {
    /// Configuration targeting an arbitrary sensor with the default threshold
    pub fn for_sensor(label: impl Into<String>) -> Self {
        DetectionConfig {
            target_label: label.into(),
            threshold: DEFAULT_THRESHOLD,
            output_dir: PathBuf::from("."),
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> IcaResult<()> {
        if self.target_label.is_empty() {
            return Err(IcaError::ConfigurationError {
                message: "target sensor label must not be empty".to_string(),
            });
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(IcaError::ConfigurationError {
                message: format!("threshold must be finite and positive, got {}", self.threshold),
            });
        }
        Ok(())
    }

    /// Export configuration to JSON
    pub fn to_json(&self) -> IcaResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| IcaError::ConfigurationError {
            message: format!("Failed to serialize configuration: {}", e),
        })
    }

    /// Import configuration from JSON
    pub fn from_json(json: &str) -> IcaResult<Self> {
        let config: DetectionConfig =
            serde_json::from_str(json).map_err(|e| IcaError::ConfigurationError {
                message: format!("Failed to deserialize configuration: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self::for_sensor(DEFAULT_TARGET_LABEL)
    }
}
