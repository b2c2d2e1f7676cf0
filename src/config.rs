// SPDX-License-Identifier: GPL-3.0-only

use crate::backends::camera::types::FacingMode;
use crate::constants::{acquisition, encoding, exposures, timing};
use crate::errors::{AppError, AppResult};
use crate::pipelines::photo::FilterType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Session configuration
///
/// Every field has a default, so a partial JSON file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Exposures on a fresh roll (and the ceiling restored by deletes)
    pub max_exposures: u32,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
    /// Flash overlay duration in milliseconds
    pub flash_duration_ms: u64,
    /// Capturing-state duration in milliseconds
    pub capturing_duration_ms: u64,
    /// Ideal edge of the square acquisition target
    pub ideal_resolution: u32,
    /// Camera used when the session starts
    pub default_facing: FacingMode,
    /// Filter selected when the session starts
    pub default_filter: FilterType,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_exposures: exposures::MAX_EXPOSURES,
            jpeg_quality: encoding::JPEG_QUALITY,
            flash_duration_ms: timing::FLASH_DURATION_MS,
            capturing_duration_ms: timing::CAPTURING_DURATION_MS,
            ideal_resolution: acquisition::IDEAL_RESOLUTION,
            default_facing: FacingMode::default(),
            default_filter: FilterType::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(AppError::Config(format!(
                    "Failed to read '{}': {}",
                    path.display(),
                    e
                )));
            }
        };

        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Reject values the pipeline cannot honor
    pub fn validate(&self) -> AppResult<()> {
        if !(1..=exposures::MAX_EXPOSURES).contains(&self.max_exposures) {
            return Err(AppError::Config(format!(
                "max_exposures must be within 1-{}, got {}",
                exposures::MAX_EXPOSURES,
                self.max_exposures
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(AppError::Config(format!(
                "jpeg_quality must be within 1-100, got {}",
                self.jpeg_quality
            )));
        }
        if self.ideal_resolution == 0 {
            return Err(AppError::Config("ideal_resolution must be non-zero".into()));
        }
        Ok(())
    }

    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_duration_ms)
    }

    pub fn capturing_duration(&self) -> Duration {
        Duration::from_millis(self.capturing_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{ "jpeg_quality": 75 }"#).unwrap();
        assert_eq!(config.jpeg_quality, 75);
        assert_eq!(config.max_exposures, 24);
        assert_eq!(config.flash_duration_ms, 150);
    }

    #[test]
    fn test_validate_rejects_zero_quality() {
        let config = Config {
            jpeg_quality: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_roll_above_cap() {
        let config = Config {
            max_exposures: 30,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let full = Config {
            max_exposures: 24,
            ..Config::default()
        };
        assert!(full.validate().is_ok());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_reads_facing_and_filter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("retrocam.json");
        std::fs::write(&path, r#"{ "default_facing": "front", "default_filter": "noir" }"#)
            .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.default_facing, FacingMode::Front);
        assert_eq!(config.default_filter, FilterType::Noir);
    }
}
