//! Configuration management for Reverie.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults; every value can also be left to its default so the tool works
//! with nothing but the API token exported.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Reverie.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Inference endpoint settings
    pub inference: InferenceConfig,

    /// Output directory settings
    pub output: OutputConfig,

    /// Slideshow assembly settings
    pub slideshow: SlideshowConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.reverie.reverie/config.toml
    /// - Linux: ~/.config/reverie/config.toml
    ///
    /// Falls back to ~/.reverie/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "reverie", "reverie")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".reverie").join("config.toml")
            })
    }

    /// Get the resolved output directory path (with ~ expansion).
    pub fn output_dir(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.output.dir);
        PathBuf::from(expanded.into_owned())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Validation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.inference.timeout_secs, 30);
        assert_eq!(config.slideshow.fps, 10);
        assert_eq!(config.slideshow.seconds_per_image, 5);
        assert_eq!(config.output.dir, "generated_images");
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[inference]"));
        assert!(toml.contains("[slideshow]"));
    }

    #[test]
    fn test_load_from_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[slideshow]\nfps = 24\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.slideshow.fps, 24);
        // Untouched sections keep their defaults
        assert_eq!(config.inference.timeout_secs, 30);
    }

    #[test]
    fn test_load_from_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[slideshow\nfps = ").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
