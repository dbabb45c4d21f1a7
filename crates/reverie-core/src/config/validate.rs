//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.inference.endpoint.trim().is_empty() {
            return Err(ConfigError::Validation(
                "inference.endpoint must not be empty".into(),
            ));
        }
        if self.inference.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "inference.timeout_secs must be > 0".into(),
            ));
        }
        if self.output.dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output.dir must not be empty".into(),
            ));
        }
        if self.slideshow.fps == 0 {
            return Err(ConfigError::Validation("slideshow.fps must be > 0".into()));
        }
        if self.slideshow.seconds_per_image == 0 {
            return Err(ConfigError::Validation(
                "slideshow.seconds_per_image must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_fps() {
        let mut config = Config::default();
        config.slideshow.fps = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("slideshow.fps"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.inference.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_validate_rejects_empty_endpoint() {
        let mut config = Config::default();
        config.inference.endpoint = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("endpoint"));
    }
}
