//! Sub-configuration structs with defaults matching the hosted endpoint.

use serde::{Deserialize, Serialize};

/// Remote inference endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Text-to-image model endpoint URL
    pub endpoint: String,

    /// API token (supports ${ENV_VAR} syntax)
    pub api_token: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint:
                "https://api-inference.huggingface.co/models/stabilityai/stable-diffusion-xl-base-1.0"
                    .to_string(),
            api_token: "${HF_API_TOKEN}".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Output directory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory where images and videos are written (supports ~)
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "generated_images".to_string(),
        }
    }
}

/// Slideshow assembly settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideshowConfig {
    /// Whether to assemble a video when a run produces multiple images
    pub enabled: bool,

    /// Output frame rate
    pub fps: u32,

    /// How long each image is held on screen
    pub seconds_per_image: u32,

    /// Delay after the encoder finalizes, before the file is read back.
    /// Guards against filesystem write-visibility races.
    pub settle_ms: u64,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            fps: 10,
            seconds_per_image: 5,
            settle_ms: 1000,
        }
    }
}

impl SlideshowConfig {
    /// Number of identical frames each source image contributes.
    pub fn frames_per_image(&self) -> u32 {
        self.fps * self.seconds_per_image
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_per_image_default() {
        let config = SlideshowConfig::default();
        assert_eq!(config.frames_per_image(), 50);
    }

    #[test]
    fn test_inference_defaults_use_env_token() {
        let config = InferenceConfig::default();
        assert_eq!(config.api_token, "${HF_API_TOKEN}");
        assert!(config.endpoint.starts_with("https://"));
    }
}
