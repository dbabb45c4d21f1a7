//! Error types for the Reverie generation pipeline.
//!
//! Errors are organized by layer: configuration problems halt the process
//! before a run starts, run errors abort the in-progress run and are
//! converted into a `RunOutcome::Failed` at the orchestrator boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Reverie operations.
#[derive(Error, Debug)]
pub enum ReverieError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Run-level pipeline errors
    #[error("Run error: {0}")]
    Run(#[from] RunError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    Validation(String),

    /// The API credential environment variable is not set
    #[error("API token not set. Export {var} or put it in a .env file.")]
    MissingCredential { var: String },
}

/// Errors that abort a single generation run.
///
/// `InvalidPrompt` is user-correctable and surfaced as a warning; the rest
/// are reported as errors. None of these take the process down.
#[derive(Error, Debug)]
pub enum RunError {
    /// The submitted prompt was empty or whitespace-only
    #[error("Prompt is empty — enter a description of the image to generate")]
    InvalidPrompt,

    /// A remote inference call failed
    #[error(transparent)]
    Inference(#[from] InferenceError),

    /// Persisting an image to disk failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Slideshow assembly failed
    #[error(transparent)]
    Slideshow(#[from] SlideshowError),
}

impl RunError {
    /// Whether this failure is a user-correctable warning rather than an error.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::InvalidPrompt)
    }
}

/// Failures surfaced by the remote text-to-image endpoint.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// The request exceeded the per-call timeout
    #[error("Request timed out after {seconds}s — the server took too long to respond")]
    Timeout { seconds: u64 },

    /// The endpoint could not be reached
    #[error("Network error: {0}")]
    Connection(String),

    /// The endpoint returned a non-OK status with an error payload
    #[error("API error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The response body could not be decoded as an image
    #[error("Failed to decode image payload: {0}")]
    Decode(String),
}

/// Failures writing artifacts to the output directory.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Creating the output directory failed
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing an image file failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Failures assembling the slideshow video.
#[derive(Error, Debug)]
pub enum SlideshowError {
    /// ffmpeg is not installed or not on PATH
    #[error("ffmpeg not found in PATH — install it to enable slideshow output")]
    FfmpegNotFound,

    /// Source images do not share one pixel size
    #[error(
        "Image {index} is {found_width}x{found_height} but the slideshow canvas \
         is {expected_width}x{expected_height} — all images must match"
    )]
    DimensionMismatch {
        index: usize,
        expected_width: u32,
        expected_height: u32,
        found_width: u32,
        found_height: u32,
    },

    /// The encoder process exited with a failure status
    #[error("ffmpeg exited with status {code:?}: {message}")]
    Encoder { message: String, code: Option<i32> },

    /// I/O toward the encoder process failed
    #[error("Encoder I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Reverie results.
pub type Result<T> = std::result::Result<T, ReverieError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_prompt_is_warning() {
        assert!(RunError::InvalidPrompt.is_warning());
        let err = RunError::Inference(InferenceError::Timeout { seconds: 30 });
        assert!(!err.is_warning());
    }

    #[test]
    fn test_server_error_message() {
        let err = InferenceError::Server {
            status: 503,
            message: "Model is loading".to_string(),
        };
        assert_eq!(err.to_string(), "API error (503): Model is loading");
    }

    #[test]
    fn test_dimension_mismatch_names_both_sizes() {
        let err = SlideshowError::DimensionMismatch {
            index: 2,
            expected_width: 1024,
            expected_height: 1024,
            found_width: 512,
            found_height: 512,
        };
        let msg = err.to_string();
        assert!(msg.contains("512x512"));
        assert!(msg.contains("1024x1024"));
    }
}
