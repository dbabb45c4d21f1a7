//! Core data types for the Reverie generation pipeline.

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One user submission: a base prompt plus how many images to generate.
///
/// Immutable once constructed; a fresh `Job` is built for every submission
/// and discarded when the run completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// The user's prompt, trimmed
    pub base_prompt: String,

    /// Number of images to generate, in 1..=10 (validated by the caller)
    pub count: usize,
}

impl Job {
    /// Create a job from a raw prompt and a pre-validated count.
    ///
    /// The prompt is stored trimmed; emptiness is checked by the
    /// orchestrator's validating stage, not here.
    pub fn new(prompt: &str, count: usize) -> Self {
        Self {
            base_prompt: prompt.trim().to_string(),
            count,
        }
    }
}

/// A prompt derived from the base prompt by appending one style modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptVariant {
    /// Full prompt text sent to the inference endpoint
    pub text: String,

    /// The style modifier this variant carries (e.g., "alternate angle")
    pub label: String,
}

/// A successfully generated image, held in memory until the run completes.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// Decoded raster data
    pub image: DynamicImage,

    /// The variant that produced it
    pub variant: PromptVariant,

    /// Zero-based position within the run
    pub index: usize,
}

/// The kind of file an artifact points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Image,
    Video,
}

/// An output file produced by a run, in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Path under the output directory
    pub path: PathBuf,

    /// Whether this is a still image or the assembled slideshow
    pub kind: ArtifactKind,
}

impl Artifact {
    pub fn image(path: PathBuf) -> Self {
        Self {
            path,
            kind: ArtifactKind::Image,
        }
    }

    pub fn video(path: PathBuf) -> Self {
        Self {
            path,
            kind: ArtifactKind::Video,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_trims_prompt() {
        let job = Job::new("  a red fox  ", 3);
        assert_eq!(job.base_prompt, "a red fox");
        assert_eq!(job.count, 3);
    }

    #[test]
    fn test_artifact_kind_serde() {
        let artifact = Artifact::video(PathBuf::from("out/animation_ab12cd34.mp4"));
        let json = serde_json::to_string(&artifact).unwrap();
        assert!(json.contains("\"kind\":\"video\""));
        let parsed: Artifact = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.kind, ArtifactKind::Video);
    }
}
