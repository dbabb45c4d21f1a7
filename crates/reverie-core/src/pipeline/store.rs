//! Artifact persistence with deterministic, prompt-derived file names.
//!
//! File names embed the first 8 hex characters of a BLAKE3 hash of the
//! base prompt, so re-running the same prompt overwrites its earlier
//! output instead of accumulating files.

use crate::error::StoreError;
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};

/// Length of the hash prefix embedded in file names.
const HASH_PREFIX_LEN: usize = 8;

/// Writes generated images to the output directory and computes the
/// deterministic paths shared with the slideshow assembler.
pub struct ArtifactStore {
    output_dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at `output_dir`, creating the directory
    /// (idempotently) if absent.
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir).map_err(|source| StoreError::CreateDir {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir })
    }

    /// First 8 hex characters of the BLAKE3 hash of the prompt.
    pub fn prompt_hash(base_prompt: &str) -> String {
        blake3::hash(base_prompt.as_bytes()).to_hex()[..HASH_PREFIX_LEN].to_string()
    }

    /// Path for the image at `index` (0-based; file names are 1-based).
    pub fn image_path(&self, base_prompt: &str, index: usize) -> PathBuf {
        let hash = Self::prompt_hash(base_prompt);
        self.output_dir
            .join(format!("image_{hash}_{}.png", index + 1))
    }

    /// Path for the assembled slideshow video.
    pub fn video_path(&self, base_prompt: &str) -> PathBuf {
        let hash = Self::prompt_hash(base_prompt);
        self.output_dir.join(format!("animation_{hash}.mp4"))
    }

    /// Write `image` as lossless PNG and return its path.
    pub fn save(
        &self,
        base_prompt: &str,
        index: usize,
        image: &DynamicImage,
    ) -> Result<PathBuf, StoreError> {
        let path = self.image_path(base_prompt, index);
        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| StoreError::Write {
                path: path.clone(),
                source,
            })?;
        tracing::debug!("Saved {}", path.display());
        Ok(path)
    }

    /// The directory this store writes into.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
