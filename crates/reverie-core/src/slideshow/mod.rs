//! Slideshow assembly: still images into a fixed-rate MP4.
//!
//! Each source image is held on screen for a fixed duration by repeating
//! its frame; the canvas size is taken from the first image and every
//! other image must match it exactly.

pub(crate) mod encoder;

pub use encoder::{check_ffmpeg, EncodeConfig, FrameEncoder};

use crate::config::SlideshowConfig;
use crate::error::SlideshowError;
use crate::types::GeneratedImage;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Assembles an ordered image sequence into a slideshow video.
pub struct SlideshowAssembler {
    config: SlideshowConfig,
}

impl SlideshowAssembler {
    /// Create an assembler with the given configuration.
    pub fn new(config: SlideshowConfig) -> Self {
        Self { config }
    }

    /// Whether slideshow assembly is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Total frames the video will contain for `image_count` images.
    pub fn total_frames(&self, image_count: usize) -> u64 {
        image_count as u64 * u64::from(self.config.frames_per_image())
    }

    /// Encode `images` into an MP4 at `output`, in sequence order.
    ///
    /// Callers only invoke this with more than one image. The canvas size
    /// comes from the first image; a mismatched image is rejected before
    /// the encoder process is spawned, so no partial file is created for
    /// invalid input. On encoder failure the partial file is removed.
    pub async fn assemble(
        &self,
        images: &[GeneratedImage],
        output: &Path,
    ) -> Result<PathBuf, SlideshowError> {
        debug_assert!(images.len() > 1);

        let (width, height) = (images[0].image.width(), images[0].image.height());
        for generated in images {
            let (w, h) = (generated.image.width(), generated.image.height());
            if (w, h) != (width, height) {
                return Err(SlideshowError::DimensionMismatch {
                    index: generated.index,
                    expected_width: width,
                    expected_height: height,
                    found_width: w,
                    found_height: h,
                });
            }
        }

        let frames_per_image = self.config.frames_per_image();
        tracing::info!(
            "Assembling {} images into {} ({} frames at {} fps)",
            images.len(),
            output.display(),
            self.total_frames(images.len()),
            self.config.fps
        );

        let encode = EncodeConfig {
            width,
            height,
            fps: self.config.fps,
            output: output.to_path_buf(),
        };
        let mut encoder = FrameEncoder::spawn(&encode)?;

        for generated in images {
            let frame = generated.image.to_rgb8().into_raw();
            for _ in 0..frames_per_image {
                if let Err(e) = encoder.write_frame(&frame).await {
                    let _ = std::fs::remove_file(output);
                    return Err(e);
                }
            }
        }

        encoder.finish().await?;

        // Settle before the file is read back for serving/download
        if self.config.settle_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.settle_ms)).await;
        }

        Ok(output.to_path_buf())
    }
}
