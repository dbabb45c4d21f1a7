//! Raw-frame MP4 encoding via the system `ffmpeg` binary.
//!
//! Frames are piped to ffmpeg's stdin as packed RGB24; the encoder handle
//! must be finalized with [`FrameEncoder::finish`] before the output file
//! is complete. The child is killed on drop, so an abandoned handle never
//! leaves a runaway process behind.

use crate::error::SlideshowError;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, ChildStdin, Command};

/// Geometry and rate parameters for one encode session.
#[derive(Debug, Clone)]
pub struct EncodeConfig {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// Output frame rate
    pub fps: u32,
    /// Output file path
    pub output: PathBuf,
}

impl EncodeConfig {
    /// Bytes per packed RGB24 frame.
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

/// Build the ffmpeg argument list for a rawvideo-stdin encode.
pub(crate) fn build_args(config: &EncodeConfig) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-v".to_string(),
        "error".to_string(),
        // Input: packed RGB frames on stdin
        "-f".to_string(),
        "rawvideo".to_string(),
        "-pix_fmt".to_string(),
        "rgb24".to_string(),
        "-s".to_string(),
        format!("{}x{}", config.width, config.height),
        "-r".to_string(),
        config.fps.to_string(),
        "-i".to_string(),
        "-".to_string(),
        // Output: H.264 MP4 playable in browsers
        "-c:v".to_string(),
        "libx264".to_string(),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
        "-movflags".to_string(),
        "+faststart".to_string(),
        config.output.to_string_lossy().to_string(),
    ]
}

/// Check if ffmpeg is available.
pub fn check_ffmpeg() -> Result<PathBuf, SlideshowError> {
    which::which("ffmpeg").map_err(|_| SlideshowError::FfmpegNotFound)
}

/// A running ffmpeg process accepting raw frames on stdin.
pub struct FrameEncoder {
    child: Child,
    stdin: ChildStdin,
    frame_len: usize,
    output: PathBuf,
}

impl FrameEncoder {
    /// Spawn ffmpeg for the given geometry.
    pub fn spawn(config: &EncodeConfig) -> Result<Self, SlideshowError> {
        check_ffmpeg()?;

        let args = build_args(config);
        tracing::debug!("Running ffmpeg {}", args.join(" "));

        let mut child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SlideshowError::Io(std::io::Error::other("ffmpeg stdin not captured")))?;

        Ok(Self {
            child,
            stdin,
            frame_len: config.frame_len(),
            output: config.output.clone(),
        })
    }

    /// Write one packed RGB24 frame.
    pub async fn write_frame(&mut self, frame: &[u8]) -> Result<(), SlideshowError> {
        if frame.len() != self.frame_len {
            return Err(SlideshowError::Io(std::io::Error::other(format!(
                "frame is {} bytes, expected {}",
                frame.len(),
                self.frame_len
            ))));
        }
        self.stdin.write_all(frame).await?;
        Ok(())
    }

    /// Finalize the encode: close stdin, await process exit, check status.
    ///
    /// Consumes the handle; the output file is only safe to read after
    /// this returns Ok.
    pub async fn finish(self) -> Result<(), SlideshowError> {
        let Self {
            mut child,
            mut stdin,
            output,
            ..
        } = self;

        stdin.shutdown().await?;
        drop(stdin);

        let result = child.wait_with_output().await?;
        if result.status.success() {
            Ok(())
        } else {
            // Remove the unfinalized file so a broken artifact is never served
            let _ = std::fs::remove_file(&output);
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            Err(SlideshowError::Encoder {
                message: if stderr.is_empty() {
                    "no diagnostic output".to_string()
                } else {
                    stderr
                },
                code: result.status.code(),
            })
        }
    }
}
