//! Reverie Core - Embeddable text-to-image slideshow library.
//!
//! Reverie takes one text prompt, asks a remote text-to-image endpoint for
//! several styled variations of it, saves the results as PNG files, and
//! optionally assembles them into a slideshow MP4.
//!
//! # Architecture
//!
//! ```text
//! Prompt → Variants → Remote inference (×N, sequential) → PNG store → MP4
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use reverie_core::{ArtifactStore, Config, GenerationRun, HfProvider, Job, SlideshowAssembler};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let provider = HfProvider::from_config(&config.inference)?;
//!     let run = GenerationRun::new(
//!         Box::new(provider),
//!         ArtifactStore::new(config.output_dir())?,
//!         SlideshowAssembler::new(config.slideshow.clone()),
//!     );
//!     let outcome = run.run(&Job::new("a red fox", 3)).await;
//!     println!("{} artifacts", outcome.artifacts().len());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod inference;
pub mod pipeline;
pub mod slideshow;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{
    ConfigError, InferenceError, Result, ReverieError, RunError, SlideshowError, StoreError,
};
pub use inference::{HfProvider, TextToImageProvider};
pub use pipeline::{ArtifactStore, GenerationRun, RunOutcome, RunState};
pub use slideshow::SlideshowAssembler;
pub use types::{Artifact, ArtifactKind, GeneratedImage, Job, PromptVariant};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
