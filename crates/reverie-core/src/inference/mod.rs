//! Remote text-to-image inference.
//!
//! Provides a provider abstraction over the inference backend and the
//! Hugging Face serverless implementation used in production. One call
//! per prompt variant, no retries, no state between calls.

pub(crate) mod huggingface;
pub(crate) mod provider;

pub use huggingface::HfProvider;
pub use provider::{resolve_env_var, TextToImageProvider};
