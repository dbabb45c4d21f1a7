//! Text-to-image provider trait and credential resolution.

use crate::error::InferenceError;
use async_trait::async_trait;
use image::DynamicImage;
use std::time::Duration;

/// Trait that text-to-image backends implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (the orchestrator holds a `Box<dyn TextToImageProvider>` so tests can
/// substitute a mock).
#[async_trait]
pub trait TextToImageProvider: Send + Sync {
    /// Provider name for logging (e.g., "huggingface").
    fn name(&self) -> &str;

    /// Generate one image for the given prompt text.
    ///
    /// Blocks the run for at most [`timeout`](Self::timeout); failures are
    /// surfaced to the orchestrator and never retried here.
    async fn generate(&self, prompt: &str) -> Result<DynamicImage, InferenceError>;

    /// Per-request timeout for this provider.
    fn timeout(&self) -> Duration;
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok()
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// The environment variable name a `${VAR}` reference points at, if any.
///
/// Used to produce a useful message when the credential is missing.
pub(crate) fn env_var_name(value: &str) -> Option<&str> {
    if value.starts_with("${") && value.ends_with('}') {
        Some(&value[2..value.len() - 1])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_env_var() {
        // Non-env-var strings pass through
        assert_eq!(resolve_env_var("plain-key"), Some("plain-key".to_string()));
        // Empty returns None
        assert_eq!(resolve_env_var(""), None);
        // Unset env var returns None
        assert_eq!(resolve_env_var("${DEFINITELY_NOT_SET_XYZ_123}"), None);
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(env_var_name("${HF_API_TOKEN}"), Some("HF_API_TOKEN"));
        assert_eq!(env_var_name("hf_abc123"), None);
    }
}
