//! Hugging Face serverless inference provider.
//!
//! Sends the prompt as `{"inputs": ...}` with a bearer token; a successful
//! response body is the raw image bytes, a failure body is a JSON object
//! carrying an `error` message.

use super::provider::{env_var_name, resolve_env_var, TextToImageProvider};
use crate::config::InferenceConfig;
use crate::error::{ConfigError, InferenceError};
use async_trait::async_trait;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Hugging Face serverless text-to-image provider.
#[derive(Debug)]
pub struct HfProvider {
    endpoint: String,
    api_token: String,
    timeout: Duration,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
}

/// Structured error body returned on non-OK responses.
#[derive(Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    error: Option<String>,
}

impl HfProvider {
    /// Build a provider from config, resolving the API credential.
    ///
    /// Fails fast with [`ConfigError::MissingCredential`] when the token's
    /// environment variable is unset, before any run starts.
    pub fn from_config(config: &InferenceConfig) -> Result<Self, ConfigError> {
        let api_token =
            resolve_env_var(&config.api_token).ok_or_else(|| ConfigError::MissingCredential {
                var: env_var_name(&config.api_token)
                    .unwrap_or("HF_API_TOKEN")
                    .to_string(),
            })?;

        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::Validation(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            api_token,
            timeout,
            client,
        })
    }

    fn classify_transport_error(&self, e: reqwest::Error) -> InferenceError {
        if e.is_timeout() {
            InferenceError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            InferenceError::Connection(e.to_string())
        }
    }
}

#[async_trait]
impl TextToImageProvider for HfProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn generate(&self, prompt: &str) -> Result<DynamicImage, InferenceError> {
        let start = Instant::now();

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(&GenerateRequest { inputs: prompt })
            .send()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ErrorPayload>()
                .await
                .ok()
                .and_then(|payload| payload.error)
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(InferenceError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        let image =
            image::load_from_memory(&bytes).map_err(|e| InferenceError::Decode(e.to_string()))?;

        tracing::debug!(
            "Generated {}x{} image in {:?}",
            image.width(),
            image.height(),
            start.elapsed()
        );

        Ok(image)
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}
