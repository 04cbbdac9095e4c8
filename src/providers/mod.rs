/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for various LLM providers:
 * - Gemini: Google Generative Language API
 * - Anthropic: Anthropic Messages API
 * - Ollama: Local LLM server
 * - Mock: Scriptable in-process provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

use crate::app_config::{TranslationConfig, TranslationProvider};
use crate::errors::{AppError, ProviderError};

/// Common trait for all LLM providers
///
/// A provider maps a prompt to generated text with a single request/response
/// exchange, allowing implementations to be used interchangeably in the
/// translation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Generate a response for `prompt` with the given model
    ///
    /// # Arguments
    /// * `model` - Model identifier understood by the provider
    /// * `prompt` - Full prompt text
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The generated text or an error
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError>;

    /// Human readable provider name used in logs
    fn name(&self) -> &str;
}

/// Build the HTTP client shared by the remote providers
pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    match reqwest::Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            log::warn!(
                "Failed to build HTTP client with a {:?} timeout, requests will not time out: {}",
                timeout, e
            );
            reqwest::Client::default()
        }
    }
}

/// Read a failed response body for error reporting
pub(crate) async fn error_from_response(provider: &str, response: reqwest::Response) -> ProviderError {
    let status = response.status();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());
    log::error!("{} API error ({}): {}", provider, status, message);
    ProviderError::from_status(status.as_u16(), message)
}

/// Create the provider selected in the configuration
pub fn create_provider(config: &TranslationConfig) -> Result<Box<dyn Provider>, AppError> {
    let endpoint = config.get_endpoint();
    let timeout = Duration::from_secs(config.get_timeout_secs());
    let temperature = config.common.temperature;
    let max_output_tokens = config.get_max_output_tokens();

    let provider: Box<dyn Provider> = match config.provider {
        TranslationProvider::Gemini => {
            let api_key = config.require_api_key()?.unwrap_or_default();
            Box::new(
                gemini::Gemini::new(api_key, endpoint, timeout)
                    .with_generation(temperature, max_output_tokens),
            )
        }
        TranslationProvider::Anthropic => {
            let api_key = config.require_api_key()?.unwrap_or_default();
            Box::new(
                anthropic::Anthropic::new(api_key, endpoint, timeout)
                    .with_generation(temperature, max_output_tokens),
            )
        }
        TranslationProvider::Ollama => Box::new(
            ollama::Ollama::from_endpoint(&endpoint, timeout)?.with_temperature(temperature),
        ),
    };

    Ok(provider)
}

pub mod anthropic;
pub mod gemini;
pub mod mock;
pub mod ollama;
