use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use log::debug;

use crate::errors::{AppError, ConfigError, ProviderError};
use super::{Provider, error_from_response, http_client};

/// Ollama client for interacting with a local Ollama server
#[derive(Debug)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    /// Sampling temperature applied to every request
    temperature: Option<f32>,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Whether to stream the response
    stream: bool,
}

/// Generation options for the Ollama API
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct GenerationOptions {
    /// Temperature for generation (default: 0.8)
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Generation response from the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Model name
    pub model: String,
    /// Generated text
    pub response: String,
    /// Whether the generation is complete
    pub done: bool,
    /// Number of prompt tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,
    /// Number of generated tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
}

impl GenerationRequest {
    /// Create a new non-streaming generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            options: None,
            stream: false,
        }
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options.get_or_insert_with(GenerationOptions::default).temperature = Some(temperature);
        self
    }
}

/// Parse an endpoint such as `localhost:11434` or `http://proxy/ollama`
///
/// A missing scheme defaults to `http`. The path is kept so the server can sit
/// behind a prefix.
pub fn parse_endpoint(endpoint: &str) -> Result<Url, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue { field: "endpoint", message };

    if endpoint.is_empty() {
        return Err(invalid("endpoint cannot be empty".to_string()));
    }

    let url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Url::parse(endpoint)
    } else {
        Url::parse(&format!("http://{}", endpoint))
    }
    .map_err(|e| invalid(format!("{}: {}", endpoint, e)))?;

    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid(format!("invalid host in endpoint: {}", endpoint)));
    }

    Ok(url)
}

impl Ollama {
    /// Create a new Ollama client
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Self {
        let host = host.into();
        let base_url = if host.starts_with("http://") || host.starts_with("https://") {
            format!("{}:{}", host.trim_end_matches('/'), port)
        } else {
            format!("http://{}:{}", host, port)
        };

        Self {
            base_url,
            client: http_client(timeout),
            temperature: None,
        }
    }

    /// Create a client from an endpoint such as `http://localhost:11434`
    pub fn from_endpoint(endpoint: &str, timeout: Duration) -> Result<Self, AppError> {
        let url = parse_endpoint(endpoint)?;

        Ok(Self {
            base_url: url.as_str().trim_end_matches('/').to_string(),
            client: http_client(timeout),
            temperature: None,
        })
    }

    /// Apply a sampling temperature to every request
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate a completion
    pub async fn generate_completion(&self, request: GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);

        let response = self.client.post(&url)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response("Ollama", response).await);
        }

        response.json::<GenerationResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Ollama response: {}", e)))
    }
}

#[async_trait]
impl Provider for Ollama {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let mut request = GenerationRequest::new(model, prompt);
        if let Some(temperature) = self.temperature {
            request = request.temperature(temperature);
        }

        let response = self.generate_completion(request).await?;
        debug!(
            "Ollama usage: {:?} prompt tokens, {:?} output tokens",
            response.prompt_eval_count, response.eval_count
        );

        if response.response.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(response.response)
    }

    fn name(&self) -> &str {
        "Ollama"
    }
}
