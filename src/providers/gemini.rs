use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use reqwest::Client;
use log::debug;

use crate::errors::ProviderError;
use super::{Provider, error_from_response, http_client};

/// Gemini client for the Google Generative Language API
#[derive(Debug)]
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API base URL
    endpoint: String,
    /// Sampling temperature applied to every request
    temperature: Option<f32>,
    /// Output token bound applied to every request
    max_output_tokens: Option<u32>,
}

/// generateContent request body
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    /// Conversation turns; a single user turn for translation
    contents: Vec<GeminiContent>,

    /// Sampling parameters
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// Content block shared by requests and responses
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    /// Author of the content (user, model)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Content parts
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// A single text part
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    /// Text of the part
    #[serde(default)]
    pub text: String,
}

/// Generation parameters
#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// generateContent response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    /// Candidate completions
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    /// Token usage information
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

/// One candidate completion
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    /// Generated content
    #[serde(default)]
    pub content: Option<GeminiContent>,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage information
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GeminiRequest {
    /// Create a request with a single user prompt
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart { text: prompt.into() }],
            }],
            generation_config: None,
        }
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.generation_config.get_or_insert_with(GenerationConfig::default).temperature = Some(temperature);
        self
    }

    /// Set the maximum number of output tokens
    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.generation_config.get_or_insert_with(GenerationConfig::default).max_output_tokens = Some(max_output_tokens);
        self
    }
}

impl Gemini {
    /// Create a new Gemini client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            temperature: None,
            max_output_tokens: None,
        }
    }

    /// Apply sampling settings to every request
    pub fn with_generation(mut self, temperature: f32, max_output_tokens: u32) -> Self {
        self.temperature = Some(temperature);
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// URL of the generateContent method for `model`
    pub fn generate_url(&self, model: &str) -> String {
        let base = if self.endpoint.is_empty() {
            "https://generativelanguage.googleapis.com"
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!("{}/v1beta/models/{}:generateContent", base, model)
    }

    /// Send a generateContent request
    pub async fn complete(&self, model: &str, request: GeminiRequest) -> Result<GeminiResponse, ProviderError> {
        let response = self.client.post(self.generate_url(model))
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response("Gemini", response).await);
        }

        response.json::<GeminiResponse>().await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Extract text from a Gemini response
    pub fn extract_text_from_response(response: &GeminiResponse) -> String {
        response.candidates.first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Provider for Gemini {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let mut request = GeminiRequest::new(prompt);
        if let Some(temperature) = self.temperature {
            request = request.temperature(temperature);
        }
        if let Some(max_output_tokens) = self.max_output_tokens {
            request = request.max_output_tokens(max_output_tokens);
        }

        let response = self.complete(model, request).await?;
        if let Some(usage) = &response.usage_metadata {
            debug!(
                "Gemini usage: {} prompt tokens, {} output tokens",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        let text = Self::extract_text_from_response(&response);
        if text.is_empty() {
            let reason = response.candidates.first()
                .and_then(|c| c.finish_reason.clone())
                .unwrap_or_else(|| "no candidates".to_string());
            debug!("Gemini returned no text (finish reason: {})", reason);
            return Err(ProviderError::EmptyResponse);
        }
        Ok(text)
    }

    fn name(&self) -> &str {
        "Gemini"
    }
}
