use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::ConfigError;

/// Application configuration module
/// This module handles loading and validating configuration settings.
/// Credentials are never stored here: each provider names the environment
/// variable its API key is read from.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Maximum number of characters sent per translation request
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Google Gemini
    #[default]
    Gemini,
    // @provider: Anthropic
    Anthropic,
    // @provider: Ollama (local server)
    Ollama,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gemini => "Gemini",
            Self::Anthropic => "Anthropic",
            Self::Ollama => "Ollama",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Gemini => "gemini".to_string(),
            Self::Anthropic => "anthropic".to_string(),
            Self::Ollama => "ollama".to_string(),
        }
    }

    // @returns: Whether requests need an API key
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, Self::Ollama)
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Environment variable holding the API key
    #[serde(default = "String::new")]
    pub api_key_env: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Upper bound on generated tokens per request
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        let (model, endpoint, api_key_env) = match provider_type {
            TranslationProvider::Gemini => (
                default_gemini_model(),
                default_gemini_endpoint(),
                "GEMINI_API_KEY".to_string(),
            ),
            TranslationProvider::Anthropic => (
                default_anthropic_model(),
                default_anthropic_endpoint(),
                "ANTHROPIC_API_KEY".to_string(),
            ),
            TranslationProvider::Ollama => (
                default_ollama_model(),
                default_ollama_endpoint(),
                String::new(),
            ),
        };

        Self {
            provider_type: provider_type.to_lowercase_string(),
            model,
            endpoint,
            api_key_env,
            timeout_secs: default_timeout_secs(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default = "default_available_providers")]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,

    /// API key given on the command line; takes precedence over the environment
    #[serde(skip)]
    pub api_key_override: Option<String>,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// Prompt template sent with every chunk
    /// Placeholders: {source_language}, {target_language}, {text}
    #[serde(default = "default_prompt_template")]
    pub prompt_template: String,

    /// Temperature parameter for text generation (0.0 to 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            prompt_template: default_prompt_template(),
            temperature: default_temperature(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Default number of characters per translation request
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

fn default_source_language() -> String {
    "nl".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_max_output_tokens() -> u32 {
    8192
}

fn default_temperature() -> f32 {
    0.2
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_anthropic_endpoint() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-haiku-20240307".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_prompt_template() -> String {
    "Translate the following {source_language} text to {target_language}. Maintain the original formatting as much as possible:\n\n{text}".to_string()
}

fn default_available_providers() -> Vec<ProviderConfig> {
    vec![
        ProviderConfig::new(TranslationProvider::Gemini),
        ProviderConfig::new(TranslationProvider::Anthropic),
        ProviderConfig::new(TranslationProvider::Ollama),
    ]
}

impl Config {
    /// Load configuration from a JSON file, falling back to defaults when the
    /// file does not exist
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("Config file not found at {:?}, using default configuration", path);
            return Ok(Self::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        for code in [&self.source_language, &self.target_language] {
            crate::language_utils::validate_language_code(code)
                .map_err(|_| ConfigError::InvalidLanguage(code.clone()))?;
        }

        if self.chunk_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "chunk_size",
                message: "must be greater than zero".to_string(),
            });
        }

        if !self.translation.common.prompt_template.contains("{text}") {
            return Err(ConfigError::InvalidValue {
                field: "prompt_template",
                message: "must contain the {text} placeholder".to_string(),
            });
        }

        if !(0.0..=2.0).contains(&self.translation.common.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "temperature",
                message: format!("{} is outside 0.0..=2.0", self.translation.common.temperature),
            });
        }

        if self.translation.get_timeout_secs() == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// English name of the source language, e.g. "Dutch"
    pub fn source_language_name(&self) -> Result<String> {
        crate::language_utils::get_language_name(&self.source_language)
    }

    /// English name of the target language, e.g. "English"
    pub fn target_language_name(&self) -> Result<String> {
        crate::language_utils::get_language_name(&self.target_language)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            chunk_size: default_chunk_size(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &TranslationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Mutable access to the active provider configuration, inserting the
    /// defaults for it when missing
    pub fn active_provider_config_mut(&mut self) -> &mut ProviderConfig {
        let provider_str = self.provider.to_lowercase_string();
        let index = match self.available_providers.iter().position(|p| p.provider_type == provider_str) {
            Some(index) => index,
            None => {
                self.available_providers.push(ProviderConfig::new(self.provider));
                self.available_providers.len() - 1
            }
        };
        &mut self.available_providers[index]
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        match self.provider {
            TranslationProvider::Gemini => default_gemini_model(),
            TranslationProvider::Anthropic => default_anthropic_model(),
            TranslationProvider::Ollama => default_ollama_model(),
        }
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        match self.provider {
            TranslationProvider::Gemini => default_gemini_endpoint(),
            TranslationProvider::Anthropic => default_anthropic_endpoint(),
            TranslationProvider::Ollama => default_ollama_endpoint(),
        }
    }

    /// Name of the environment variable holding the active provider's key
    pub fn get_api_key_env(&self) -> String {
        self.get_active_provider_config()
            .filter(|p| !p.api_key_env.is_empty())
            .map(|p| p.api_key_env.clone())
            .unwrap_or_else(|| ProviderConfig::new(self.provider).api_key_env)
    }

    /// Resolve the API key for the active provider from the command line
    /// override or the configured environment variable
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(key) = self.api_key_override.as_ref().filter(|k| !k.is_empty()) {
            return Some(key.clone());
        }

        let env_var = self.get_api_key_env();
        if env_var.is_empty() {
            return None;
        }
        std::env::var(&env_var).ok().filter(|k| !k.trim().is_empty())
    }

    /// Resolve the API key, failing if the active provider needs one and none is set
    pub fn require_api_key(&self) -> Result<Option<String>, ConfigError> {
        match self.get_api_key() {
            Some(key) => Ok(Some(key)),
            None if self.provider.requires_api_key() => Err(ConfigError::MissingApiKey {
                provider: self.provider.display_name().to_string(),
                env_var: self.get_api_key_env(),
            }),
            None => Ok(None),
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        self.get_active_provider_config()
            .map(|p| p.timeout_secs)
            .unwrap_or_else(default_timeout_secs)
    }

    /// Get the output token bound for the active provider
    pub fn get_max_output_tokens(&self) -> u32 {
        self.get_active_provider_config()
            .map(|p| p.max_output_tokens)
            .filter(|tokens| *tokens > 0)
            .unwrap_or_else(default_max_output_tokens)
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            available_providers: default_available_providers(),
            common: TranslationCommonConfig::default(),
            api_key_override: None,
        }
    }
}
