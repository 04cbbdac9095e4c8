/*!
 * Error types for the pdfvertaler application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The API answered successfully but without any text
    #[error("Provider returned an empty response")]
    EmptyResponse,
}

impl ProviderError {
    /// Map a non-success HTTP status and body to the matching error variant
    pub fn from_status(status_code: u16, message: String) -> Self {
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_connect() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that can occur while extracting text from a PDF document
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The document does not exist
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Requested path
        path: PathBuf,
    },

    /// The document exists but could not be read or parsed
    #[error("Failed to extract text from {}: {reason}", .path.display())]
    Failed {
        /// Requested path
        path: PathBuf,
        /// Underlying cause
        reason: String,
    },
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Chunk size must be at least one character
    #[error("Invalid chunk size {0}: chunk size must be greater than zero")]
    InvalidChunkSize(usize),

    /// A chunk request failed and the whole translation was abandoned
    #[error("Translation failed on chunk {} of {total_chunks}: {source}", .chunk_index + 1)]
    Failed {
        /// Zero-based index of the failing chunk
        chunk_index: usize,
        /// Number of chunks in the document
        total_chunks: usize,
        /// Provider failure
        #[source]
        source: ProviderError,
    },
}

/// Errors caused by invalid configuration values
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A language code is not a known ISO 639 code
    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),

    /// A field holds an unusable value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Offending field
        field: &'static str,
        /// Why it is invalid
        message: String,
    },

    /// The configured provider has no credential available
    #[error("Missing API key for {provider}: set the {env_var} environment variable or pass --api-key")]
    MissingApiKey {
        /// Provider display name
        provider: String,
        /// Environment variable that was consulted
        env_var: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from text extraction
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Extraction(_) => 3,
            Self::Translation(_) => 4,
            _ => 1,
        }
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
