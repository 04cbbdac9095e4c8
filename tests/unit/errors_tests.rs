/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;
use pdfvertaler::errors::{AppError, ConfigError, ExtractionError, ProviderError, TranslationError};

#[test]
fn test_providerError_fromStatus_shouldMapKnownCodes() {
    assert!(matches!(ProviderError::from_status(401, "nope".into()), ProviderError::AuthenticationError(_)));
    assert!(matches!(ProviderError::from_status(403, "nope".into()), ProviderError::AuthenticationError(_)));
    assert!(matches!(ProviderError::from_status(429, "slow down".into()), ProviderError::RateLimitExceeded(_)));
    assert!(matches!(
        ProviderError::from_status(503, "busy".into()),
        ProviderError::ApiError { status_code: 503, .. }
    ));
}

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 500,
        message: "Internal error".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("500"));
    assert!(display.contains("Internal error"));
}

#[test]
fn test_extractionError_fileNotFound_shouldDisplayPath() {
    let error = ExtractionError::FileNotFound { path: PathBuf::from("/tmp/rapport.pdf") };
    let display = format!("{}", error);
    assert!(display.contains("File not found"));
    assert!(display.contains("/tmp/rapport.pdf"));
}

#[test]
fn test_translationError_failed_shouldDisplayOneBasedChunk() {
    let error = TranslationError::Failed {
        chunk_index: 1,
        total_chunks: 3,
        source: ProviderError::Timeout("120s elapsed".to_string()),
    };
    let display = format!("{}", error);
    assert!(display.contains("chunk 2 of 3"));
    assert!(display.contains("120s elapsed"));
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_appError_exitCode_shouldDistinguishFailureKinds() {
    let extraction: AppError = ExtractionError::FileNotFound { path: PathBuf::from("x.pdf") }.into();
    let translation: AppError = TranslationError::InvalidChunkSize(0).into();
    let config: AppError = ConfigError::InvalidLanguage("xx".to_string()).into();
    let provider: AppError = ProviderError::EmptyResponse.into();

    assert_eq!(extraction.exit_code(), 3);
    assert_eq!(translation.exit_code(), 4);
    assert_eq!(config.exit_code(), 1);
    assert_eq!(provider.exit_code(), 1);
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("Permission denied"));
}

#[test]
fn test_appError_fromAnyhowError_shouldWrapAsUnknown() {
    let app_error: AppError = anyhow::anyhow!("Something went wrong").into();
    let display = format!("{}", app_error);
    assert!(display.contains("Unknown error"));
    assert!(display.contains("Something went wrong"));
}

#[test]
fn test_configError_missingApiKey_shouldNameVariable() {
    let error = ConfigError::MissingApiKey {
        provider: "Gemini".to_string(),
        env_var: "GEMINI_API_KEY".to_string(),
    };
    assert!(error.to_string().contains("GEMINI_API_KEY"));
}
