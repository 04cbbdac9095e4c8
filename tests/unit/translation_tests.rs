/*!
 * Tests for the chunk-and-translate pipeline
 */

use anyhow::Result;
use indicatif::ProgressBar;
use pdfvertaler::app_config::Config;
use pdfvertaler::errors::{ProviderError, TranslationError};
use pdfvertaler::providers::mock::MockProvider;
use pdfvertaler::translation::{translate, PromptTemplate, TranslationService};
use crate::common;

fn service(provider: &MockProvider, config: &Config) -> TranslationService {
    TranslationService::with_provider(Box::new(provider.clone()), config).unwrap()
}

/// Test that an empty text makes no requests
#[tokio::test]
async fn test_translate_withEmptyText_shouldReturnEmptyWithoutRequests() -> Result<()> {
    let provider = MockProvider::working();
    let service = service(&provider, &Config::default());

    let translated = service.translate("").await?;

    assert_eq!(translated, "");
    assert_eq!(provider.request_count(), 0);
    Ok(())
}

/// Test the identity translator seam behaviour
#[tokio::test]
async fn test_translate_withIdentityProvider_shouldJoinChunksWithSpaces() -> Result<()> {
    let provider = MockProvider::echo();
    let service = service(&provider, &common::identity_prompt_config(3));

    let translated = service.translate("abcdefgh").await?;

    assert_eq!(translated, "abc def gh");
    assert_eq!(provider.prompts(), vec!["abc", "def", "gh"]);
    Ok(())
}

/// Test that seams add a space even where the text already had whitespace
#[tokio::test]
async fn test_translate_withWhitespaceAtSeam_shouldStillInsertSingleSpace() -> Result<()> {
    let provider = MockProvider::echo();
    let service = service(&provider, &common::identity_prompt_config(4));

    let translated = service.translate("een twee").await?;

    assert_eq!(translated, "een  twee");
    Ok(())
}

/// Test that 25000 characters are sent as three requests in order
#[tokio::test]
async fn test_translate_with25000Chars_shouldSendThreeOrderedRequests() -> Result<()> {
    let provider = MockProvider::echo();
    let service = service(&provider, &common::identity_prompt_config(10_000));
    let text = format!("{}{}{}", "a".repeat(10_000), "b".repeat(10_000), "c".repeat(5_000));

    let translated = service.translate(&text).await?;

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 3);
    assert_eq!(prompts[0], "a".repeat(10_000));
    assert_eq!(prompts[1], "b".repeat(10_000));
    assert_eq!(prompts[2], "c".repeat(5_000));
    assert_eq!(translated, prompts.join(" "));
    Ok(())
}

/// Test that a failure on the 2nd of 3 chunks aborts without partial output
#[tokio::test]
async fn test_translate_withFailureOnSecondChunk_shouldAbortWithoutPartialText() {
    let provider = MockProvider::fail_on_call(2);
    let service = service(&provider, &common::identity_prompt_config(10));

    let result = service.translate(&"x".repeat(25)).await;

    match result {
        Err(TranslationError::Failed { chunk_index, total_chunks, source }) => {
            assert_eq!(chunk_index, 1);
            assert_eq!(total_chunks, 3);
            assert!(matches!(source, ProviderError::ApiError { status_code: 500, .. }));
        }
        other => panic!("expected TranslationError::Failed, got {:?}", other),
    }
    // No retry and no request for the third chunk
    assert_eq!(provider.request_count(), 2);
}

/// Test that an always failing provider fails on the first chunk
#[tokio::test]
async fn test_translate_withFailingProvider_shouldReportFirstChunk() {
    let provider = MockProvider::failing();
    let service = service(&provider, &Config::default());

    let error = service.translate("Goedemorgen").await.unwrap_err();

    assert!(matches!(error, TranslationError::Failed { chunk_index: 0, total_chunks: 1, .. }));
    assert!(error.to_string().contains("chunk 1 of 1"));
}

/// Test that an empty provider reply counts as a failure
#[tokio::test]
async fn test_translate_withEmptyResponses_shouldFail() {
    let provider = MockProvider::empty();
    let service = service(&provider, &Config::default());

    let error = service.translate("Goedemorgen").await.unwrap_err();

    assert!(matches!(error, TranslationError::Failed { source: ProviderError::EmptyResponse, .. }));
}

/// Test that a zero chunk size is rejected before any request
#[tokio::test]
async fn test_translate_withZeroChunkSize_shouldRejectWithoutRequests() {
    let provider = MockProvider::working();
    let service = service(&provider, &Config::default());

    let result = service.translate_with_chunk_size("tekst", 0).await;

    assert!(matches!(result, Err(TranslationError::InvalidChunkSize(0))));
    assert_eq!(provider.request_count(), 0);
}

/// Test that the default prompt carries the instruction and languages
#[tokio::test]
async fn test_translate_withDefaultConfig_shouldPrefixDutchToEnglishInstruction() -> Result<()> {
    let provider = MockProvider::working();
    let service = service(&provider, &Config::default());

    let translated = service.translate("Uitslag bloedafname").await?;

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].starts_with("Translate the following Dutch text to English."));
    assert!(prompts[0].ends_with("\n\nUitslag bloedafname"));
    assert_eq!(translated, format!("[TRANSLATED] {}", prompts[0]));
    Ok(())
}

/// Test that the configured languages reach the prompt
#[tokio::test]
async fn test_translate_withGermanSource_shouldUseGermanInPrompt() -> Result<()> {
    let provider = MockProvider::working();
    let mut config = Config::default();
    config.source_language = "de".to_string();
    config.target_language = "fra".to_string();
    let service = service(&provider, &config);

    service.translate("Guten Morgen").await?;

    assert!(provider.prompts()[0].contains("German text to French"));
    Ok(())
}

/// Test that a custom response generator shapes the output
#[tokio::test]
async fn test_translate_withCustomResponse_shouldJoinGeneratedText() -> Result<()> {
    let provider = MockProvider::echo().with_custom_response(|prompt| prompt.to_uppercase());
    let service = service(&provider, &common::identity_prompt_config(2));

    assert_eq!(service.translate("abcde").await?, "AB CD E");
    Ok(())
}

/// Test the free pipeline function with an explicit prompt
#[tokio::test]
async fn test_translate_function_withHiddenProgress_shouldTranslate() -> Result<()> {
    let provider = MockProvider::echo();
    let prompt = PromptTemplate::new("NL>EN: {text}");

    let translated = translate("hallo", &provider, "test-model", &prompt, 10, &ProgressBar::hidden()).await?;

    assert_eq!(translated, "NL>EN: hallo");
    Ok(())
}

/// Test that translate_chunk sends exactly one request
#[tokio::test]
async fn test_translate_chunk_withLongText_shouldNotSplit() -> Result<()> {
    let provider = MockProvider::echo();
    let service = service(&provider, &common::identity_prompt_config(2));

    let translated = service.translate_chunk("ongesplitst").await?;

    assert_eq!(translated, "ongesplitst");
    assert_eq!(provider.request_count(), 1);
    Ok(())
}

/// Test that a template without {text} is rejected
#[test]
fn test_with_provider_withTemplateMissingText_shouldFail() {
    let mut config = Config::default();
    config.translation.common.prompt_template = "Translate please".to_string();

    let result = TranslationService::with_provider(Box::new(MockProvider::echo()), &config);

    assert!(result.is_err());
}

/// Test that service exposes the configured model and chunk size
#[test]
fn test_with_provider_withDefaultConfig_shouldUseGeminiModel() {
    let service = TranslationService::with_provider(Box::new(MockProvider::echo()), &Config::default()).unwrap();
    assert_eq!(service.model(), "gemini-2.0-flash");
    assert_eq!(service.chunk_size(), 10_000);
}
