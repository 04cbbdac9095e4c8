/*!
 * End-to-end tests: PDF on disk -> extraction -> chunked translation
 */

use anyhow::Result;
use pdfvertaler::app_config::Config;
use pdfvertaler::app_controller::Controller;
use pdfvertaler::errors::{AppError, TranslationError};
use pdfvertaler::providers::mock::MockProvider;
use crate::common;

/// Test a full run with an identity provider
#[tokio::test]
async fn test_run_withIdentityProvider_shouldReturnExtractedTextAsTranslation() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let pdf = common::create_test_pdf(temp_dir.path(), "bloedafname.pdf", &["Hemoglobine 8,9", "Leukocyten 6,1"])?;
    let controller = Controller::with_config(common::identity_prompt_config(10_000))?;
    let provider = MockProvider::echo();

    let output = controller.run_with_provider(&pdf, Box::new(provider.clone())).await?;

    assert!(output.extracted.contains("Hemoglobine 8,9"));
    assert_eq!(output.translated, output.extracted);
    assert_eq!(provider.request_count(), 1);
    Ok(())
}

/// Test that small chunks split the document across requests
#[tokio::test]
async fn test_run_withSmallChunks_shouldSendOneRequestPerChunk() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let pdf = common::create_test_pdf(temp_dir.path(), "lang.pdf", &["Een tamelijk lange eerste regel"])?;
    let controller = Controller::with_config(common::identity_prompt_config(8))?;
    let provider = MockProvider::echo();

    let output = controller.run_with_provider(&pdf, Box::new(provider.clone())).await?;

    let expected_requests = output.extracted.chars().count().div_ceil(8);
    assert_eq!(provider.request_count(), expected_requests);
    assert_eq!(provider.prompts().concat(), output.extracted);
    assert_eq!(output.translated, provider.prompts().join(" "));
    Ok(())
}

/// Test that a missing document fails before any request
#[tokio::test]
async fn test_run_withMissingPdf_shouldFailWithExtractionError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(Config::default())?;
    let provider = MockProvider::working();

    let error = controller
        .run_with_provider(temp_dir.path().join("weg.pdf"), Box::new(provider.clone()))
        .await
        .unwrap_err();

    assert!(matches!(error, AppError::Extraction(_)));
    assert_eq!(error.exit_code(), 3);
    assert_eq!(provider.request_count(), 0);
    Ok(())
}

/// Test that a provider failure discards the whole translation
#[tokio::test]
async fn test_run_withFailingProvider_shouldFailWithTranslationError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let pdf = common::create_test_pdf(temp_dir.path(), "rapport.pdf", &["Uitslag", "Conclusie"])?;
    let controller = Controller::with_config(common::identity_prompt_config(4))?;

    let error = controller
        .run_with_provider(&pdf, Box::new(MockProvider::fail_on_call(2)))
        .await
        .unwrap_err();

    assert!(matches!(error, AppError::Translation(TranslationError::Failed { chunk_index: 1, .. })));
    assert_eq!(error.exit_code(), 4);
    Ok(())
}

/// Test that extraction works without any provider credentials
#[test]
fn test_extract_withoutApiKey_shouldSucceed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let pdf = common::create_test_pdf(temp_dir.path(), "alleen.pdf", &["Alleen extractie"])?;
    let mut config = Config::default();
    config.translation.active_provider_config_mut().api_key_env = common::UNSET_ENV_VAR.to_string();
    let controller = Controller::with_config(config)?;

    let text = controller.extract(&pdf)?;

    assert!(text.contains("Alleen extractie"));
    Ok(())
}

/// Test that translating without credentials is a configuration error
#[tokio::test]
async fn test_translate_withoutApiKey_shouldFailWithConfigError() -> Result<()> {
    let mut config = Config::default();
    config.translation.active_provider_config_mut().api_key_env = common::UNSET_ENV_VAR.to_string();
    let controller = Controller::with_config(config)?;

    let error = controller.translate("Goedemorgen").await.unwrap_err();

    assert!(matches!(error, AppError::Config(_)));
    assert_eq!(error.exit_code(), 1);
    Ok(())
}

/// Test that empty text needs no provider and no credentials
#[tokio::test]
async fn test_translate_withEmptyTextAndNoApiKey_shouldReturnEmpty() -> Result<()> {
    let mut config = Config::default();
    config.translation.active_provider_config_mut().api_key_env = common::UNSET_ENV_VAR.to_string();
    let controller = Controller::with_config(config)?;

    let translated = controller.translate("").await?;

    assert_eq!(translated, "");
    Ok(())
}

/// Test that an invalid configuration is rejected by the controller
#[test]
fn test_with_config_withZeroChunkSize_shouldFail() {
    let mut config = Config::default();
    config.chunk_size = 0;

    assert!(matches!(Controller::with_config(config), Err(AppError::Config(_))));
}
