use log::{debug, info};
use std::path::Path;

use crate::app_config::Config;
use crate::errors::{AppError, ExtractionError};
use crate::pdf_processor::PdfExtractor;
use crate::providers::Provider;
use crate::translation::TranslationService;

// @module: Application controller for PDF translation

// @struct: Both outputs of a full run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    // @field: Raw text extracted from the document
    pub extracted: String,

    // @field: Translation of the extracted text
    pub translated: String,
}

/// Main application controller for PDF translation
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Text extractor
    extractor: PdfExtractor,

    // @field: Draw a progress bar while translating
    show_progress: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config.validate()?;
        debug!(
            "Controller configured for {} -> {} using {}",
            config.source_language, config.target_language, config.translation.provider.display_name()
        );

        Ok(Self {
            config,
            extractor: PdfExtractor::new(),
            show_progress: false,
        })
    }

    /// Enable the stderr progress bar for translations
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Extract the text of a PDF document
    pub fn extract<P: AsRef<Path>>(&self, input_file: P) -> Result<String, ExtractionError> {
        let input_file = input_file.as_ref();
        info!("Extracting text from {:?}", input_file);
        self.extractor.extract(input_file)
    }

    /// Translate text with the provider selected in the configuration
    pub async fn translate(&self, text: &str) -> Result<String, AppError> {
        // No chunks, so no provider and no credential
        if text.is_empty() {
            debug!("Nothing to translate");
            return Ok(String::new());
        }

        let service = TranslationService::new(&self.config)?.with_progress(self.show_progress);
        Ok(service.translate(text).await?)
    }

    /// Translate text with an injected provider
    pub async fn translate_with_provider(&self, text: &str, provider: Box<dyn Provider>) -> Result<String, AppError> {
        let service = TranslationService::with_provider(provider, &self.config)?.with_progress(self.show_progress);
        Ok(service.translate(text).await?)
    }

    /// Extract and translate a document with the configured provider
    pub async fn run<P: AsRef<Path>>(&self, input_file: P) -> Result<RunOutput, AppError> {
        let extracted = self.extract(input_file)?;
        let translated = self.translate(&extracted).await?;
        Ok(RunOutput { extracted, translated })
    }

    /// Extract and translate a document with an injected provider
    pub async fn run_with_provider<P: AsRef<Path>>(
        &self,
        input_file: P,
        provider: Box<dyn Provider>,
    ) -> Result<RunOutput, AppError> {
        let extracted = self.extract(input_file)?;
        let translated = self.translate_with_provider(&extracted, provider).await?;
        Ok(RunOutput { extracted, translated })
    }
}
