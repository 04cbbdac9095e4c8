/*!
 * Core translation service implementation.
 *
 * This module contains the chunk-and-translate pipeline and the
 * `TranslationService` that binds it to a configured provider.
 */

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use std::time::Instant;

use crate::app_config::Config;
use crate::errors::{AppError, ConfigError, ProviderError, TranslationError};
use crate::providers::{self, Provider};
use super::chunking::{chunk_count, partition};
use super::prompts::PromptTemplate;

/// Translate `text` chunk by chunk and join the results with single spaces.
///
/// Each chunk is wrapped in `prompt` and sent to `provider`; the next request
/// is only issued once the previous one has completed. The first failure
/// aborts the whole operation and no partial translation is returned.
pub async fn translate<P: Provider + ?Sized>(
    text: &str,
    provider: &P,
    model: &str,
    prompt: &PromptTemplate,
    chunk_size: usize,
    progress: &ProgressBar,
) -> Result<String, TranslationError> {
    let chunks = partition(text, chunk_size)?;
    let total_chunks = chunk_count(text, chunk_size);
    if total_chunks == 0 {
        debug!("Nothing to translate");
        return Ok(String::new());
    }

    info!(
        "Translating {} character(s) in {} chunk(s) of at most {} with {} ({})",
        text.chars().count(), total_chunks, chunk_size, provider.name(), model
    );
    progress.set_length(total_chunks as u64);

    let started = Instant::now();
    let mut translated_chunks = Vec::with_capacity(total_chunks);
    for (chunk_index, chunk) in chunks.enumerate() {
        debug!("Sending chunk {}/{} ({} chars)", chunk_index + 1, total_chunks, chunk.chars().count());

        let translated = provider
            .generate(model, &prompt.render(chunk))
            .await
            .map_err(|source| {
                error!("Chunk {}/{} failed: {}", chunk_index + 1, total_chunks, source);
                progress.abandon();
                TranslationError::Failed { chunk_index, total_chunks, source }
            })?;

        translated_chunks.push(translated);
        progress.inc(1);
    }

    progress.finish_and_clear();
    info!("Translated {} chunk(s) in {:.1?}", total_chunks, started.elapsed());
    Ok(translated_chunks.join(" "))
}

/// Main translation service for document translation
#[derive(Debug)]
pub struct TranslationService {
    /// Provider implementation
    provider: Box<dyn Provider>,

    /// Model identifier passed to the provider
    model: String,

    /// Prompt template with language names resolved
    prompt: PromptTemplate,

    /// Maximum characters per request
    chunk_size: usize,

    /// Whether to draw a progress bar on stderr
    show_progress: bool,
}

impl TranslationService {
    /// Create a new translation service for the provider selected in `config`
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let provider = providers::create_provider(&config.translation)?;
        Self::with_provider(provider, config)
    }

    /// Create a translation service around an existing provider
    pub fn with_provider(provider: Box<dyn Provider>, config: &Config) -> Result<Self, AppError> {
        let source_name = config.source_language_name()
            .map_err(|_| ConfigError::InvalidLanguage(config.source_language.clone()))?;
        let target_name = config.target_language_name()
            .map_err(|_| ConfigError::InvalidLanguage(config.target_language.clone()))?;

        let prompt = PromptTemplate::new(&config.translation.common.prompt_template)
            .with_languages(&source_name, &target_name);
        if !prompt.has_text_placeholder() {
            return Err(ConfigError::InvalidValue {
                field: "prompt_template",
                message: "must contain the {text} placeholder".to_string(),
            }.into());
        }

        Ok(Self {
            provider,
            model: config.translation.get_model(),
            prompt,
            chunk_size: config.chunk_size,
            show_progress: false,
        })
    }

    /// Enable or disable the stderr progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Model used for requests
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Configured chunk size
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Translate a whole text using the configured chunk size
    pub async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        self.translate_with_chunk_size(text, self.chunk_size).await
    }

    /// Translate a whole text using an explicit chunk size
    pub async fn translate_with_chunk_size(&self, text: &str, chunk_size: usize) -> Result<String, TranslationError> {
        let progress = self.progress_bar();
        translate(text, self.provider.as_ref(), &self.model, &self.prompt, chunk_size, &progress).await
    }

    /// Translate a single chunk without splitting it
    pub async fn translate_chunk(&self, chunk: &str) -> Result<String, ProviderError> {
        self.provider.generate(&self.model, &self.prompt.render(chunk)).await
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::new(0);
        progress.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        progress
    }
}
