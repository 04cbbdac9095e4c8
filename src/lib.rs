/*!
 * # pdfvertaler - PDF text extraction and AI translation
 *
 * A Rust library that extracts the text of a PDF document and translates it
 * with a hosted or local large language model.
 *
 * ## Features
 *
 * - Extract page text from PDF files in physical page order
 * - Split long text into fixed-size character chunks
 * - Translate each chunk sequentially using various AI providers:
 *   - Google Gemini
 *   - Anthropic API
 *   - Ollama (local LLM)
 * - Typed errors mapped to distinct process exit codes
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `pdf_processor`: PDF loading and text extraction
 * - `translation`: Chunking, prompt construction and the translation pipeline
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `providers`: Client implementations for the LLM providers
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod pdf_processor;
pub mod translation;
pub mod app_controller;
pub mod language_utils;
pub mod providers;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunOutput};
pub use pdf_processor::{Document, PdfExtractor};
pub use translation::TranslationService;
pub use language_utils::{normalize_to_part2t, get_language_name};
pub use errors::{AppError, ConfigError, ExtractionError, ProviderError, TranslationError};
