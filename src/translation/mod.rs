/*!
 * Translation of extracted document text using AI providers.
 *
 * - `chunking`: Character-count partitioning of long text
 * - `prompts`: Prompt template wrapped around each chunk
 * - `core`: The chunk-and-translate pipeline and `TranslationService`
 */

// Re-export main types for easier usage
pub use self::chunking::{Chunks, chunk_count, partition};
pub use self::core::{TranslationService, translate};
pub use self::prompts::PromptTemplate;

// Submodules
pub mod chunking;
pub mod core;
pub mod prompts;
