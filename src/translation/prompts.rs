/*!
 * Prompt template for chunk translation.
 *
 * Placeholders: `{source_language}`, `{target_language}` and `{text}`.
 * Language placeholders are resolved once per document, `{text}` once per chunk.
 */

/// Translation prompt template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// The default instruction prefixed to every chunk.
    pub const DOCUMENT_TRANSLATOR: &'static str = "Translate the following {source_language} text to {target_language}. Maintain the original formatting as much as possible:\n\n{text}";

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Substitute the language names, leaving `{text}` in place.
    pub fn with_languages(&self, source_language: &str, target_language: &str) -> Self {
        Self {
            template: self.template
                .replace("{source_language}", source_language)
                .replace("{target_language}", target_language),
        }
    }

    /// Build the prompt for one chunk.
    ///
    /// The chunk is inserted verbatim; placeholder-like text inside it is not expanded.
    pub fn render(&self, text: &str) -> String {
        self.template.replace("{text}", text)
    }

    /// Whether the template will actually carry the chunk.
    pub fn has_text_placeholder(&self) -> bool {
        self.template.contains("{text}")
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(Self::DOCUMENT_TRANSLATOR)
    }
}
