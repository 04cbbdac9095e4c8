use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use lopdf::Document as LopdfDocument;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use crate::errors::ExtractionError;

// @module: PDF loading and text extraction

/// A single parsed page
pub trait PdfPage {
    /// Visible text of the page
    fn extract_text(&self) -> Result<String>;
}

/// Capability that turns raw PDF bytes into an ordered list of pages
pub trait PdfReader {
    /// Page type produced by this reader
    type Page: PdfPage;

    /// Parse the document; pages are returned in physical order
    fn parse(&self, bytes: &[u8]) -> Result<Vec<Self::Page>>;
}

/// Reader backed by lopdf
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfReader;

/// Page of a document loaded by lopdf
#[derive(Debug, Clone)]
pub struct LopdfPage {
    // @field: Shared parsed document
    document: Arc<LopdfDocument>,

    // @field: 1-based page number
    number: u32,
}

impl PdfPage for LopdfPage {
    fn extract_text(&self) -> Result<String> {
        self.document
            .extract_text(&[self.number])
            .with_context(|| format!("Failed to extract text from page {}", self.number))
    }
}

impl PdfReader for LopdfReader {
    type Page = LopdfPage;

    fn parse(&self, bytes: &[u8]) -> Result<Vec<Self::Page>> {
        let document = LopdfDocument::load_mem(bytes)
            .map_err(|e| anyhow!("Failed to parse PDF: {}", e))?;

        if document.is_encrypted() {
            return Err(anyhow!("Encrypted PDF documents are not supported"));
        }

        let document = Arc::new(document);
        // get_pages is keyed by page number, so iteration is in page order
        let pages = document
            .get_pages()
            .keys()
            .map(|&number| LopdfPage {
                document: Arc::clone(&document),
                number,
            })
            .collect();

        Ok(pages)
    }
}

/// Text of a whole document, one entry per page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Page texts in physical order
    pub pages: Vec<String>,
}

impl Document {
    /// Number of pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page texts concatenated without separator
    pub fn text(&self) -> String {
        self.pages.concat()
    }

    /// Total length in characters
    pub fn char_count(&self) -> usize {
        self.pages.iter().map(|p| p.chars().count()).sum()
    }
}

/// Extracts plain text from PDF files using a [`PdfReader`]
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor<R: PdfReader = LopdfReader> {
    reader: R,
}

impl PdfExtractor<LopdfReader> {
    /// Create an extractor backed by lopdf
    pub fn new() -> Self {
        Self { reader: LopdfReader }
    }
}

impl<R: PdfReader> PdfExtractor<R> {
    /// Create an extractor with a custom reader
    pub fn with_reader(reader: R) -> Self {
        Self { reader }
    }

    /// Extract the concatenated text of every page
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<String, ExtractionError> {
        self.extract_document(path).map(|document| document.text())
    }

    /// Extract the text of every page, keeping page boundaries
    pub fn extract_document<P: AsRef<Path>>(&self, path: P) -> Result<Document, ExtractionError> {
        let path = path.as_ref();
        let failed = |reason: String| ExtractionError::Failed {
            path: path.to_path_buf(),
            reason,
        };

        let bytes = read_file(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ExtractionError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => failed(e.to_string()),
        })?;
        debug!("Read {} bytes from {:?}", bytes.len(), path);

        let pages = self.reader.parse(&bytes).map_err(|e| failed(format!("{:#}", e)))?;

        let mut document = Document {
            pages: Vec::with_capacity(pages.len()),
        };
        for page in &pages {
            let text = page.extract_text().map_err(|e| failed(format!("{:#}", e)))?;
            document.pages.push(text);
        }

        info!(
            "Extracted {} characters from {} page(s) of {:?}",
            document.char_count(),
            document.page_count(),
            path
        );
        Ok(document)
    }
}

// The file handle is dropped before parsing starts, on success and on error.
fn read_file(path: &Path) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}
