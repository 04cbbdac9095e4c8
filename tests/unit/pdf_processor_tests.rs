/*!
 * Tests for PDF text extraction
 */

use anyhow::Result;
use pdfvertaler::errors::ExtractionError;
use pdfvertaler::pdf_processor::{LopdfReader, PdfExtractor, PdfPage, PdfReader};
use crate::common;

/// Test extraction of a generated multi-page document
#[test]
fn test_extract_withMultiPagePdf_shouldConcatenateInPageOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let pdf = common::create_test_pdf(
        temp_dir.path(),
        "rapport.pdf",
        &["Eerste pagina", "Tweede pagina", "Derde pagina"],
    )?;

    let text = PdfExtractor::new().extract(&pdf)?;

    let first = text.find("Eerste pagina").expect("page 1 text");
    let second = text.find("Tweede pagina").expect("page 2 text");
    let third = text.find("Derde pagina").expect("page 3 text");
    assert!(first < second && second < third);
    Ok(())
}

/// Test that extract equals the concatenation of extract_document pages
#[test]
fn test_extract_document_shouldKeepOnePageEntryPerPage() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let pdf = common::create_test_pdf(temp_dir.path(), "twee.pdf", &["Hallo", "wereld"])?;
    let extractor = PdfExtractor::new();

    let document = extractor.extract_document(&pdf)?;

    assert_eq!(document.page_count(), 2);
    assert!(document.pages[0].contains("Hallo"));
    assert!(document.pages[1].contains("wereld"));
    assert_eq!(extractor.extract(&pdf)?, document.text());
    Ok(())
}

/// Test that a missing file is reported as FileNotFound
#[test]
fn test_extract_withNonExistentPath_shouldReturnFileNotFound() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("bestaat-niet.pdf");

    let result = PdfExtractor::new().extract(&missing);

    match result {
        Err(ExtractionError::FileNotFound { path }) => assert_eq!(path, missing),
        other => panic!("expected FileNotFound, got {:?}", other),
    }
    Ok(())
}

/// Test that a corrupt file is reported as Failed
#[test]
fn test_extract_withCorruptFile_shouldReturnFailed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let bogus = common::create_test_file(temp_dir.path(), "kapot.pdf", b"dit is geen pdf")?;

    let result = PdfExtractor::new().extract(&bogus);

    assert!(matches!(result, Err(ExtractionError::Failed { .. })));
    Ok(())
}

/// Test that a directory path is reported as Failed, not FileNotFound
#[test]
fn test_extract_withDirectoryPath_shouldReturnFailed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let result = PdfExtractor::new().extract(temp_dir.path());

    assert!(matches!(result, Err(ExtractionError::Failed { .. })));
    Ok(())
}

/// Test that the lopdf reader returns pages in order
#[test]
fn test_lopdf_reader_withGeneratedPdf_shouldParseAllPages() -> Result<()> {
    let bytes = common::build_pdf(&["A", "B", "C", "D"])?;

    let pages = LopdfReader.parse(&bytes)?;

    assert_eq!(pages.len(), 4);
    assert!(pages[3].extract_text()?.contains('D'));
    Ok(())
}

struct BrokenPage;

impl PdfPage for BrokenPage {
    fn extract_text(&self) -> Result<String> {
        Err(anyhow::anyhow!("unsupported font encoding"))
    }
}

struct BrokenReader;

impl PdfReader for BrokenReader {
    type Page = BrokenPage;

    fn parse(&self, _bytes: &[u8]) -> Result<Vec<Self::Page>> {
        Ok(vec![BrokenPage])
    }
}

/// Test that a page-level failure carries the cause
#[test]
fn test_extract_withFailingPage_shouldCarryCause() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "any.pdf", b"%PDF-1.5")?;

    let error = PdfExtractor::with_reader(BrokenReader).extract(&file).unwrap_err();

    assert!(error.to_string().contains("unsupported font encoding"));
    Ok(())
}
