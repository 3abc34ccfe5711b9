pub mod pdftotext;

use crate::error::RateError;

/// Text extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageText {
    pub page_number: usize,
    pub text: String,
}

/// Trait for PDF text extraction backends.
pub trait TextExtractor: Send + Sync {
    /// Extract text from PDF bytes, returning one PageText per page in page order.
    ///
    /// Unreadable pages yield empty text rather than an error.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, RateError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Extract the whole document as one string, pages joined by newlines.
pub fn extract_text(extractor: &dyn TextExtractor, pdf_bytes: &[u8]) -> Result<String, RateError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    tracing::debug!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        "extracted document text"
    );
    Ok(pages
        .into_iter()
        .map(|p| p.text)
        .collect::<Vec<_>>()
        .join("\n"))
}
