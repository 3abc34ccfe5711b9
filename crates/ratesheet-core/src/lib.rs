pub mod diff;
pub mod error;
pub mod extraction;
pub mod fetch;
pub mod model;
pub mod normalize;
pub mod parsing;
pub mod providers;
pub mod report;
pub mod snapshot;

use diff::ComparisonSummary;
use error::RateError;
use extraction::TextExtractor;
use model::ParsedDocument;
use parsing::RateSheetParser;

/// Main API entry point: extract a rate sheet PDF and parse it.
///
/// Only extraction can fail; sections or fields that cannot be found come
/// back absent or null.
pub fn parse_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn TextExtractor,
    parser: &RateSheetParser,
) -> Result<ParsedDocument, RateError> {
    let text = extraction::extract_text(extractor, pdf_bytes)?;
    let doc = parser.parse(&text);
    tracing::info!(
        standard = doc.residential_standard.is_present,
        supplemental = doc.residential_supplemental.is_present,
        seasonal = doc.residential_seasonal.is_present,
        tou = doc.residential_tou.is_present,
        "parsed rate sheet"
    );
    Ok(doc)
}

/// Parse a PDF and project it onto the comparison summary.
pub fn summarize_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn TextExtractor,
    parser: &RateSheetParser,
) -> Result<ComparisonSummary, RateError> {
    Ok(diff::summarize(&parse_pdf(pdf_bytes, extractor, parser)?))
}
