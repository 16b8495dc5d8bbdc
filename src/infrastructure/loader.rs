use std::path::Path;
use tracing::instrument;

use crate::domain::{DomainError, Result, TextUnit};

/// Wraps inline text as a one-element unit sequence, verbatim.
pub fn load_inline(text: &str) -> Vec<TextUnit> {
    vec![TextUnit::inline(text)]
}

/// Extracts a PDF's text page-by-page, in page order.
///
/// The returned sequence has one unit per page, blank pages included, so its
/// length always equals the page count. Fails when the document has no pages
/// or no page carries extractable text (e.g. scanned images with no text
/// layer; there is no OCR fallback).
#[instrument]
pub fn load_pdf(path: &Path) -> Result<Vec<TextUnit>> {
    let pages = pdf_extract::extract_text_by_pages(path).map_err(|e| {
        DomainError::empty_source(format!(
            "could not extract text from {}: {e}",
            path.display()
        ))
    })?;

    units_from_pages(pages)
}

fn units_from_pages(pages: Vec<String>) -> Result<Vec<TextUnit>> {
    let units: Vec<TextUnit> = pages
        .into_iter()
        .enumerate()
        .map(|(i, text)| TextUnit::page(text, i + 1))
        .collect();

    if units.iter().all(TextUnit::is_blank) {
        return Err(DomainError::empty_source(
            "document contains no extractable text",
        ));
    }

    Ok(units)
}
