//! Plain-text extraction from article HTML.
//!
//! Articles are reduced to the text of their `<p>` elements: each paragraph is
//! trimmed, empty paragraphs are dropped, and the rest are joined with a
//! single space. Navigation, scripts and markup outside paragraphs never reach
//! the summarizer.

use crate::parse::Document;
use crate::{PrecisError, Result};

/// Extracts paragraph text from an HTML string.
///
/// # Errors
///
/// Returns [`PrecisError::NoContent`] when the page has no non-empty paragraph.
///
/// # Example
///
/// ```rust
/// use precis_core::extract_text;
///
/// let html = "<p> Hello </p><p></p><p>world.</p>";
/// assert_eq!(extract_text(html).unwrap(), "Hello world.");
/// ```
pub fn extract_text(html: &str) -> Result<String> {
    extract_document_text(&Document::parse(html))
}

/// Extracts paragraph text from an already parsed document.
pub fn extract_document_text(doc: &Document) -> Result<String> {
    let paragraphs: Vec<String> = doc
        .select("p")?
        .iter()
        .map(|p| p.text().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();

    let contents = paragraphs.join(" ");
    if contents.is_empty() { Err(PrecisError::NoContent) } else { Ok(contents) }
}
