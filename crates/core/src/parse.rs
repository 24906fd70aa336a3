//! Parsed HTML pages.
//!
//! A thin layer over `scraper`: [`Document`] owns the parsed tree and answers
//! CSS selector queries with borrowed [`Element`]s.
//!
//! # Example
//!
//! ```rust
//! use precis_core::parse::Document;
//!
//! let doc = Document::parse("<title>Launch notes</title><p>First.</p><p>Second.</p>");
//! assert_eq!(doc.title().as_deref(), Some("Launch notes"));
//! assert_eq!(doc.select("p").unwrap().len(), 2);
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{PrecisError, Result};

pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a full page. Broken markup is repaired the way a browser would,
    /// so parsing itself cannot fail.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Returns every element matching `selector`, in document order.
    ///
    /// # Errors
    ///
    /// [`PrecisError::HtmlParseError`] for a selector `scraper` rejects.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'_>>> {
        let selector = compile(selector)?;
        Ok(self.html.select(&selector).map(Element).collect())
    }

    /// Trimmed `<title>` text, if the page has a non-blank one.
    pub fn title(&self) -> Option<String> {
        let selector = compile("title").ok()?;
        let title = self.html.select(&selector).next()?.text().collect::<String>();
        let title = title.trim();
        (!title.is_empty()).then(|| title.to_string())
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| PrecisError::HtmlParseError(format!("Invalid selector {selector:?}: {e}")))
}

/// An element borrowed from a [`Document`].
#[derive(Clone, Copy, Debug)]
pub struct Element<'a>(ElementRef<'a>);

impl Element<'_> {
    /// Text of every descendant text node, concatenated as-is.
    pub fn text(&self) -> String {
        self.0.text().collect()
    }
}
