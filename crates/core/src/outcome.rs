//! Per-article results.
//!
//! [`ArticleOutcome`] is tagged so clients that want structure can match on
//! it, while its `Display` keeps the plain-string contract of the batch
//! endpoint: the summary itself, or a readable error in its place.

use std::fmt;

use serde::Serialize;

/// Result of fetching and summarizing one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ArticleOutcome {
    /// The model's summary, unmodified.
    Summary { summary: String },
    /// The page could not be fetched or had no text.
    FetchError { url: String, reason: String },
    /// The model call failed.
    SummaryError { url: String, reason: String },
    /// The task itself failed (panic or cancellation).
    Error { url: String, message: String },
}

impl ArticleOutcome {
    pub fn is_summary(&self) -> bool {
        matches!(self, Self::Summary { .. })
    }

    /// The summary text, if this outcome is a success.
    pub fn summary(&self) -> Option<&str> {
        match self {
            Self::Summary { summary } => Some(summary),
            _ => None,
        }
    }
}

impl fmt::Display for ArticleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Summary { summary } => f.write_str(summary),
            Self::FetchError { url, .. } => write!(f, "Error fetching articles from {url}"),
            Self::SummaryError { url, .. } => write!(f, "Error generating summary for {url}"),
            Self::Error { message, .. } => write!(f, "Error processing article: {message}"),
        }
    }
}

/// Everything known about one processed URL.
#[derive(Debug, Clone)]
pub struct ArticleReport {
    pub url: String,
    /// Extracted article text, present whenever the fetch succeeded.
    pub content: Option<String>,
    pub outcome: ArticleOutcome,
}

impl ArticleReport {
    pub(crate) fn failed(url: String, message: String) -> Self {
        let outcome = ArticleOutcome::Error { url: url.clone(), message };
        Self { url, content: None, outcome }
    }
}

/// A report tagged with the zero-based input position it belongs to.
#[derive(Debug, Clone)]
pub struct CompletedArticle {
    pub position: usize,
    pub report: ArticleReport,
}
