//! Error types for Precis operations.
//!
//! This module defines the main error type [`PrecisError`] which represents
//! everything that can go wrong while fetching an article, extracting its
//! text, talking to the language model, or running a batch.
//!
//! Per-article failures never escape a batch as errors. The fan-out runner
//! turns them into [`crate::ArticleOutcome`] values, so only batch-level
//! problems ([`PrecisError::EmptyBatch`], [`PrecisError::ConfigError`]) reach
//! callers of [`crate::run_batch`].
//!
//! # Example
//!
//! ```rust
//! use precis_core::{PrecisError, Result};
//!
//! fn first_url(urls: &[String]) -> Result<&str> {
//!     urls.first().map(String::as_str).ok_or(PrecisError::EmptyBatch)
//! }
//! ```

use thiserror::Error;

/// Main error type for fetch, summarize and batch operations.
#[derive(Error, Debug)]
pub enum PrecisError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other transport-level problems.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or does not use http(s).
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// HTML parsing errors, usually an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// The page had no paragraph text to summarize.
    #[error("No content could be extracted from the document")]
    NoContent,

    /// No API key was configured for the language model.
    #[error("No API key configured for the language model")]
    MissingApiKey,

    /// The language model API rejected the request.
    #[error("Language model request failed with status {status}: {message}")]
    LlmError { status: u16, message: String },

    /// The language model answered without any text.
    #[error("Language model returned an empty completion")]
    EmptyCompletion,

    /// A chat question was blank.
    #[error("Question must not be empty")]
    EmptyQuestion,

    /// A batch was submitted without any URLs.
    #[error("No article URLs provided.")]
    EmptyBatch,

    /// The task driving a batch died before returning its outcomes.
    #[error("Batch aborted: {0}")]
    BatchAborted(String),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The language model answered with a body that is not a chat completion.
    #[error("Malformed completion response: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for PrecisError.
pub type Result<T> = std::result::Result<T, PrecisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PrecisError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_http_status_error() {
        let err = PrecisError::HttpStatus { status: 404, url: "http://a.test/".to_string() };
        assert_eq!(err.to_string(), "HTTP 404 for http://a.test/");
    }

    #[test]
    fn test_empty_batch_message() {
        assert_eq!(PrecisError::EmptyBatch.to_string(), "No article URLs provided.");
    }

    #[test]
    fn test_timeout_error() {
        let err = PrecisError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }
}
