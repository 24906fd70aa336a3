//! Summary generation.
//!
//! A single model call has a fixed context window, so article text is first
//! capped at [`SummarizerConfig::max_input_chars`]. Input shorter than the cap
//! is summarized in one prompt ([`SummaryStrategy::Stuff`]). Input that reaches
//! the cap is split into chunks, each chunk is summarized, and the partial
//! summaries are summarized once more ([`SummaryStrategy::MapReduce`]).

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::debug;

use crate::{PrecisError, Result};
use crate::llm::{CompletionRequest, LanguageModel};

/// Prompt used for every summarization call, map and reduce alike.
pub const CONCISE_SUMMARY_TEMPLATE: &str =
    "Write a concise summary of the following:\n\n{text}\n\nCONCISE SUMMARY IN {language}:";

/// Summarizer limits and prompt settings.
#[derive(Debug, Clone)]
pub struct SummarizerConfig {
    /// Characters of article text submitted at most (default: 4097).
    pub max_input_chars: usize,
    /// Characters per chunk in the map stage (default: 2000).
    pub chunk_chars: usize,
    /// Language the summary is written in (default: English).
    pub language: String,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self { max_input_chars: 4097, chunk_chars: 2000, language: "English".to_string() }
    }
}

/// How a document is fed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStrategy {
    /// Everything in one prompt.
    Stuff,
    /// Summarize chunks, then summarize the summaries.
    MapReduce,
}

impl SummaryStrategy {
    /// Picks the strategy for a document of `chars` characters.
    pub fn for_length(chars: usize, max_input_chars: usize) -> Self {
        if chars < max_input_chars { Self::Stuff } else { Self::MapReduce }
    }
}

/// Article text after truncation, with the strategy chosen for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedInput<'a> {
    pub text: &'a str,
    pub strategy: SummaryStrategy,
}

/// Caps `text` at `max_input_chars` characters and selects a strategy.
pub fn prepare_input(text: &str, max_input_chars: usize) -> PreparedInput<'_> {
    let text = truncate_chars(text, max_input_chars);
    let strategy = SummaryStrategy::for_length(text.chars().count(), max_input_chars);
    PreparedInput { text, strategy }
}

/// Returns the first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Splits `text` into pieces of at most `chunk_chars` characters.
///
/// Cuts land on the last whitespace inside the window when there is one, so
/// words stay whole unless a single word is longer than a chunk.
pub fn split_chunks(text: &str, chunk_chars: usize) -> Vec<&str> {
    let chunk_chars = chunk_chars.max(1);
    let mut chunks = Vec::new();
    let mut rest = text.trim();

    while !rest.is_empty() {
        let window = truncate_chars(rest, chunk_chars);
        if window.len() == rest.len() {
            chunks.push(rest);
            break;
        }

        let cut = match window.rfind(char::is_whitespace) {
            Some(idx) if idx > 0 => idx,
            _ => window.len(),
        };
        let (head, tail) = rest.split_at(cut);
        chunks.push(head.trim_end());
        rest = tail.trim_start();
    }

    chunks
}

/// Fills the summary template.
pub fn render_prompt(text: &str, language: &str) -> String {
    CONCISE_SUMMARY_TEMPLATE
        .replace("{language}", &language.to_uppercase())
        .replace("{text}", text)
}

/// Produces summaries through a [`LanguageModel`].
#[derive(Clone)]
pub struct Summarizer {
    model: Arc<dyn LanguageModel>,
    config: SummarizerConfig,
}

impl Summarizer {
    pub fn new(model: Arc<dyn LanguageModel>, config: SummarizerConfig) -> Self {
        Self { model, config }
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.config
    }

    /// Summarizes `text`, returning the model output verbatim.
    ///
    /// Any model failure is returned as is; nothing is retried. Long input
    /// made only of whitespace is [`PrecisError::NoContent`].
    pub async fn summarize(&self, text: &str) -> Result<String> {
        let input = prepare_input(text, self.config.max_input_chars);
        debug!(
            chars = input.text.chars().count(),
            strategy = ?input.strategy,
            "summarizing article"
        );

        match input.strategy {
            SummaryStrategy::Stuff => self.summarize_once(input.text).await,
            SummaryStrategy::MapReduce => {
                let chunks = split_chunks(input.text, self.config.chunk_chars);
                if chunks.is_empty() {
                    return Err(PrecisError::NoContent);
                }
                let partials = try_join_all(chunks.iter().map(|chunk| self.summarize_once(chunk))).await?;
                debug!(chunks = partials.len(), "combining partial summaries");
                self.summarize_once(&partials.join("\n\n")).await
            }
        }
    }

    async fn summarize_once(&self, text: &str) -> Result<String> {
        let request = CompletionRequest::new(render_prompt(text, &self.config.language));
        self.model.complete(&request).await
    }
}
