//! The article processing service shared by every entry point.
//!
//! [`ArticleService`] is built once at startup and cloned into request
//! handlers and batch tasks. Clones share the same HTTP and model clients.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::Result;
use crate::chat::ArticleChat;
use crate::config::PrecisConfig;
use crate::fetch::{ContentSource, HttpFetcher};
use crate::llm::{LanguageModel, OpenAiClient};
use crate::outcome::{ArticleOutcome, ArticleReport};
use crate::summarize::Summarizer;

#[derive(Clone)]
pub struct ArticleService {
    source: Arc<dyn ContentSource>,
    summarizer: Summarizer,
    chat: ArticleChat,
}

impl ArticleService {
    /// Wires a service from explicit collaborators.
    pub fn new(source: Arc<dyn ContentSource>, model: Arc<dyn LanguageModel>, config: &PrecisConfig) -> Self {
        Self {
            source,
            summarizer: Summarizer::new(Arc::clone(&model), config.summarizer.clone()),
            chat: ArticleChat::new(model, config.chat.clone()),
        }
    }

    /// Builds the HTTP fetcher and OpenAI client described by `config`.
    pub fn from_config(config: &PrecisConfig) -> Result<Self> {
        let source = Arc::new(HttpFetcher::new(config.fetch.clone())?);
        let model = Arc::new(OpenAiClient::new(config.llm.clone())?);
        Ok(Self::new(source, model, config))
    }

    /// Fetches `url` and returns its extracted text.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        self.source.fetch(url).await
    }

    /// Summarizes article text.
    pub async fn summarize(&self, text: &str) -> Result<String> {
        self.summarizer.summarize(text).await
    }

    /// Fetches and summarizes one URL. Never fails; errors become outcomes.
    pub async fn process(&self, url: &str) -> ArticleReport {
        let content = match self.fetch_text(url).await {
            Ok(content) => content,
            Err(err) => {
                warn!(url, error = %err, "error fetching article");
                return ArticleReport {
                    url: url.to_string(),
                    content: None,
                    outcome: ArticleOutcome::FetchError { url: url.to_string(), reason: err.to_string() },
                };
            }
        };

        let outcome = match self.summarize(&content).await {
            Ok(summary) => {
                debug!(url, "summary generated");
                ArticleOutcome::Summary { summary }
            }
            Err(err) => {
                warn!(url, error = %err, "error generating summary");
                ArticleOutcome::SummaryError { url: url.to_string(), reason: err.to_string() }
            }
        };

        ArticleReport { url: url.to_string(), content: Some(content), outcome }
    }

    /// Answers a question about an article's text.
    ///
    /// Failures come back as an error message rather than an `Err`.
    pub async fn chat(&self, article: usize, content: &str, question: &str) -> String {
        self.chat.answer(article, content, question).await
    }
}
