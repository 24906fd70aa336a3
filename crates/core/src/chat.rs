//! Follow-up questions about a summarized article.

use std::sync::Arc;

use tracing::warn;

use crate::llm::{CompletionRequest, LanguageModel};
use crate::summarize::truncate_chars;
use crate::{PrecisError, Result};

/// Chat prompt settings.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Leading characters of the article included in the prompt (default: 300).
    pub excerpt_chars: usize,
    /// Token bound for the answer (default: 150).
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { excerpt_chars: 300, max_tokens: 150, temperature: 0.7 }
    }
}

/// Builds the prompt for a question about article number `article`.
pub fn build_chat_prompt(article: usize, content: &str, question: &str, excerpt_chars: usize) -> String {
    let excerpt = truncate_chars(content, excerpt_chars);
    format!("Chat with AI about the content of Article {article}: {excerpt}... Question: {question}")
}

/// Answers questions about an article with a [`LanguageModel`].
#[derive(Clone)]
pub struct ArticleChat {
    model: Arc<dyn LanguageModel>,
    config: ChatConfig,
}

impl ArticleChat {
    pub fn new(model: Arc<dyn LanguageModel>, config: ChatConfig) -> Self {
        Self { model, config }
    }

    /// Asks `question` about `content`.
    ///
    /// # Errors
    ///
    /// [`PrecisError::EmptyQuestion`] for a blank question, otherwise whatever
    /// the model call returns. Answers come back trimmed.
    pub async fn ask(&self, article: usize, content: &str, question: &str) -> Result<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(PrecisError::EmptyQuestion);
        }

        let request = CompletionRequest::new(build_chat_prompt(article, content, question, self.config.excerpt_chars))
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature);
        let answer = self.model.complete(&request).await?;
        Ok(answer.trim().to_string())
    }

    /// Like [`ArticleChat::ask`], with failures rendered as a message.
    pub async fn answer(&self, article: usize, content: &str, question: &str) -> String {
        match self.ask(article, content, question).await {
            Ok(answer) => answer,
            Err(err) => {
                warn!(article, error = %err, "chat request failed");
                format!("Error generating chat response. Details: {err}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_uses_excerpt() {
        let content = "x".repeat(500);
        let prompt = build_chat_prompt(2, &content, "Why?", 300);

        assert!(prompt.starts_with("Chat with AI about the content of Article 2: "));
        assert!(prompt.ends_with("... Question: Why?"));
        assert_eq!(prompt.matches('x').count(), 300);
    }

    #[test]
    fn test_prompt_short_content() {
        let prompt = build_chat_prompt(1, "Short.", "Who?", 300);
        assert_eq!(prompt, "Chat with AI about the content of Article 1: Short.... Question: Who?");
    }

    #[test]
    fn test_chat_config_default() {
        let config = ChatConfig::default();
        assert_eq!(config.excerpt_chars, 300);
        assert_eq!(config.max_tokens, 150);
    }
}
