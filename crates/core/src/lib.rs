pub mod batch;
pub mod chat;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod llm;
pub mod outcome;
pub mod parse;
pub mod service;
pub mod summarize;
pub mod text;

pub use batch::{BatchConfig, run_batch, run_unordered};
pub use chat::{ArticleChat, ChatConfig, build_chat_prompt};
pub use config::{PrecisConfig, PrecisConfigBuilder};
pub use error::{PrecisError, Result};
pub use extract::{extract_document_text, extract_text};
pub use fetch::{ContentSource, FetchConfig, HttpFetcher};
pub use llm::{CompletionRequest, LanguageModel, OpenAiClient, OpenAiConfig};
pub use outcome::{ArticleOutcome, ArticleReport, CompletedArticle};
pub use parse::Document;
pub use service::ArticleService;
pub use summarize::{
    CONCISE_SUMMARY_TEMPLATE, PreparedInput, Summarizer, SummarizerConfig, SummaryStrategy, prepare_input,
    render_prompt, split_chunks, truncate_chars,
};
pub use text::wrap_text;
