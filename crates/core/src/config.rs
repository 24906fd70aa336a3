//! Process-wide configuration.
//!
//! [`PrecisConfig`] gathers the settings of every component. Binaries build it
//! from the environment with [`PrecisConfig::from_env`] and then override
//! individual values from their own flags through the builder.
//!
//! # Example
//!
//! ```rust
//! use precis_core::PrecisConfig;
//!
//! let config = PrecisConfig::builder()
//!     .model("gpt-4o-mini")
//!     .language("French")
//!     .max_concurrency(4)
//!     .build();
//!
//! assert_eq!(config.llm.model, "gpt-4o-mini");
//! assert_eq!(config.batch.max_concurrency, 4);
//! ```

use crate::batch::BatchConfig;
use crate::chat::ChatConfig;
use crate::fetch::FetchConfig;
use crate::llm::OpenAiConfig;
use crate::summarize::SummarizerConfig;
use crate::{PrecisError, Result};

/// Secret for the language model API.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Root of an OpenAI-compatible API.
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
/// Chat model name.
pub const MODEL_VAR: &str = "PRECIS_MODEL";
/// Language summaries are written in.
pub const LANGUAGE_VAR: &str = "PRECIS_SUMMARY_LANGUAGE";
/// Concurrency cap per batch.
pub const MAX_CONCURRENCY_VAR: &str = "PRECIS_MAX_CONCURRENCY";

/// Settings for fetching, summarizing, chatting and batching.
#[derive(Debug, Clone, Default)]
pub struct PrecisConfig {
    pub fetch: FetchConfig,
    pub llm: OpenAiConfig,
    pub summarizer: SummarizerConfig,
    pub chat: ChatConfig,
    pub batch: BatchConfig,
}

impl PrecisConfig {
    pub fn builder() -> PrecisConfigBuilder {
        PrecisConfigBuilder::new()
    }

    /// Reads configuration from process environment variables.
    ///
    /// A missing API key is accepted here; model calls fail later instead.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut builder = PrecisConfigBuilder::new();

        if let Some(api_key) = value(API_KEY_VAR) {
            builder = builder.api_key(api_key);
        }
        if let Some(base_url) = value(BASE_URL_VAR) {
            builder = builder.base_url(base_url);
        }
        if let Some(model) = value(MODEL_VAR) {
            builder = builder.model(model);
        }
        if let Some(language) = value(LANGUAGE_VAR) {
            builder = builder.language(language);
        }
        if let Some(raw) = value(MAX_CONCURRENCY_VAR) {
            let max = raw
                .parse::<usize>()
                .map_err(|e| PrecisError::ConfigError(format!("{MAX_CONCURRENCY_VAR}={raw}: {e}")))?;
            builder = builder.max_concurrency(max);
        }

        let config = builder.build();
        config.batch.validate()?;
        Ok(config)
    }
}

/// Builder for [`PrecisConfig`].
pub struct PrecisConfigBuilder {
    config: PrecisConfig,
}

impl PrecisConfigBuilder {
    pub fn new() -> Self {
        Self { config: PrecisConfig::default() }
    }

    /// Starts from an existing configuration.
    pub fn from_config(config: PrecisConfig) -> Self {
        Self { config }
    }

    pub fn api_key(mut self, value: impl Into<String>) -> Self {
        self.config.llm.api_key = Some(value.into());
        self
    }

    pub fn base_url(mut self, value: impl Into<String>) -> Self {
        self.config.llm.base_url = value.into();
        self
    }

    pub fn model(mut self, value: impl Into<String>) -> Self {
        self.config.llm.model = value.into();
        self
    }

    pub fn language(mut self, value: impl Into<String>) -> Self {
        self.config.summarizer.language = value.into();
        self
    }

    /// Sets the HTTP timeout for page fetches, in seconds.
    pub fn timeout(mut self, value: u64) -> Self {
        self.config.fetch.timeout = value;
        self
    }

    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    pub fn max_input_chars(mut self, value: usize) -> Self {
        self.config.summarizer.max_input_chars = value;
        self
    }

    pub fn chunk_chars(mut self, value: usize) -> Self {
        self.config.summarizer.chunk_chars = value;
        self
    }

    pub fn max_concurrency(mut self, value: usize) -> Self {
        self.config.batch.max_concurrency = value;
        self
    }

    pub fn build(self) -> PrecisConfig {
        self.config
    }
}

impl Default for PrecisConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
