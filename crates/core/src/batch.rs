//! Concurrent fan-out over a list of URLs.
//!
//! Every URL is processed in its own tokio task so a panic in one article
//! cannot take down its siblings. Tasks are admitted through a bounded buffer,
//! which caps how many run at once regardless of how many URLs were sent.
//! The buffer itself runs in a driver task, so a caller that stops waiting
//! does not strand the URLs still queued behind it.
//!
//! [`run_batch`] maps inputs to outputs and keeps input order.
//! [`run_unordered`] yields results as they finish.

use std::any::Any;
use std::future::Future;

use futures::channel::mpsc;
use futures::stream::{self, BoxStream, StreamExt};
use tokio::task::JoinError;
use tracing::{debug, error};

use crate::outcome::{ArticleOutcome, ArticleReport, CompletedArticle};
use crate::service::ArticleService;
use crate::{PrecisError, Result};

/// Fan-out limits.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Articles processed at once per batch (default: 8).
    pub max_concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { max_concurrency: 8 }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrency == 0 {
            return Err(PrecisError::ConfigError("max_concurrency must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Processes every URL and returns one outcome per URL, in input order.
///
/// The batch is driven by its own task, so every URL still runs if this
/// future is dropped before it resolves.
///
/// # Errors
///
/// [`PrecisError::EmptyBatch`] when `urls` is empty, before any work starts;
/// [`PrecisError::ConfigError`] for an invalid [`BatchConfig`].
pub async fn run_batch(service: &ArticleService, urls: &[String], config: &BatchConfig) -> Result<Vec<ArticleOutcome>> {
    check_batch(urls, config)?;
    debug!(urls = urls.len(), max_concurrency = config.max_concurrency, "starting batch");

    let service = service.clone();
    let urls = urls.to_vec();
    let limit = config.max_concurrency;

    let driver = tokio::spawn(async move {
        stream::iter(urls)
            .map(|url| spawn_article(service.clone(), url))
            .buffered(limit)
            .map(|report| report.outcome)
            .collect::<Vec<ArticleOutcome>>()
            .await
    });

    driver.await.map_err(|err| PrecisError::BatchAborted(join_error_message(err)))
}

/// Processes every URL and yields each report as soon as it is ready.
///
/// Like [`run_batch`], the work outlives the returned stream: dropping it
/// stops delivery, not processing.
///
/// # Errors
///
/// Same as [`run_batch`]; validation happens before the stream is returned.
pub fn run_unordered(
    service: &ArticleService, urls: &[String], config: &BatchConfig,
) -> Result<BoxStream<'static, CompletedArticle>> {
    check_batch(urls, config)?;

    let service = service.clone();
    let urls = urls.to_vec();
    let limit = config.max_concurrency;
    let (tx, rx) = mpsc::unbounded();

    tokio::spawn(async move {
        let mut completed = stream::iter(urls.into_iter().enumerate())
            .map(|(position, url)| {
                let report = spawn_article(service.clone(), url);
                async move { CompletedArticle { position, report: report.await } }
            })
            .buffer_unordered(limit);

        while let Some(article) = completed.next().await {
            // The receiver may be gone; keep draining so every URL runs.
            let _ = tx.unbounded_send(article);
        }
    });

    Ok(rx.boxed())
}

fn check_batch(urls: &[String], config: &BatchConfig) -> Result<()> {
    if urls.is_empty() {
        return Err(PrecisError::EmptyBatch);
    }
    config.validate()
}

/// Spawns the pipeline for one URL and turns a failed task into an outcome.
fn spawn_article(service: ArticleService, url: String) -> impl Future<Output = ArticleReport> + Send + 'static {
    let task_url = url.clone();
    let handle = tokio::spawn(async move { service.process(&task_url).await });

    async move {
        match handle.await {
            Ok(report) => report,
            Err(err) => {
                let message = join_error_message(err);
                error!(url = %url, error = %message, "article task failed");
                ArticleReport::failed(url, message)
            }
        }
    }
}

fn join_error_message(err: JoinError) -> String {
    if err.is_cancelled() {
        return "task was cancelled".to_string();
    }
    match err.try_into_panic() {
        Ok(payload) => panic_message(payload.as_ref()),
        Err(err) => err.to_string(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "task panicked".to_string()
    }
}
