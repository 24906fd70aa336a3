//! Interactive dashboard: collect URLs, stream summaries, then chat.

use std::time::Instant;

use anyhow::{Context, bail};
use dialoguer::Input;
use futures::StreamExt;
use owo_colors::OwoColorize;
use precis_core::{ArticleReport, ArticleService, BatchConfig, run_unordered, wrap_text};

use crate::echo::{self, WRAP_WIDTH};

/// Most URL fields the dashboard asks for in one session.
pub const MAX_ARTICLES: usize = 50;

/// A URL together with the field number it was typed into.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    number: usize,
    url: String,
}

pub async fn run(service: &ArticleService, batch: &BatchConfig) -> anyhow::Result<()> {
    let entries = prompt_entries()?;
    if entries.is_empty() {
        bail!("No article URLs provided.");
    }

    let articles = summarize_all(service, &entries, batch).await?;
    chat_loop(service, &entries, &articles).await
}

fn check_count(count: usize) -> Result<(), String> {
    if (1..=MAX_ARTICLES).contains(&count) {
        Ok(())
    } else {
        Err(format!("Enter a number between 1 and {}", MAX_ARTICLES))
    }
}

/// Numbers the typed fields from 1 and drops the blank ones.
fn collect_entries(fields: impl IntoIterator<Item = String>) -> Vec<Entry> {
    fields
        .into_iter()
        .enumerate()
        .filter_map(|(i, field)| {
            let url = field.trim();
            (!url.is_empty()).then(|| Entry { number: i + 1, url: url.to_string() })
        })
        .collect()
}

fn prompt_entries() -> anyhow::Result<Vec<Entry>> {
    let count: usize = Input::new()
        .with_prompt("How many articles")
        .default(1)
        .validate_with(|n: &usize| check_count(*n))
        .interact_text()
        .context("Failed to read article count")?;

    let mut fields = Vec::new();
    for i in 1..=count {
        let url: String = Input::new()
            .with_prompt(format!("Article URL {}", i))
            .allow_empty(true)
            .interact_text()
            .with_context(|| format!("Failed to read article URL {}", i))?;
        fields.push(url);
    }

    Ok(collect_entries(fields))
}

/// Renders each article as it completes and returns the reports by input position.
async fn summarize_all(
    service: &ArticleService, entries: &[Entry], batch: &BatchConfig,
) -> anyhow::Result<Vec<Option<ArticleReport>>> {
    let started = Instant::now();
    let urls: Vec<String> = entries.iter().map(|e| e.url.clone()).collect();
    let mut articles: Vec<Option<ArticleReport>> = vec![None; urls.len()];
    let mut stream = run_unordered(service, &urls, batch).context("Failed to start batch")?;

    let pb = echo::spinner(&format!("Summarizing 0/{} articles", urls.len()))?;
    let mut done = 0;

    while let Some(completed) = stream.next().await {
        done += 1;
        let report = completed.report;
        let number = entries.get(completed.position).map_or(completed.position + 1, |e| e.number);
        pb.println(echo::render_article(number, &report.url, &report.outcome));
        pb.set_message(format!("Summarizing {}/{} articles", done, urls.len()));

        if let Some(slot) = articles.get_mut(completed.position) {
            *slot = Some(report);
        }
    }

    pb.finish_and_clear();
    echo::print_timing("Summarized", started.elapsed());

    Ok(articles)
}

async fn chat_loop(
    service: &ArticleService, entries: &[Entry], articles: &[Option<ArticleReport>],
) -> anyhow::Result<()> {
    echo::print_info("Ask about an article. Leave the article number empty to quit.");
    let numbers = entries.iter().map(|e| e.number.to_string()).collect::<Vec<_>>().join(", ");

    loop {
        let choice: String = Input::new()
            .with_prompt(format!("Article number ({})", numbers))
            .allow_empty(true)
            .interact_text()
            .context("Failed to read article number")?;

        let choice = choice.trim();
        if choice.is_empty() {
            return Ok(());
        }

        let Some((number, position)) = find_article(choice, entries) else {
            echo::print_warning(&format!("Choose one of: {}", numbers));
            continue;
        };

        let Some(content) = articles.get(position).and_then(Option::as_ref).and_then(|r| r.content.as_deref())
        else {
            echo::print_warning(&format!("Article {} has no content to chat about", number));
            continue;
        };

        let question: String = Input::new()
            .with_prompt("Question")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read question")?;

        if question.trim().is_empty() {
            return Ok(());
        }

        let pb = echo::spinner("Thinking")?;
        let answer = service.chat(number, content, &question).await;
        pb.finish_and_clear();

        println!("\n{}\n{}\n", "Answer".bold().green(), wrap_text(&answer, WRAP_WIDTH));
    }
}

/// Resolves a typed article number to `(number, batch position)`.
fn find_article(input: &str, entries: &[Entry]) -> Option<(usize, usize)> {
    let number = input.parse::<usize>().ok()?;
    entries.iter().position(|e| e.number == number).map(|position| (number, position))
}
