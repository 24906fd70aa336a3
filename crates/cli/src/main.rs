use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, bail};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use owo_colors::OwoColorize;
use precis_core::{ArticleOutcome, ArticleService, PrecisConfig, PrecisConfigBuilder, run_batch, wrap_text};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod dashboard;
mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for one-shot summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Fetch web articles and summarize them with a language model
#[derive(Parser, Debug)]
#[command(name = "precis")]
#[command(version)]
#[command(about = "Summarize web articles and chat about them", long_about = None)]
struct Args {
    /// Article URLs to summarize
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// Prompt for URLs, stream summaries as they finish, then chat about them
    #[arg(short, long, conflicts_with = "urls")]
    interactive: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// HTTP timeout for page fetches in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// API key for the language model
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, value_name = "KEY")]
    api_key: Option<String>,

    /// Root of an OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL", value_name = "URL")]
    base_url: Option<String>,

    /// Chat model name
    #[arg(long, env = "PRECIS_MODEL", value_name = "MODEL")]
    model: Option<String>,

    /// Language summaries are written in
    #[arg(long, env = "PRECIS_SUMMARY_LANGUAGE", value_name = "LANG")]
    language: Option<String>,

    /// Articles processed at once
    #[arg(long, value_name = "NUM")]
    max_concurrency: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

impl Args {
    /// Environment configuration with command line overrides applied.
    fn config(&self) -> anyhow::Result<PrecisConfig> {
        let base = PrecisConfig::from_env().context("Failed to read configuration")?;
        let mut builder = PrecisConfigBuilder::from_config(base);

        if let Some(key) = self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            builder = builder.api_key(key);
        }
        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url.as_str());
        }
        if let Some(model) = &self.model {
            builder = builder.model(model.as_str());
        }
        if let Some(language) = &self.language {
            builder = builder.language(language.as_str());
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        if let Some(max) = self.max_concurrency {
            builder = builder.max_concurrency(max);
        }

        let config = builder.build();
        config.batch.validate().context("Invalid --max-concurrency")?;
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "precis_core=debug,precis=debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Renders ordered outcomes as numbered, wrapped text blocks.
fn render_text(outcomes: &[ArticleOutcome]) -> String {
    outcomes
        .iter()
        .enumerate()
        .map(|(i, outcome)| {
            let body = wrap_text(&outcome.to_string(), echo::WRAP_WIDTH);
            format!("Article {}\n{}\n", i + 1, body)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_json(outcomes: &[ArticleOutcome]) -> anyhow::Result<String> {
    let summaries: Vec<String> = outcomes.iter().map(ToString::to_string).collect();
    let json = serde_json::to_string_pretty(&serde_json::json!({ "summaries": summaries }))
        .context("Failed to serialize summaries")?;
    Ok(json + "\n")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "precis", &mut io::stdout());
        return Ok(());
    }

    init_tracing(args.verbose);

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let config = args.config()?;
    if config.llm.api_key.is_none() {
        echo::print_warning("OPENAI_API_KEY is not set; summaries will fail until it is");
    }

    let service = ArticleService::from_config(&config).context("Failed to build article service")?;

    if args.interactive {
        return dashboard::run(&service, &config.batch).await;
    }

    if args.urls.is_empty() {
        bail!("No article URLs provided.");
    }

    if args.verbose {
        echo::print_step(1, 2, &format!("Summarizing {} article(s)", args.urls.len()));
    }

    let started = Instant::now();
    let outcomes = run_batch(&service, &args.urls, &config.batch).await.context("Batch failed")?;

    if args.verbose {
        echo::print_timing("Batch", started.elapsed());
        let failed = outcomes.iter().filter(|o| !o.is_summary()).count();
        eprintln!("  {} {}", "Failed:".dimmed(), failed.to_string().bright_white());
        eprintln!();
        echo::print_step(2, 2, "Writing output");
    }

    let output = match args.format {
        OutputFormat::Text => render_text(&outcomes),
        OutputFormat::Json => render_json(&outcomes)?,
    };

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("TXT".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("markdown".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_text_numbers_articles() {
        let outcomes = vec![
            ArticleOutcome::Summary { summary: "Greeting.".to_string() },
            ArticleOutcome::FetchError { url: "http://bad.test/2".to_string(), reason: "500".to_string() },
        ];

        let text = render_text(&outcomes);
        assert_eq!(text, "Article 1\nGreeting.\n\nArticle 2\nError fetching articles from http://bad.test/2\n");
    }

    #[test]
    fn test_render_json_keeps_order() {
        let outcomes = vec![
            ArticleOutcome::SummaryError { url: "http://a.test/1".to_string(), reason: "429".to_string() },
            ArticleOutcome::Summary { summary: "Done.".to_string() },
        ];

        let json: serde_json::Value = serde_json::from_str(&render_json(&outcomes).unwrap()).unwrap();
        assert_eq!(json["summaries"][0], "Error generating summary for http://a.test/1");
        assert_eq!(json["summaries"][1], "Done.");
    }

    #[test]
    fn test_args_verify() {
        Args::command().debug_assert();
    }
}
