use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use precis_core::{ArticleOutcome, wrap_text};

use crate::VERSION;

/// Column width summaries and answers are wrapped at.
pub const WRAP_WIDTH: usize = 150;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!("\n{} {} {}", "Precis".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "Summarize web articles and ask about them\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print timing information with color coding
pub fn print_timing(label: &str, duration: Duration) {
    let secs = duration.as_secs_f64();
    let indicator = if secs < 5.0 {
        "fast".dimmed().to_string()
    } else if secs < 20.0 {
        "moderate".bright_yellow().to_string()
    } else {
        "slow".bright_red().to_string()
    };

    eprintln!("  {} {:>8.2}s ({})", format!("{}:", label).dimmed(), secs, indicator);
}

/// Heading plus wrapped body for one article, as shown on the dashboard.
pub fn render_article(number: usize, url: &str, outcome: &ArticleOutcome) -> String {
    let heading = format!("Article {}", number);
    let body = wrap_text(&outcome.to_string(), WRAP_WIDTH);
    let body = if outcome.is_summary() { body } else { body.bright_red().to_string() };

    format!("\n{} {}\n{}\n", heading.bold().cyan(), url.dimmed(), body)
}

/// Spinner shown while articles are being summarized.
pub fn spinner(message: &str) -> anyhow::Result<ProgressBar> {
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")?.tick_strings(&[
        "▁▁▁▁▁", "▁▂▂▂▁", "▁▄▂▄▁", "▂▄▆▄▂", "▄▆█▆▄", "▂▄▆▄▂", "▁▄▂▄▁", "▁▂▂▂▁",
    ]);

    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}
