//! CLI output formatting utilities.

use crate::corpus::{CorpusStats, TicketRecord};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a matched ticket.
    pub fn ticket(record: &TicketRecord, score: Option<f32>) {
        let score = score
            .map(|s| format!(" (score: {:.2})", s))
            .unwrap_or_default();
        println!(
            "\n{} {} [{} / {}] {}{}",
            style(">>").green(),
            style(&record.id).bold(),
            style(&record.status).cyan(),
            style(&record.priority).yellow(),
            style(&record.customer).dim(),
            score
        );
        println!("   {}", content_preview(&record.summary, 200));
        if !record.comments.trim().is_empty() {
            println!("   {}", style(content_preview(&record.comments, 200)).dim());
        }
    }

    /// Print corpus statistics.
    pub fn stats(stats: &CorpusStats) {
        Output::kv("Tickets", &stats.total.to_string());
        Output::kv("Resolved", &stats.resolved.to_string());
        for (label, counts) in [("Status", &stats.by_status), ("Priority", &stats.by_priority)] {
            let summary = counts
                .iter()
                .map(|(k, v)| format!("{} {}", if k.is_empty() { "(blank)" } else { k.as_str() }, v))
                .collect::<Vec<_>>()
                .join(", ");
            Output::kv(label, &summary);
        }
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Truncate content with ellipsis, on a char boundary.
fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        let truncated: String = content.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}
