//! Inspect command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::corpus::{loader, prepare_records, CorpusStats, TicketFilter};
use anyhow::Result;

/// Run the inspect command. Reads the spreadsheet without calling the provider.
pub fn run_inspect(
    file: &str,
    priority: Option<String>,
    status: Option<String>,
    limit: usize,
    settings: &Settings,
) -> Result<()> {
    let path = Settings::expand_path(file);
    preflight::check(Operation::Inspect, settings, Some(path.as_path()))?;

    let records = match loader::read_table(&path).and_then(|t| prepare_records(&t)) {
        Ok(records) => records,
        Err(e) => {
            Output::error(&format!("Failed to read tickets: {}", e));
            return Err(e.into());
        }
    };

    Output::header(&format!("Ticket History ({})", path.display()));
    println!();
    Output::stats(&CorpusStats::from_records(&records));

    let filter = TicketFilter::new(priority, status);
    let matching: Vec<_> = records.iter().filter(|r| filter.matches(r)).collect();

    if matching.is_empty() {
        Output::warning("No tickets match the selected filters.");
        return Ok(());
    }

    if !filter.is_empty() {
        println!();
        Output::info(&format!("{} tickets match the selected filters", matching.len()));
    }

    for record in matching.iter().take(limit) {
        Output::ticket(record, None);
    }

    if matching.len() > limit {
        println!();
        Output::info(&format!("... and {} more", matching.len() - limit));
    }

    Ok(())
}
