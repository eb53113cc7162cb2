//! Search command implementation.

use super::load_session;
use crate::cli::preflight::{self, Operation};
use crate::cli::{Output, QueryArgs};
use crate::config::Settings;
use anyhow::Result;

/// Run the search command.
pub async fn run_search(file: &str, query: &str, args: &QueryArgs, settings: Settings) -> Result<()> {
    let path = Settings::expand_path(file);
    if let Err(e) = preflight::check(Operation::Search, &settings, Some(path.as_path())) {
        Output::error(&format!("{}", e));
        Output::info("Run 'ticketlens doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let analyzer = load_session(file, &settings)
        .await?
        .with_search_settings(args.search_settings(&settings.search));

    let spinner = Output::spinner("Searching...");
    let results = analyzer.find_similar(query).await;
    spinner.finish_and_clear();

    match results {
        Ok(results) => {
            if results.fallback {
                Output::warning("No tickets met the similarity threshold; showing the closest match.");
            }

            let filter = args.filter();
            let shown: Vec<_> = results.filtered(&filter).collect();
            if shown.is_empty() {
                Output::warning("No similar tickets match the selected filters.");
            } else {
                Output::success(&format!("Found {} similar tickets", shown.len()));
                for hit in shown {
                    Output::ticket(&hit.record, Some(hit.score));
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
