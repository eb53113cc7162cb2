//! Ask command implementation.

use super::load_session;
use crate::cli::preflight::{self, Operation};
use crate::cli::{Output, QueryArgs};
use crate::config::Settings;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(
    file: &str,
    query: &str,
    model: Option<String>,
    args: &QueryArgs,
    mut settings: Settings,
) -> Result<()> {
    let path = Settings::expand_path(file);
    if let Err(e) = preflight::check(Operation::Ask, &settings, Some(path.as_path())) {
        Output::error(&format!("{}", e));
        Output::info("Run 'ticketlens doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    if let Some(model) = model {
        settings.chat.model = model;
    }

    let analyzer = load_session(file, &settings)
        .await?
        .with_search_settings(args.search_settings(&settings.search));

    let spinner = Output::spinner("Analyzing ticket history...");
    let analysis = analyzer.analyze(query).await;
    spinner.finish_and_clear();

    match analysis {
        Ok(analysis) => {
            let filter = args.filter();
            let shown: Vec<_> = analysis.results.filtered(&filter).collect();

            Output::header("Similar Tickets Found");
            if shown.is_empty() {
                Output::warning("No similar tickets match the selected filters.");
            }
            for hit in shown {
                Output::ticket(&hit.record, Some(hit.score));
            }

            Output::header("AI Assistant Insights");
            println!("\n{}\n", analysis.answer);
        }
        Err(e) => {
            Output::error(&format!("Failed to analyze tickets: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
