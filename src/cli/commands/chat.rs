//! Interactive query session.

use super::load_session;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the interactive session: one query per line until `exit`.
pub async fn run_chat(file: &str, model: Option<String>, mut settings: Settings) -> Result<()> {
    let path = Settings::expand_path(file);
    if let Err(e) = preflight::check(Operation::Ask, &settings, Some(path.as_path())) {
        Output::error(&format!("{}", e));
        Output::info("Run 'ticketlens doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    if let Some(model) = model {
        settings.chat.model = model;
    }

    let analyzer = load_session(file, &settings).await?;

    println!("\n{}", style("ticketlens").bold().cyan());
    println!(
        "{}\n",
        style("Describe an issue to search past tickets, or 'exit' to quit.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("Query:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        let spinner = Output::spinner("Analyzing ticket history...");
        let analysis = analyzer.analyze(input).await;
        spinner.finish_and_clear();

        match analysis {
            Ok(analysis) => {
                for hit in &analysis.results.hits {
                    Output::ticket(&hit.record, Some(hit.score));
                }
                println!("\n{} {}\n", style("Insight:").cyan().bold(), analysis.answer);
            }
            Err(e) => {
                Output::error(&format!("Error: {}", e));
            }
        }
    }

    Ok(())
}
