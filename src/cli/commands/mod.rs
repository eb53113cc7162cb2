//! CLI command implementations.

mod ask;
mod chat;
mod config;
mod doctor;
mod inspect;
mod search;
mod serve;

pub use ask::run_ask;
pub use chat::run_chat;
pub use config::run_config;
pub use doctor::run_doctor;
pub use inspect::run_inspect;
pub use search::run_search;
pub use serve::run_serve;

use crate::analyzer::TicketAnalyzer;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Create an analyzer and load `file` into it, with progress output.
async fn load_session(file: &str, settings: &Settings) -> Result<TicketAnalyzer> {
    let path = Settings::expand_path(file);
    let mut analyzer = TicketAnalyzer::new(settings)?;

    let spinner = Output::spinner("Loading and embedding tickets...");
    let loaded = analyzer.load_file(&path).await.map(|c| c.len());
    spinner.finish_and_clear();

    match loaded {
        Ok(count) => {
            Output::success(&format!("Loaded {} tickets from {}", count, path.display()));
            Ok(analyzer)
        }
        Err(e) => {
            Output::error(&format!("Failed to load tickets: {}", e));
            Err(e.into())
        }
    }
}
