//! Pre-flight checks before provider calls.
//!
//! Validates that credentials and input files are available before starting
//! operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{Result, TicketLensError};
use std::path::Path;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Searching embeds the corpus and the query.
    Search,
    /// Asking also calls the chat model.
    Ask,
    /// Inspecting only reads the spreadsheet.
    Inspect,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings, file: Option<&Path>) -> Result<()> {
    if let Some(path) = file {
        check_file(path)?;
    }

    match operation {
        Operation::Search | Operation::Ask => check_api_key(settings)?,
        Operation::Inspect => {}
    }
    Ok(())
}

/// Check if provider credentials are configured.
fn check_api_key(settings: &Settings) -> Result<()> {
    if settings.has_api_key() {
        Ok(())
    } else {
        Err(TicketLensError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        ))
    }
}

fn check_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(TicketLensError::InvalidInput(format!(
            "File not found: {}",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_needs_no_key() {
        let settings = Settings::default();
        assert!(check(Operation::Inspect, &settings, None).is_ok());
    }

    #[test]
    fn test_search_requires_key() {
        let mut settings = Settings::default();
        settings.provider.api_key = None;
        assert!(matches!(
            check(Operation::Search, &settings, None),
            Err(TicketLensError::Config(_))
        ));

        settings.provider.api_key = Some("sk-test".to_string());
        assert!(check(Operation::Ask, &settings, None).is_ok());
    }

    #[test]
    fn test_missing_file() {
        let settings = Settings::default();
        let err = check(Operation::Inspect, &settings, Some(Path::new("/nope/tickets.xlsx")));
        assert!(matches!(err, Err(TicketLensError::InvalidInput(_))));
    }
}
