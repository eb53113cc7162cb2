//! Doctor command - verify credentials and configuration.

use crate::cli::Output;
use crate::config::Settings;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("ticketlens Doctor");
    println!();

    let mut checks = Vec::new();

    println!("{}", style("API Configuration").bold());
    checks.push(check_api_key(settings));
    checks.extend(check_models(settings));
    for check in &checks {
        check.print();
    }

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    let search_check = check_search(settings);
    search_check.print();
    checks.push(search_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!("{} error(s), {} warning(s)", errors, warnings));
        anyhow::bail!("doctor found {} error(s)", errors);
    } else if warnings > 0 {
        Output::warning(&format!("Ready, with {} warning(s)", warnings));
    } else {
        Output::success("All checks passed");
    }

    Ok(())
}

/// Show the first and last four characters of a key, or nothing for short keys.
fn mask_key(key: &str) -> String {
    let len = key.chars().count();
    if len > 8 {
        let head: String = key.chars().take(4).collect();
        let tail: String = key.chars().skip(len - 4).collect();
        format!("{}...{}", head, tail)
    } else {
        "****".to_string()
    }
}

fn check_api_key(settings: &Settings) -> CheckResult {
    match &settings.provider.api_key {
        Some(key) if !key.trim().is_empty() => {
            let masked = mask_key(key);
            CheckResult::ok("OPENAI_API_KEY", &format!("set ({})", masked))
        }
        _ => CheckResult::error(
            "OPENAI_API_KEY",
            "not set",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
    }
}

fn check_models(settings: &Settings) -> Vec<CheckResult> {
    let mut results = vec![
        CheckResult::ok("Embedding model", &settings.embedding.model),
        CheckResult::ok("Chat model", &settings.chat.model),
    ];

    if let Some(base) = &settings.provider.api_base {
        results.push(CheckResult::ok("API base", base));
    }

    results
}

fn check_search(settings: &Settings) -> CheckResult {
    let search = &settings.search;
    if !(0.0..=1.0).contains(&search.threshold) {
        CheckResult::warning(
            "Search",
            &format!("threshold {} is outside 0.0-1.0", search.threshold),
            "Every query will fall back to the single closest ticket",
        )
    } else if search.top_k == 0 {
        CheckResult::warning(
            "Search",
            "top_k is 0",
            "Queries return only the single closest ticket",
        )
    } else {
        CheckResult::ok(
            "Search",
            &format!("top_k {}, threshold {:.2}", search.top_k, search.threshold),
        )
    }
}

fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: ticketlens config init",
        )
    }
}
