//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;

/// Run the config command.
pub fn run_config(action: &ConfigAction, config_path: Option<&str>, settings: Settings) -> Result<()> {
    let path = config_path
        .map(Settings::expand_path)
        .unwrap_or_else(Settings::default_config_path);

    match action {
        ConfigAction::Show => {
            let mut shown = settings;
            if shown.provider.api_key.is_some() {
                shown.provider.api_key = Some("********".to_string());
            }
            let toml_str = toml::to_string_pretty(&shown)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Init { force } => {
            if path.exists() && !force {
                Output::warning(&format!("Config already exists at {}", path.display()));
                Output::info("Use --force to overwrite it.");
                return Ok(());
            }

            // Never persist credentials picked up from the environment
            let mut defaults = Settings::default();
            defaults.provider.api_key = None;
            defaults.save_to(&path)?;
            Output::success(&format!("Created default config at {}", path.display()));
        }

        ConfigAction::Path => {
            println!("{}", path.display());
        }
    }

    Ok(())
}
