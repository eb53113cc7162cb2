//! ticketlens CLI entry point.

use anyhow::Result;
use clap::Parser;
use ticketlens::cli::{commands, Cli, Commands};
use ticketlens::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&Settings::expand_path(path)))?,
        None => Settings::load()?,
    };

    // Initialize logging
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("ticketlens={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Execute command
    match &cli.command {
        Commands::Search { file, query, args } => {
            commands::run_search(file, query, args, settings).await?;
        }

        Commands::Ask {
            file,
            query,
            model,
            args,
        } => {
            commands::run_ask(file, query, model.clone(), args, settings).await?;
        }

        Commands::Inspect {
            file,
            priority,
            status,
            limit,
        } => {
            commands::run_inspect(file, priority.clone(), status.clone(), *limit, &settings)?;
        }

        Commands::Chat { file, model } => {
            commands::run_chat(file, model.clone(), settings).await?;
        }

        Commands::Serve { file, host, port } => {
            commands::run_serve(file.as_deref(), host, *port, settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, cli.config.as_deref(), settings)?;
        }
    }

    Ok(())
}
