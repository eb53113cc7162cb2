//! CLI module for ticketlens.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use crate::config::SearchSettings;
use crate::corpus::TicketFilter;
use clap::{Args, Parser, Subcommand};

/// ticketlens - semantic search and AI insights over ticket history
///
/// Load a spreadsheet of past issue-tracker tickets, search it in natural
/// language, and get an analysis synthesized from the closest matches.
#[derive(Parser, Debug)]
#[command(name = "ticketlens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Ranking and display options shared by query commands.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Maximum number of tickets to return
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Minimum similarity score (0.0-1.0)
    #[arg(short, long)]
    pub threshold: Option<f32>,

    /// Only display tickets with this priority
    #[arg(long)]
    pub priority: Option<String>,

    /// Only display tickets with this status
    #[arg(long)]
    pub status: Option<String>,
}

impl QueryArgs {
    /// Merge command-line overrides into configured search settings.
    pub fn search_settings(&self, base: &SearchSettings) -> SearchSettings {
        SearchSettings {
            top_k: self.top_k.unwrap_or(base.top_k),
            threshold: self.threshold.unwrap_or(base.threshold),
        }
    }

    pub fn filter(&self) -> TicketFilter {
        TicketFilter::new(self.priority.clone(), self.status.clone())
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find past tickets similar to a query
    Search {
        /// Ticket spreadsheet (.xlsx, .xls, .ods)
        file: String,

        /// Search query
        query: String,

        #[command(flatten)]
        args: QueryArgs,
    },

    /// Find similar tickets and generate an AI analysis from them
    Ask {
        /// Ticket spreadsheet (.xlsx, .xls, .ods)
        file: String,

        /// Question or problem description
        query: String,

        /// Chat model to use for the analysis
        #[arg(short, long)]
        model: Option<String>,

        #[command(flatten)]
        args: QueryArgs,
    },

    /// Show statistics and a filtered listing of a ticket spreadsheet
    Inspect {
        /// Ticket spreadsheet (.xlsx, .xls, .ods)
        file: String,

        /// Only list tickets with this priority
        #[arg(long)]
        priority: Option<String>,

        /// Only list tickets with this status
        #[arg(long)]
        status: Option<String>,

        /// Maximum number of tickets to list
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Start an interactive query session over a ticket spreadsheet
    Chat {
        /// Ticket spreadsheet (.xlsx, .xls, .ods)
        file: String,

        /// Chat model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Start HTTP API server with upload, search and ask endpoints
    Serve {
        /// Spreadsheet to load at startup
        #[arg(short, long)]
        file: Option<String>,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Check provider credentials and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show configuration file path
    Path,
}
