//! Error types for ticketlens.

use thiserror::Error;

/// Library-level error type for ticketlens operations.
#[derive(Error, Debug)]
pub enum TicketLensError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required column(s): {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Embedding dimension mismatch: corpus vectors have {expected} dimensions, query has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("No ticket file loaded. Upload a spreadsheet first.")]
    NoCorpus,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for ticketlens operations.
pub type Result<T> = std::result::Result<T, TicketLensError>;
