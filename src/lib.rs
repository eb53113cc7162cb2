//! ticketlens - Semantic search and AI insights over ticket history
//!
//! A local-first CLI tool that loads a spreadsheet of historical issue-tracker
//! tickets, finds the tickets most similar to a natural-language query, and
//! generates an analysis synthesized from them.
//!
//! # Overview
//!
//! ticketlens allows you to:
//! - Load ticket history from `.xlsx`, `.xls` or `.ods` spreadsheets
//! - Search past tickets semantically, with synonym-based query expansion
//! - Get an AI-generated analysis of the closest matches
//! - Serve the same pipeline over HTTP
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates
//! - `corpus` - Spreadsheet loading, ticket records and the embedded corpus
//! - `embedding` - Embedding generation
//! - `search` - Query enhancement and similarity ranking
//! - `insight` - Chat-model analysis of matched tickets
//! - `analyzer` - The search session tying the pipeline together
//!
//! # Example
//!
//! ```rust,no_run
//! use ticketlens::analyzer::TicketAnalyzer;
//! use ticketlens::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let mut analyzer = TicketAnalyzer::new(&settings)?;
//!     analyzer.load_file("tickets.xlsx").await?;
//!
//!     let analysis = analyzer.analyze("customers cannot log in").await?;
//!     for hit in &analysis.results.hits {
//!         println!("{} ({:.2}): {}", hit.record.id, hit.score, hit.record.summary);
//!     }
//!     println!("{}", analysis.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod insight;
pub mod openai;
pub mod search;

pub use error::{Result, TicketLensError};
