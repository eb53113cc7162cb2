//! Configuration module for ticketlens.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{AnalysisPrompts, Prompts};
pub use settings::{
    ChatSettings, EmbeddingSettings, GeneralSettings, PromptSettings, ProviderSettings,
    SearchSettings, Settings,
};
