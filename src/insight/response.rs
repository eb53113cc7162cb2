//! Ticket insight generation.

use super::{render_ticket_table, ChatCompleter, ChatMessage};
use crate::config::Prompts;
use crate::search::SearchResult;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Answer returned when a query matched nothing. No model call is made.
pub const NO_TICKETS_MESSAGE: &str = "No similar tickets found. The query might be too specific.";

/// Generates natural-language analyses of matched tickets.
pub struct ResponseGenerator {
    chat: Arc<dyn ChatCompleter>,
    prompts: Prompts,
}

impl ResponseGenerator {
    /// Create a generator with the default prompts.
    pub fn new(chat: Arc<dyn ChatCompleter>) -> Self {
        Self {
            chat,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Build the system and user messages for a query.
    pub fn build_messages(&self, query: &str, results: &SearchResult) -> Vec<ChatMessage> {
        let mut vars = HashMap::new();
        vars.insert("query".to_string(), query.to_string());
        vars.insert("tickets".to_string(), render_ticket_table(&results.hits));

        let user_prompt = self
            .prompts
            .render_with_custom(&self.prompts.analysis.user, &vars);

        vec![
            ChatMessage::system(self.prompts.analysis.system.clone()),
            ChatMessage::user(user_prompt),
        ]
    }

    /// Generate an analysis of the matched tickets.
    ///
    /// Never fails: provider errors are folded into the returned text.
    #[instrument(skip(self, results), fields(query = %query, tickets = results.len()))]
    pub async fn generate(&self, query: &str, results: &SearchResult) -> String {
        if results.is_empty() {
            return NO_TICKETS_MESSAGE.to_string();
        }

        let messages = self.build_messages(query, results);

        match self.chat.complete(&messages).await {
            Ok(answer) => {
                info!("Generated insight from {} tickets", results.len());
                answer
            }
            Err(e) => {
                warn!("Insight generation failed: {}", e);
                format!(
                    "Error generating response: {}. Similar tickets found but AI analysis failed.",
                    e
                )
            }
        }
    }
}
