//! AI insight generation from matched tickets.
//!
//! Renders the selected tickets into a prompt and asks a chat model for an
//! analysis, degrading to a fixed message when the model call fails.

mod chat;
pub mod context;
mod mock;
mod response;

pub use chat::{ChatCompleter, ChatMessage, ChatRole, OpenAIChat};
pub use context::render_ticket_table;
pub use mock::MockChat;
pub use response::{ResponseGenerator, NO_TICKETS_MESSAGE};
