//! Mock chat backend for tests and offline runs.

use super::{ChatCompleter, ChatMessage};
use crate::error::{Result, TicketLensError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Chat backend returning a canned reply, or echoing the last user message.
#[derive(Clone, Default)]
pub struct MockChat {
    reply: Option<String>,
    failure: Option<String>,
    call_count: Arc<AtomicUsize>,
    last_messages: Arc<Mutex<Vec<ChatMessage>>>,
}

impl MockChat {
    /// Reply with the content of the last message received.
    pub fn echo() -> Self {
        Self::default()
    }

    /// Always reply with `reply`.
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            ..Self::default()
        }
    }

    /// Fail every request with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Number of requests received.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Messages from the most recent request.
    pub fn last_messages(&self) -> Vec<ChatMessage> {
        self.last_messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompleter for MockChat {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().unwrap() = messages.to_vec();

        if let Some(message) = &self.failure {
            return Err(TicketLensError::Provider(message.clone()));
        }

        Ok(match &self.reply {
            Some(reply) => reply.clone(),
            None => messages.last().map(|m| m.content.clone()).unwrap_or_default(),
        })
    }
}
