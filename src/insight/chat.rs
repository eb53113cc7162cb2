//! Chat completion provider abstraction.

use crate::config::{ChatSettings, ProviderSettings};
use crate::error::{Result, TicketLensError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single role/content pair sent to the chat model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Trait for chat completion backends.
#[async_trait]
pub trait ChatCompleter: Send + Sync {
    /// Send the messages and return the generated text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// OpenAI chat completions backend.
pub struct OpenAIChat {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl OpenAIChat {
    /// Create a chat backend from settings.
    pub fn new(provider: &ProviderSettings, settings: &ChatSettings) -> Result<Self> {
        Ok(Self {
            client: create_client(provider)?,
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }

    /// Use a different model.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

fn to_request_message(message: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let built: std::result::Result<ChatCompletionRequestMessage, _> = match message.role {
        ChatRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(message.content.clone())
            .build()
            .map(Into::into),
        ChatRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(message.content.clone())
            .build()
            .map(Into::into),
        ChatRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(message.content.clone())
            .build()
            .map(Into::into),
    };
    built.map_err(|e| TicketLensError::Provider(e.to_string()))
}

#[async_trait]
impl ChatCompleter for OpenAIChat {
    #[instrument(skip(self, messages), fields(model = %self.model, messages = messages.len()))]
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let messages = messages
            .iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>>>()?;

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model).messages(messages);
        if let Some(temperature) = self.temperature {
            args.temperature(temperature);
        }
        let request = args
            .build()
            .map_err(|e| TicketLensError::Provider(e.to_string()))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            TicketLensError::Provider(format!("Chat completion failed: {}", e))
        })?;

        let answer = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| TicketLensError::Provider("Empty response from chat model".to_string()))?
            .clone();

        debug!("Generated {} characters", answer.len());
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_conversion() {
        let msg = to_request_message(&ChatMessage::system("Be brief.")).unwrap();
        assert!(matches!(msg, ChatCompletionRequestMessage::System(_)));

        let msg = to_request_message(&ChatMessage::user("Hello")).unwrap();
        assert!(matches!(msg, ChatCompletionRequestMessage::User(_)));
    }

    #[test]
    fn test_chat_creation() {
        let provider = ProviderSettings {
            api_key: Some("sk-test".to_string()),
            ..ProviderSettings::default()
        };
        let chat = OpenAIChat::new(&provider, &ChatSettings::default()).unwrap();
        assert_eq!(chat.model(), "gpt-3.5-turbo");
        assert_eq!(chat.with_model("gpt-4o-mini").model(), "gpt-4o-mini");
    }
}
