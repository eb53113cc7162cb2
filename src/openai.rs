//! OpenAI client configuration.

use crate::config::ProviderSettings;
use crate::error::{Result, TicketLensError};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create an OpenAI client from provider settings.
///
/// Credentials and base URL come from the settings; anything left unset falls
/// back to the async-openai defaults.
pub fn create_client(provider: &ProviderSettings) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(provider.timeout_secs))
        .build()
        .map_err(|e| TicketLensError::Config(format!("Failed to create HTTP client: {}", e)))?;

    let mut config = OpenAIConfig::default();
    if let Some(key) = &provider.api_key {
        config = config.with_api_key(key);
    }
    if let Some(base) = &provider.api_base {
        config = config.with_api_base(base);
    }

    Ok(Client::with_config(config).with_http_client(http_client))
}
