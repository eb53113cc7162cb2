//! OpenAI embeddings implementation.

use super::{Embedder, DEFAULT_BATCH_SIZE};
use crate::config::{EmbeddingSettings, ProviderSettings};
use crate::error::{Result, TicketLensError};
use crate::openai::create_client;
use async_openai::types::{CreateEmbeddingRequestArgs, EmbeddingInput};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// OpenAI-based embedder.
pub struct OpenAIEmbedder {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    dimensions: Option<u32>,
    batch_size: usize,
}

impl OpenAIEmbedder {
    /// Create an embedder from settings.
    pub fn new(provider: &ProviderSettings, settings: &EmbeddingSettings) -> Result<Self> {
        Ok(Self {
            client: create_client(provider)?,
            model: settings.model.clone(),
            dimensions: settings.dimensions,
            batch_size: settings.batch_size,
        })
    }

    /// Create an embedder for a specific model with default batching.
    pub fn with_model(provider: &ProviderSettings, model: &str) -> Result<Self> {
        let settings = EmbeddingSettings {
            model: model.to_string(),
            dimensions: None,
            batch_size: DEFAULT_BATCH_SIZE,
        };
        Self::new(provider, &settings)
    }

    /// The embedding model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Embedder for OpenAIEmbedder {
    #[instrument(skip(self, batch), fields(count = batch.len(), model = %self.model))]
    async fn embed_batch(&self, batch: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut args = CreateEmbeddingRequestArgs::default();
        args.model(&self.model)
            .input(EmbeddingInput::StringArray(batch.to_vec()));
        if let Some(dimensions) = self.dimensions {
            args.dimensions(dimensions);
        }

        let request = args
            .build()
            .map_err(|e| TicketLensError::Provider(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .embeddings()
            .create(request)
            .await
            .map_err(|e| TicketLensError::Provider(format!("Embedding API error: {}", e)))?;

        // Sort by index to ensure correct order
        let mut embeddings: Vec<_> = response.data.into_iter().collect();
        embeddings.sort_by_key(|e| e.index);

        debug!("Received {} embeddings", embeddings.len());
        Ok(embeddings.into_iter().map(|e| e.embedding).collect())
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedder_creation() {
        let provider = ProviderSettings {
            api_key: Some("sk-test".to_string()),
            ..ProviderSettings::default()
        };

        let embedder = OpenAIEmbedder::new(&provider, &EmbeddingSettings::default()).unwrap();
        assert_eq!(embedder.model(), "text-embedding-3-small");
        assert_eq!(embedder.batch_size(), 100);

        let embedder = OpenAIEmbedder::with_model(&provider, "text-embedding-3-large").unwrap();
        assert_eq!(embedder.model(), "text-embedding-3-large");
    }
}
