//! Embedding generation for semantic ticket search.

mod mock;
mod openai;

pub use mock::MockEmbedder;
pub use openai::OpenAIEmbedder;

use crate::error::{Result, TicketLensError};
use async_trait::async_trait;
use tracing::debug;

/// Default number of texts sent per remote embedding request.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Trait for embedding generation.
///
/// Implementors only provide a single-request call; batching and ordering are
/// handled by [`Embedder::embed`].
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed one batch of texts in a single remote request.
    ///
    /// Must return exactly one vector per input, in input order.
    async fn embed_batch(&self, batch: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Maximum number of texts per remote request.
    fn batch_size(&self) -> usize {
        DEFAULT_BATCH_SIZE
    }

    /// Embed any number of texts, one vector per text, preserving order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let batch_size = self.batch_size().max(1);
        let mut all_embeddings = Vec::with_capacity(texts.len());

        for (i, batch) in texts.chunks(batch_size).enumerate() {
            debug!("Embedding batch {} ({} texts)", i + 1, batch.len());
            let vectors = self.embed_batch(batch).await?;
            if vectors.len() != batch.len() {
                return Err(TicketLensError::Provider(format!(
                    "Embedding response returned {} vectors for {} inputs",
                    vectors.len(),
                    batch.len()
                )));
            }
            all_embeddings.extend(vectors);
        }

        Ok(all_embeddings)
    }

    /// Embed a single text.
    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        self.embed(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| TicketLensError::Provider("Empty embedding response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(text: &str) -> f32 {
        text.trim_start_matches("text-").parse::<f32>().unwrap_or(-1.0)
    }

    #[tokio::test]
    async fn test_embed_preserves_order_across_batches() {
        let embedder = MockEmbedder::from_fn(|text| vec![index_of(text)]);
        let texts: Vec<String> = (0..250).map(|i| format!("text-{}", i)).collect();

        let vectors = embedder.embed(&texts).await.unwrap();

        assert_eq!(vectors.len(), 250);
        for (i, v) in vectors.iter().enumerate() {
            assert_eq!(v[0], i as f32);
        }
        assert_eq!(embedder.batch_sizes(), vec![100, 100, 50]);
    }

    #[tokio::test]
    async fn test_embed_empty_input_makes_no_request() {
        let embedder = MockEmbedder::from_fn(|_| vec![1.0]);
        let vectors = embedder.embed(&[]).await.unwrap();
        assert!(vectors.is_empty());
        assert_eq!(embedder.call_count(), 0);
    }

    #[tokio::test]
    async fn test_embed_honors_custom_batch_size() {
        let embedder = MockEmbedder::from_fn(|text| vec![index_of(text)]).with_batch_size(2);
        let texts: Vec<String> = (0..5).map(|i| format!("text-{}", i)).collect();

        let vectors = embedder.embed(&texts).await.unwrap();
        assert_eq!(vectors.len(), 5);
        assert_eq!(embedder.batch_sizes(), vec![2, 2, 1]);
    }

    #[tokio::test]
    async fn test_embed_propagates_provider_error() {
        let embedder = MockEmbedder::failing("rate limited");
        let err = embedder
            .embed(&["a".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, TicketLensError::Provider(ref msg) if msg.contains("rate limited")));
    }

    #[tokio::test]
    async fn test_embed_one() {
        let embedder = MockEmbedder::from_fn(|text| vec![text.len() as f32]);
        assert_eq!(embedder.embed_one("abc").await.unwrap(), vec![3.0]);
    }

    struct ShortEmbedder;

    #[async_trait]
    impl Embedder for ShortEmbedder {
        async fn embed_batch(&self, _batch: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(vec![vec![1.0]])
        }
    }

    #[tokio::test]
    async fn test_embed_rejects_short_response() {
        let texts = vec!["a".to_string(), "b".to_string()];
        let err = ShortEmbedder.embed(&texts).await.unwrap_err();
        assert!(matches!(err, TicketLensError::Provider(_)));
    }
}
