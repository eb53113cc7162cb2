//! Mock embedder for tests and offline runs.

use super::{Embedder, DEFAULT_BATCH_SIZE};
use crate::error::{Result, TicketLensError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type EmbedFn = dyn Fn(&str) -> Vec<f32> + Send + Sync;

/// Mock embedder that derives vectors from text with a user-supplied function.
///
/// Records the size of every batch request it receives.
///
/// # Examples
///
/// ```
/// use ticketlens::embedding::MockEmbedder;
///
/// // One axis per keyword group
/// let embedder = MockEmbedder::keyword_axes(&[&["login"], &["timeout", "slow"]]);
/// ```
#[derive(Clone)]
pub struct MockEmbedder {
    embed_fn: Arc<EmbedFn>,
    batch_size: usize,
    failure: Option<String>,
    call_count: Arc<AtomicUsize>,
    batch_sizes: Arc<Mutex<Vec<usize>>>,
}

impl MockEmbedder {
    /// Create a mock computing each vector with `f`.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&str) -> Vec<f32> + Send + Sync + 'static,
    {
        Self {
            embed_fn: Arc::new(f),
            batch_size: DEFAULT_BATCH_SIZE,
            failure: None,
            call_count: Arc::new(AtomicUsize::new(0)),
            batch_sizes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock where dimension `i` is 1.0 when the lower-cased text
    /// contains any keyword of group `i`.
    pub fn keyword_axes(groups: &[&[&str]]) -> Self {
        let groups: Vec<Vec<String>> = groups
            .iter()
            .map(|g| g.iter().map(|k| k.to_lowercase()).collect())
            .collect();

        Self::from_fn(move |text| {
            let lower = text.to_lowercase();
            groups
                .iter()
                .map(|g| {
                    if g.iter().any(|k| lower.contains(k.as_str())) {
                        1.0
                    } else {
                        0.0
                    }
                })
                .collect()
        })
    }

    /// Create a mock whose every request fails with the given message.
    pub fn failing(message: &str) -> Self {
        let mut mock = Self::from_fn(|_| Vec::new());
        mock.failure = Some(message.to_string());
        mock
    }

    /// Override the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Number of remote requests issued.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Size of each request, in order.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batch_sizes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed_batch(&self, batch: &[String]) -> Result<Vec<Vec<f32>>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.batch_sizes.lock().unwrap().push(batch.len());

        if let Some(message) = &self.failure {
            return Err(TicketLensError::Provider(message.clone()));
        }

        Ok(batch.iter().map(|t| (self.embed_fn)(t)).collect())
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }
}
