//! Ticket analysis session.
//!
//! Owns the loaded corpus and runs the query pipeline:
//! enhance -> embed -> rank -> generate.

use crate::config::{Prompts, SearchSettings, Settings};
use crate::corpus::{loader, CorpusBuilder, RawTable, TicketCorpus};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::{Result, TicketLensError};
use crate::insight::{ChatCompleter, OpenAIChat, ResponseGenerator};
use crate::search::{enhance, rank, SearchResult};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// The outcome of a full query.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// The query as typed.
    pub query: String,
    /// The query after synonym expansion (the embedding input).
    pub enhanced_query: String,
    pub results: SearchResult,
    /// Generated insight, or a fallback message.
    pub answer: String,
}

/// A single-user search session over one ticket corpus.
pub struct TicketAnalyzer {
    search: SearchSettings,
    embedder: Arc<dyn Embedder>,
    builder: CorpusBuilder,
    generator: ResponseGenerator,
    corpus: Option<TicketCorpus>,
}

impl TicketAnalyzer {
    /// Create an analyzer backed by the OpenAI provider.
    pub fn new(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let embedder: Arc<dyn Embedder> =
            Arc::new(OpenAIEmbedder::new(&settings.provider, &settings.embedding)?);
        let chat: Arc<dyn ChatCompleter> =
            Arc::new(OpenAIChat::new(&settings.provider, &settings.chat)?);

        Ok(Self::with_components(
            settings.search.clone(),
            embedder,
            chat,
            prompts,
        ))
    }

    /// Create an analyzer with custom components.
    pub fn with_components(
        search: SearchSettings,
        embedder: Arc<dyn Embedder>,
        chat: Arc<dyn ChatCompleter>,
        prompts: Prompts,
    ) -> Self {
        Self {
            search,
            builder: CorpusBuilder::new(embedder.clone()),
            embedder,
            generator: ResponseGenerator::new(chat).with_prompts(prompts),
            corpus: None,
        }
    }

    /// Override the ranking parameters.
    pub fn with_search_settings(mut self, search: SearchSettings) -> Self {
        self.search = search;
        self
    }

    pub fn search_settings(&self) -> &SearchSettings {
        &self.search
    }

    /// The currently loaded corpus, if any.
    pub fn corpus(&self) -> Option<&TicketCorpus> {
        self.corpus.as_ref()
    }

    /// Replace the corpus with one built from `table`.
    ///
    /// On failure the previously loaded corpus stays in place.
    pub async fn load_table(&mut self, table: &RawTable) -> Result<&TicketCorpus> {
        let corpus = self.builder.build(table).await?;
        Ok(self.corpus.insert(corpus))
    }

    /// Load a spreadsheet file from disk.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&TicketCorpus> {
        let table = loader::read_table(path)?;
        self.load_table(&table).await
    }

    /// Load a spreadsheet from uploaded bytes.
    pub async fn load_bytes(&mut self, bytes: Vec<u8>) -> Result<&TicketCorpus> {
        let table = loader::read_table_from_bytes(bytes)?;
        self.load_table(&table).await
    }

    /// Find the tickets most similar to `query` using the configured limits.
    pub async fn find_similar(&self, query: &str) -> Result<SearchResult> {
        let (_, results) = self.search_enhanced(query).await?;
        Ok(results)
    }

    async fn search_enhanced(&self, query: &str) -> Result<(String, SearchResult)> {
        let corpus = self.corpus.as_ref().ok_or(TicketLensError::NoCorpus)?;

        let enhanced = enhance(query);
        let query_embedding = self.embedder.embed_one(&enhanced).await?;
        let results = rank(
            &query_embedding,
            corpus,
            self.search.top_k,
            self.search.threshold,
        )?;

        Ok((enhanced, results))
    }

    /// Generate an insight for `query` from already-selected tickets.
    pub async fn generate_response(&self, query: &str, results: &SearchResult) -> String {
        self.generator.generate(query, results).await
    }

    /// Run the whole pipeline for one query.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn analyze(&self, query: &str) -> Result<Analysis> {
        let (enhanced_query, results) = self.search_enhanced(query).await?;
        info!("Matched {} tickets", results.len());

        let answer = self.generate_response(query, &results).await;

        Ok(Analysis {
            query: query.to_string(),
            enhanced_query,
            results,
            answer,
        })
    }
}
