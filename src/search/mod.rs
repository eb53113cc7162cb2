//! Semantic ticket search: query enhancement and similarity ranking.

mod enhancer;
mod ranker;

pub use enhancer::{enhance, SYNONYMS};
pub use ranker::{cosine_similarity, rank};

use crate::corpus::{TicketFilter, TicketRecord};
use serde::Serialize;

/// A matched ticket with its similarity score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredTicket {
    pub record: TicketRecord,
    /// Cosine similarity to the query (higher is better).
    pub score: f32,
    /// Position of the ticket in the corpus.
    pub index: usize,
}

/// Tickets selected for a query, ordered by score descending.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResult {
    pub hits: Vec<ScoredTicket>,
    /// True when no ticket met the threshold and the best match was returned anyway.
    pub fallback: bool,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Hits passing the display filter. Ranking is unaffected.
    pub fn filtered<'a>(&'a self, filter: &'a TicketFilter) -> impl Iterator<Item = &'a ScoredTicket> {
        self.hits.iter().filter(move |h| filter.matches(&h.record))
    }
}
