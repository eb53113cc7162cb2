//! Ticket corpus: the loaded ticket history and its embedding matrix.

mod builder;
pub mod loader;
mod record;
mod table;

pub use builder::{prepare_records, CorpusBuilder};
pub use record::{TicketRecord, REQUIRED_COLUMNS};
pub use table::{parse_datetime, Cell, RawTable};

use crate::error::{Result, TicketLensError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Deduplicated ticket records with one embedding row per record.
///
/// Records and embeddings are only ever replaced together.
#[derive(Debug, Clone, Default)]
pub struct TicketCorpus {
    records: Vec<TicketRecord>,
    embeddings: Vec<Vec<f32>>,
}

impl TicketCorpus {
    /// Create a corpus. Row `i` of `embeddings` belongs to record `i`.
    pub fn new(records: Vec<TicketRecord>, embeddings: Vec<Vec<f32>>) -> Result<Self> {
        if records.len() != embeddings.len() {
            return Err(TicketLensError::Provider(format!(
                "Got {} embeddings for {} tickets",
                embeddings.len(),
                records.len()
            )));
        }

        if let Some(first) = embeddings.first() {
            let width = first.len();
            if let Some(bad) = embeddings.iter().find(|e| e.len() != width) {
                return Err(TicketLensError::DimensionMismatch {
                    expected: width,
                    actual: bad.len(),
                });
            }
        }

        Ok(Self { records, embeddings })
    }

    pub fn records(&self) -> &[TicketRecord] {
        &self.records
    }

    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }

    pub fn get(&self, index: usize) -> Option<&TicketRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Embedding width, or 0 for an empty corpus.
    pub fn dimensions(&self) -> usize {
        self.embeddings.first().map(Vec::len).unwrap_or(0)
    }

    /// Iterate over `(record, embedding)` pairs in corpus order.
    pub fn iter(&self) -> impl Iterator<Item = (&TicketRecord, &[f32])> {
        self.records
            .iter()
            .zip(self.embeddings.iter().map(Vec::as_slice))
    }

    /// Summary counts for display.
    pub fn stats(&self) -> CorpusStats {
        CorpusStats::from_records(&self.records)
    }
}

/// Priority/status filter applied to displayed tickets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketFilter {
    pub priority: Option<String>,
    pub status: Option<String>,
}

impl TicketFilter {
    pub fn new(priority: Option<String>, status: Option<String>) -> Self {
        let clean = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Self {
            priority: clean(priority),
            status: clean(status),
        }
    }

    /// Whether no criteria are set.
    pub fn is_empty(&self) -> bool {
        self.priority.is_none() && self.status.is_none()
    }

    /// Case-insensitive exact match on every set criterion.
    pub fn matches(&self, record: &TicketRecord) -> bool {
        let field_matches = |wanted: &Option<String>, actual: &str| {
            wanted
                .as_ref()
                .is_none_or(|w| w.trim().eq_ignore_ascii_case(actual.trim()))
        };

        field_matches(&self.priority, &record.priority) && field_matches(&self.status, &record.status)
    }
}

/// Counts over a corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CorpusStats {
    pub total: usize,
    pub resolved: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_priority: BTreeMap<String, usize>,
}

impl CorpusStats {
    pub fn from_records(records: &[TicketRecord]) -> Self {
        let mut stats = CorpusStats {
            total: records.len(),
            ..Default::default()
        };

        for record in records {
            if record.is_resolved() {
                stats.resolved += 1;
            }
            *stats.by_status.entry(record.status.clone()).or_default() += 1;
            *stats.by_priority.entry(record.priority.clone()).or_default() += 1;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, status: &str, priority: &str) -> TicketRecord {
        TicketRecord::new(
            id.to_string(),
            status.to_string(),
            priority.to_string(),
            "Acme".to_string(),
            "Summary".to_string(),
            String::new(),
            None,
            None,
        )
    }

    #[test]
    fn test_corpus_rejects_row_count_mismatch() {
        let err = TicketCorpus::new(vec![record("T1", "Open", "High")], Vec::new()).unwrap_err();
        assert!(matches!(err, TicketLensError::Provider(_)));
    }

    #[test]
    fn test_corpus_rejects_ragged_embeddings() {
        let err = TicketCorpus::new(
            vec![record("T1", "Open", "High"), record("T2", "Open", "Low")],
            vec![vec![1.0, 0.0], vec![1.0]],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TicketLensError::DimensionMismatch { expected: 2, actual: 1 }
        ));
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = TicketCorpus::default();
        assert!(corpus.is_empty());
        assert_eq!(corpus.dimensions(), 0);
    }

    #[test]
    fn test_filter_matches_case_insensitively() {
        let filter = TicketFilter::new(Some("high".to_string()), Some(" ".to_string()));
        assert!(filter.status.is_none());
        assert!(filter.matches(&record("T1", "Open", "High")));
        assert!(!filter.matches(&record("T2", "Open", "Low")));
        assert!(TicketFilter::default().matches(&record("T3", "Closed", "Low")));
    }

    #[test]
    fn test_stats() {
        let stats = CorpusStats::from_records(&[
            record("T1", "Open", "High"),
            record("T2", "Open", "Low"),
            record("T3", "Resolved", "High"),
        ]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_status.get("Open"), Some(&2));
        assert_eq!(stats.by_priority.get("High"), Some(&2));
        assert_eq!(stats.resolved, 0);
    }
}
