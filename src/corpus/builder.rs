//! Builds a [`TicketCorpus`] from a raw spreadsheet table.

use super::record::{
    TicketRecord, COMMENTS, CREATED_DATE, CUSTOMER, PRIORITY, REQUIRED_COLUMNS, RESOLVED_DATE,
    STATUS, SUMMARY, TICKET_ID,
};
use super::table::RawTable;
use super::TicketCorpus;
use crate::embedding::Embedder;
use crate::error::{Result, TicketLensError};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Validate, normalize and deduplicate the rows of a ticket table.
///
/// Pure: the same table always yields the same records.
pub fn prepare_records(table: &RawTable) -> Result<Vec<TicketRecord>> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| table.column(c).is_none())
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(TicketLensError::Schema { missing });
    }

    // Required columns are present, checked above
    let col = |name: &str| table.column(name).unwrap_or_default();
    let (id_col, status_col, priority_col) = (col(TICKET_ID), col(STATUS), col(PRIORITY));
    let (customer_col, summary_col, comments_col) = (col(CUSTOMER), col(SUMMARY), col(COMMENTS));
    let created_col = table.column(CREATED_DATE);
    let resolved_col = table.column(RESOLVED_DATE);

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(table.len());
    let mut duplicates = 0usize;

    for row in 0..table.len() {
        let text = |c: usize| table.cell(row, c).to_string();
        let date = |c: Option<usize>| c.and_then(|c| table.cell(row, c).to_datetime());

        let id = text(id_col);
        if !seen.insert(id.clone()) {
            duplicates += 1;
            continue;
        }

        records.push(TicketRecord::new(
            id,
            text(status_col),
            text(priority_col),
            text(customer_col),
            text(summary_col),
            text(comments_col),
            date(created_col),
            date(resolved_col),
        ));
    }

    if duplicates > 0 {
        debug!("Dropped {} duplicate ticket rows", duplicates);
    }

    Ok(records)
}

/// Builds ticket corpora, embedding every ticket's text.
pub struct CorpusBuilder {
    embedder: Arc<dyn Embedder>,
}

impl CorpusBuilder {
    /// Create a new corpus builder.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    /// Build a corpus from a table. No partial corpus is returned on failure.
    #[instrument(skip_all, fields(rows = table.len()))]
    pub async fn build(&self, table: &RawTable) -> Result<TicketCorpus> {
        let records = prepare_records(table)?;

        let texts: Vec<String> = records.iter().map(|r| r.full_text.clone()).collect();
        let embeddings = self.embedder.embed(&texts).await?;

        let corpus = TicketCorpus::new(records, embeddings)?;
        info!(
            "Built corpus of {} tickets ({} dimensions)",
            corpus.len(),
            corpus.dimensions()
        );
        Ok(corpus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Cell;
    use crate::embedding::MockEmbedder;

    const HEADERS: [&str; 8] = [
        "Ticket ID",
        "Status",
        "Priority",
        "Customer",
        "Summary",
        "Comments",
        "Created Date",
        "Resolved Date",
    ];

    fn sample_table() -> RawTable {
        RawTable::from_strings(
            &HEADERS,
            &[
                &["T1", "Open", "High", "Acme", "Login fails", "Reset", "2024-01-02", ""],
                &["T2", "Resolved", "Low", "Globex", "UI glitch", "", "not a date", "2024-02-01"],
                &["T1", "Closed", "Low", "Other", "Duplicate", "Later row", "", ""],
            ],
        )
    }

    #[test]
    fn test_missing_columns_are_all_named() {
        let table = RawTable::from_strings(&["Ticket ID", "Status", "Summary"], &[&["T1", "Open", "x"]]);
        match prepare_records(&table).unwrap_err() {
            TicketLensError::Schema { missing } => {
                assert_eq!(missing, vec!["Priority", "Customer", "Comments"]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let records = prepare_records(&sample_table()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "T1");
        assert_eq!(records[0].summary, "Login fails");
        assert_eq!(records[1].id, "T2");
    }

    #[test]
    fn test_dates_are_coerced_silently() {
        let records = prepare_records(&sample_table()).unwrap();
        assert!(records[0].created.is_some());
        assert!(records[0].resolved.is_none());
        assert!(records[1].created.is_none());
        assert!(records[1].is_resolved());
    }

    #[test]
    fn test_optional_date_columns() {
        let table = RawTable::from_strings(
            &HEADERS[..6],
            &[&["T1", "Open", "High", "Acme", "Login fails", "Reset"]],
        );
        let records = prepare_records(&table).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].created.is_none());
    }

    #[test]
    fn test_missing_cells_render_empty() {
        let records = prepare_records(&sample_table()).unwrap();
        assert!(records[1].full_text.ends_with("Comments: "));
    }

    #[test]
    fn test_numeric_ids() {
        let table = RawTable::new(
            HEADERS[..6].iter().map(|h| h.to_string()).collect(),
            vec![vec![
                Cell::Number(1001.0),
                Cell::Text("Open".to_string()),
                Cell::Text("High".to_string()),
                Cell::Text("Acme".to_string()),
                Cell::Text("Crash".to_string()),
                Cell::Empty,
            ]],
        );
        let records = prepare_records(&table).unwrap();
        assert_eq!(records[0].id, "1001");
        assert!(records[0].full_text.starts_with("Ticket ID: 1001 Status: Open"));
    }

    #[test]
    fn test_prepare_is_idempotent() {
        let table = sample_table();
        let first = prepare_records(&table).unwrap();
        let second = prepare_records(&table).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_build_embeds_in_corpus_order() {
        let embedder = Arc::new(MockEmbedder::from_fn(|text| vec![text.len() as f32, 1.0]));
        let builder = CorpusBuilder::new(embedder.clone());

        let corpus = builder.build(&sample_table()).await.unwrap();

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.dimensions(), 2);
        for (record, embedding) in corpus.iter() {
            assert_eq!(embedding[0], record.full_text.len() as f32);
        }
        assert_eq!(embedder.call_count(), 1);
    }

    #[tokio::test]
    async fn test_build_schema_error_skips_embedding() {
        let embedder = Arc::new(MockEmbedder::from_fn(|_| vec![1.0]));
        let builder = CorpusBuilder::new(embedder.clone());
        let table = RawTable::from_strings(&["Ticket ID"], &[&["T1"]]);

        let err = builder.build(&table).await.unwrap_err();
        assert!(matches!(err, TicketLensError::Schema { .. }));
        assert_eq!(embedder.call_count(), 0);
    }

    #[tokio::test]
    async fn test_build_propagates_provider_error() {
        let builder = CorpusBuilder::new(Arc::new(MockEmbedder::failing("unauthorized")));
        let err = builder.build(&sample_table()).await.unwrap_err();
        assert!(matches!(err, TicketLensError::Provider(_)));
    }
}
