//! Similarity ranking with top-k, threshold and fallback selection.

use super::{ScoredTicket, SearchResult};
use crate::corpus::TicketCorpus;
use crate::error::{Result, TicketLensError};
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// Compute cosine similarity between two vectors.
///
/// Degenerate inputs (empty, mismatched, zero-norm, non-finite) score 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let score = dot_product / (norm_a * norm_b);
    if score.is_finite() {
        score
    } else {
        0.0
    }
}

/// Rank corpus tickets against a query embedding.
///
/// Takes the `top_k` best scores (ties go to the ticket later in the corpus),
/// keeps those at or above `threshold`, and falls back to the single best
/// ticket when none qualify. The result is empty only for an empty corpus.
#[instrument(skip(query, corpus), fields(tickets = corpus.len()))]
pub fn rank(query: &[f32], corpus: &TicketCorpus, top_k: usize, threshold: f32) -> Result<SearchResult> {
    if corpus.is_empty() {
        return Ok(SearchResult::default());
    }

    if query.len() != corpus.dimensions() {
        return Err(TicketLensError::DimensionMismatch {
            expected: corpus.dimensions(),
            actual: query.len(),
        });
    }

    let mut scored: Vec<(usize, f32)> = corpus
        .embeddings()
        .iter()
        .map(|e| cosine_similarity(query, e))
        .enumerate()
        .collect();

    scored.sort_by(|(ia, sa), (ib, sb)| {
        sb.partial_cmp(sa)
            .unwrap_or(Ordering::Equal)
            .then_with(|| ib.cmp(ia))
    });
    scored.truncate(top_k.max(1));

    let to_hit = |&(index, score): &(usize, f32)| ScoredTicket {
        record: corpus.records()[index].clone(),
        score,
        index,
    };

    let hits: Vec<ScoredTicket> = scored
        .iter()
        .filter(|(_, score)| *score >= threshold)
        .map(to_hit)
        .collect();

    let result = if hits.is_empty() {
        SearchResult {
            hits: scored.first().map(to_hit).into_iter().collect(),
            fallback: true,
        }
    } else {
        SearchResult {
            hits,
            fallback: false,
        }
    };

    debug!(
        "Selected {} tickets (fallback: {})",
        result.len(),
        result.fallback
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::TicketRecord;

    fn corpus(embeddings: Vec<Vec<f32>>) -> TicketCorpus {
        let records = (0..embeddings.len())
            .map(|i| {
                TicketRecord::new(
                    format!("T{}", i),
                    "Open".to_string(),
                    "High".to_string(),
                    "Acme".to_string(),
                    format!("Summary {}", i),
                    String::new(),
                    None,
                    None,
                )
            })
            .collect();
        TicketCorpus::new(records, embeddings).unwrap()
    }

    fn ids(result: &SearchResult) -> Vec<&str> {
        result.hits.iter().map(|h| h.record.id.as_str()).collect()
    }

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);

        let c = vec![0.0, 1.0, 0.0];
        assert!((cosine_similarity(&a, &c)).abs() < 0.001);

        let d = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &d) + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_degenerate() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[f32::NAN, 1.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_threshold_filters_within_top_k() {
        let corpus = corpus(vec![
            vec![1.0, 0.0],
            vec![0.9, 0.1],
            vec![0.0, 1.0],
            vec![0.7, 0.7],
        ]);

        let result = rank(&[1.0, 0.0], &corpus, 5, 0.5).unwrap();
        assert!(!result.fallback);
        assert_eq!(ids(&result), vec!["T0", "T1", "T3"]);
        assert!(result.hits.iter().all(|h| h.score >= 0.5));
        assert!(result.hits.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_size_never_exceeds_top_k() {
        let corpus = corpus(vec![vec![1.0, 0.0]; 10]);
        let result = rank(&[1.0, 0.0], &corpus, 3, 0.0).unwrap();
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_fallback_returns_best_match() {
        let corpus = corpus(vec![vec![0.0, 1.0], vec![0.3, 1.0], vec![-1.0, 0.0]]);
        let result = rank(&[1.0, 0.0], &corpus, 5, 0.9).unwrap();
        assert!(result.fallback);
        assert_eq!(ids(&result), vec!["T1"]);
    }

    #[test]
    fn test_fallback_with_zero_vectors() {
        let corpus = corpus(vec![vec![0.0, 0.0], vec![0.0, 0.0]]);
        let result = rank(&[0.0, 0.0], &corpus, 5, 0.5).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.hits[0].score, 0.0);
    }

    #[test]
    fn test_ties_favor_later_tickets() {
        let corpus = corpus(vec![vec![1.0, 0.0], vec![1.0, 0.0], vec![1.0, 0.0]]);

        let result = rank(&[1.0, 0.0], &corpus, 2, 0.5).unwrap();
        assert_eq!(ids(&result), vec!["T2", "T1"]);

        let result = rank(&[1.0, 0.0], &corpus, 1, 2.0).unwrap();
        assert_eq!(ids(&result), vec!["T2"]);
    }

    #[test]
    fn test_zero_top_k_still_returns_one() {
        let corpus = corpus(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let result = rank(&[1.0, 0.0], &corpus, 0, 0.5).unwrap();
        assert_eq!(ids(&result), vec!["T0"]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let corpus = corpus(vec![vec![1.0, 0.0, 0.0]]);
        let err = rank(&[1.0, 0.0], &corpus, 5, 0.5).unwrap_err();
        assert!(matches!(
            err,
            TicketLensError::DimensionMismatch { expected: 3, actual: 2 }
        ));
    }

    #[test]
    fn test_empty_corpus_yields_empty_result() {
        let result = rank(&[1.0], &TicketCorpus::default(), 5, 0.5).unwrap();
        assert!(result.is_empty());
    }
}
