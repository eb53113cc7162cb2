//! Synonym-based query expansion.

use tracing::debug;

/// Trigger substrings and the synonyms appended when they occur, in order.
pub const SYNONYMS: &[(&str, &[&str])] = &[
    ("bug", &["issue", "problem", "error"]),
    ("ui", &["interface", "layout", "design"]),
    ("login", &["authentication", "signin", "access"]),
    ("performance", &["speed", "slow", "timeout"]),
];

/// Expand a query with domain synonyms to widen recall.
///
/// Every trigger found (case-insensitive substring) appends its whole group.
/// The original query text is kept as typed.
pub fn enhance(query: &str) -> String {
    let lower = query.to_lowercase();
    let mut enhanced = query.to_string();

    for (trigger, synonyms) in SYNONYMS {
        if lower.contains(trigger) {
            enhanced.push(' ');
            enhanced.push_str(&synonyms.join(" "));
        }
    }

    if enhanced.len() != query.len() {
        debug!("Enhanced query: {}", enhanced);
    }
    enhanced
}
