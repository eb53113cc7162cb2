//! Ticket records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Column holding the unique ticket identifier.
pub const TICKET_ID: &str = "Ticket ID";
pub const STATUS: &str = "Status";
pub const PRIORITY: &str = "Priority";
pub const CUSTOMER: &str = "Customer";
pub const SUMMARY: &str = "Summary";
pub const COMMENTS: &str = "Comments";
pub const CREATED_DATE: &str = "Created Date";
pub const RESOLVED_DATE: &str = "Resolved Date";

/// Columns every ticket sheet must contain, in embedding-text order.
pub const REQUIRED_COLUMNS: [&str; 6] = [TICKET_ID, STATUS, PRIORITY, CUSTOMER, SUMMARY, COMMENTS];

/// One row of the uploaded ticket history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketRecord {
    pub id: String,
    pub status: String,
    pub priority: String,
    pub customer: String,
    pub summary: String,
    pub comments: String,
    pub created: Option<NaiveDateTime>,
    pub resolved: Option<NaiveDateTime>,
    /// Labeled concatenation of the fields above; the embedding input.
    pub full_text: String,
}

impl TicketRecord {
    /// Create a record and synthesize its `full_text`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        status: String,
        priority: String,
        customer: String,
        summary: String,
        comments: String,
        created: Option<NaiveDateTime>,
        resolved: Option<NaiveDateTime>,
    ) -> Self {
        let full_text = format!(
            "Ticket ID: {} Status: {} Priority: {} Customer: {} Summary: {} Comments: {}",
            id, status, priority, customer, summary, comments
        );

        Self {
            id,
            status,
            priority,
            customer,
            summary,
            comments,
            created,
            resolved,
            full_text,
        }
    }

    /// Whether the ticket has a resolution timestamp.
    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_text_label_order() {
        let record = TicketRecord::new(
            "T1".to_string(),
            "Open".to_string(),
            "High".to_string(),
            "Acme".to_string(),
            "Login fails".to_string(),
            "".to_string(),
            None,
            None,
        );

        assert_eq!(
            record.full_text,
            "Ticket ID: T1 Status: Open Priority: High Customer: Acme Summary: Login fails Comments: "
        );
        assert!(!record.is_resolved());
    }
}
