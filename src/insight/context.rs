//! Prompt context rendering for matched tickets.

use crate::search::ScoredTicket;

/// Columns shown to the model, in order.
const TABLE_COLUMNS: [&str; 5] = ["Ticket ID", "Status", "Priority", "Summary", "Comments"];

/// Render tickets as a plain-text table with right-aligned columns.
pub fn render_ticket_table(hits: &[ScoredTicket]) -> String {
    let rows: Vec<[String; 5]> = hits
        .iter()
        .map(|h| {
            let r = &h.record;
            [
                single_line(&r.id),
                single_line(&r.status),
                single_line(&r.priority),
                single_line(&r.summary),
                single_line(&r.comments),
            ]
        })
        .collect();

    let mut widths = TABLE_COLUMNS.map(|c| c.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format_row(&TABLE_COLUMNS, &widths));
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(format_row(&cells, &widths));
    }
    lines.join("\n")
}

fn format_row(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
