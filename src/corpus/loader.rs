//! Spreadsheet reading via calamine.

use super::table::{parse_datetime, Cell, RawTable};
use crate::error::{Result, TicketLensError};
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Reader, Sheets};
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::{debug, instrument};

/// Read the first worksheet of a spreadsheet file.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read_table(path: impl AsRef<Path>) -> Result<RawTable> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(TicketLensError::InvalidInput(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| TicketLensError::Spreadsheet(format!("{}: {}", path.display(), e)))?;
    read_first_sheet(&mut workbook)
}

/// Read the first worksheet of an in-memory spreadsheet (e.g. an upload).
pub fn read_table_from_bytes(bytes: Vec<u8>) -> Result<RawTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| TicketLensError::Spreadsheet(e.to_string()))?;
    read_first_sheet(&mut workbook)
}

fn read_first_sheet<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> Result<RawTable> {
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TicketLensError::Spreadsheet("Workbook has no worksheets".to_string()))?
        .map_err(|e| TicketLensError::Spreadsheet(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| TicketLensError::Spreadsheet("Worksheet is empty".to_string()))?
        .iter()
        .map(|d| convert_cell(d).to_string())
        .collect();

    let rows: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(convert_cell).collect::<Vec<_>>())
        .filter(|row| !row.iter().all(Cell::is_empty))
        .collect();

    debug!("Read {} columns, {} rows", headers.len(), rows.len());
    Ok(RawTable::new(headers, rows))
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(Cell::DateTime)
            .unwrap_or(Cell::Number(dt.as_f64())),
        Data::DateTimeIso(s) => parse_datetime(s)
            .map(Cell::DateTime)
            .unwrap_or_else(|| Cell::Text(s.clone())),
        Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{ExcelDateTime, ExcelDateTimeType};

    #[test]
    fn test_missing_file() {
        let err = read_table("/nonexistent/tickets.xlsx").unwrap_err();
        assert!(matches!(err, TicketLensError::InvalidInput(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tickets.txt");
        std::fs::write(&path, "Ticket ID,Status\n1,Open\n").unwrap();

        let err = read_table(&path).unwrap_err();
        assert!(matches!(err, TicketLensError::Spreadsheet(_)));
    }

    #[test]
    fn test_garbage_bytes() {
        let err = read_table_from_bytes(b"definitely not a workbook".to_vec()).unwrap_err();
        assert!(matches!(err, TicketLensError::Spreadsheet(_)));
    }

    #[test]
    fn test_convert_cell() {
        assert_eq!(convert_cell(&Data::Int(7)), Cell::Number(7.0));
        assert_eq!(convert_cell(&Data::String("  ".to_string())), Cell::Empty);
        assert_eq!(
            convert_cell(&Data::String("Open".to_string())),
            Cell::Text("Open".to_string())
        );
        assert!(matches!(
            convert_cell(&Data::DateTimeIso("2024-01-02T03:04:05".to_string())),
            Cell::DateTime(_)
        ));
    }

    #[test]
    fn test_convert_native_datetime_cell() {
        // Excel serial 45292.5 is 2024-01-01 12:00 in the 1900 date system
        let data = Data::DateTime(ExcelDateTime::new(45292.5, ExcelDateTimeType::DateTime, false));
        let expected = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();

        assert_eq!(convert_cell(&data), Cell::DateTime(expected));
    }
}
