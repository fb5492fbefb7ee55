//! Spreadsheet datasets: the first sheet of an Excel or OpenDocument workbook.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

use super::source::DataTable;
use crate::error::{LasNormError, Result};

/// File extensions read as workbooks rather than delimited text.
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// The lower-cased spreadsheet extension of `path`, if it has one.
pub fn spreadsheet_format(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    SPREADSHEET_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(ext)
}

/// Read the first sheet of a workbook. The first row is the header.
pub fn read_first_sheet(bytes: &[u8], max_rows: Option<usize>) -> Result<DataTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LasNormError::EmptyData("workbook has no sheets".to_string()))??;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header) => header.iter().map(cell_text).collect(),
        None => return Err(LasNormError::EmptyData("sheet has no header row".to_string())),
    };
    if headers.iter().all(|h| h.is_empty()) {
        return Err(LasNormError::EmptyData("No columns found".to_string()));
    }

    let limit = max_rows.unwrap_or(usize::MAX);
    let table_rows = rows
        .filter(|row| !row.iter().all(|cell| matches!(cell, Data::Empty)))
        .take(limit)
        .map(|row| {
            let mut cells: Vec<String> = row.iter().map(cell_text).collect();
            cells.resize(headers.len(), String::new());
            cells
        })
        .collect();

    Ok(DataTable::new(headers, table_rows, None))
}

/// Text of one cell as the dataset loader expects it. Error cells are
/// treated as empty.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}
