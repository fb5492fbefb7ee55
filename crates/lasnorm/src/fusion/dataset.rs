//! External petrophysical dataset keyed by depth.

use std::path::Path;

use serde::Serialize;
use tracing::warn;

use crate::error::Result;
use crate::input::{DataTable, DatasetParser, ParserConfig, SourceMetadata};

/// Header names (case-insensitive) recognised as a depth column.
pub const DEPTH_COLUMN_NAMES: &[&str] = &["dept", "depth"];

/// A numeric table with a header row, shared read-only by every join.
#[derive(Debug, Clone, Serialize)]
pub struct ExternalDataset {
    /// Source name, normally the file name.
    pub name: String,
    pub headers: Vec<String>,
    /// Row-major cells; `None` is a missing value.
    pub rows: Vec<Vec<Option<f64>>>,
    /// Columns dropped at load because they hold text, such as zone or
    /// facies names.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub text_columns: Vec<String>,
}

impl ExternalDataset {
    /// Convert a parsed table.
    ///
    /// A column with any cell that is neither numeric nor null-like is
    /// dropped and listed in `text_columns`. Depth columns are always kept;
    /// their non-numeric cells become missing and never match a log depth.
    pub fn from_table(name: impl Into<String>, table: &DataTable) -> Self {
        let name = name.into();
        let mut kept = Vec::new();
        let mut text_columns = Vec::new();
        for (col, header) in table.headers.iter().enumerate() {
            let bad_cells = table
                .rows
                .iter()
                .filter(|row| cell_at(row, col).is_none())
                .count();
            if bad_cells == 0 {
                kept.push(col);
            } else if is_depth_name(header) {
                warn!(dataset = %name, column = %header, bad_cells, "non-numeric depths treated as missing");
                kept.push(col);
            } else {
                warn!(dataset = %name, column = %header, "dropping non-numeric column");
                text_columns.push(header.clone());
            }
        }

        let rows: Vec<Vec<Option<f64>>> = table
            .rows
            .iter()
            .map(|row| kept.iter().map(|&col| cell_at(row, col).flatten()).collect())
            .collect();

        Self {
            name,
            headers: kept.iter().map(|&col| table.headers[col].clone()).collect(),
            rows,
            text_columns,
        }
    }

    /// Load a delimited file or workbook from disk.
    pub fn load(path: impl AsRef<Path>, config: ParserConfig) -> Result<(Self, SourceMetadata)> {
        let (table, metadata) = DatasetParser::with_config(config).parse_file(path)?;
        let dataset = Self::from_table(metadata.file.clone(), &table);
        Ok((dataset, metadata))
    }

    /// Parse an in-memory delimited file.
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8], config: ParserConfig) -> Result<Self> {
        let (table, _format) = DatasetParser::with_config(config).parse_bytes(bytes)?;
        Ok(Self::from_table(name, &table))
    }

    /// Positions of every column whose name is a depth name.
    pub fn depth_columns(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| is_depth_name(h))
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// A single cell.
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(col).copied().flatten())
    }
}

fn is_depth_name(header: &str) -> bool {
    DEPTH_COLUMN_NAMES
        .iter()
        .any(|name| header.trim().eq_ignore_ascii_case(name))
}

fn cell_at(row: &[String], col: usize) -> Option<Option<f64>> {
    parse_cell(row.get(col).map_or("", String::as_str))
}

/// `Some(None)` for null-like cells, `None` for text that is not a number.
fn parse_cell(cell: &str) -> Option<Option<f64>> {
    if DataTable::is_null_value(cell) {
        return Some(None);
    }
    let value: f64 = cell.trim().parse().ok()?;
    Some(if value.is_nan() { None } else { Some(value) })
}
