//! LAS 2.0 writer.

use std::fs;
use std::path::Path;

use super::model::{HeaderItem, Section, WellLog};
use crate::error::{LasNormError, Result};

/// Format version stamped on every written file.
pub const WRITE_VERSION: &str = "2.0";

/// Options for serializing logs.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Decimal places for data values.
    pub precision: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { precision: 5 }
    }
}

/// Serializes [`WellLog`]s as LAS 2.0, unwrapped.
///
/// `~W`, `~P`, `~O` and custom sections are written item for item as they
/// were read. `~V` is replaced by `VERS 2.0` / `WRAP NO`.
#[derive(Debug, Clone, Default)]
pub struct LasWriter {
    options: WriteOptions,
}

impl LasWriter {
    /// Create a writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Serialize a log to bytes.
    pub fn to_bytes(&self, log: &WellLog) -> Result<Vec<u8>> {
        self.write_string(log).map(String::into_bytes)
    }

    /// Serialize a log and write it to `path`.
    pub fn write_file(&self, log: &WellLog, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.write_string(log)?;
        fs::write(path, text).map_err(|e| LasNormError::io(path, e))
    }

    /// Serialize a log to a string.
    pub fn write_string(&self, log: &WellLog) -> Result<String> {
        let rows = log.row_count();
        if let Some(curve) = log.curves.iter().find(|c| c.data.len() != rows) {
            return Err(LasNormError::Export(format!(
                "curve '{}' in '{}' has {} samples, depth axis has {}",
                curve.mnemonic,
                log.source,
                curve.data.len(),
                rows
            )));
        }

        let mut out = String::new();

        out.push_str("~Version Information\n");
        let mut version = vec![
            HeaderItem::new("VERS", "", WRITE_VERSION, "CWLS log ASCII Standard -VERSION 2.0"),
            HeaderItem::new("WRAP", "", "NO", "One line per depth step"),
        ];
        version.extend(
            log.version
                .items
                .iter()
                .filter(|item| {
                    !item.mnemonic.eq_ignore_ascii_case("VERS")
                        && !item.mnemonic.eq_ignore_ascii_case("WRAP")
                })
                .cloned(),
        );
        write_items(&mut out, &version);

        write_section(&mut out, &log.well, "Well Information");

        out.push_str("~Curve Information\n");
        let curve_items: Vec<HeaderItem> = log.curves.iter().map(|c| c.header()).collect();
        write_items(&mut out, &curve_items);

        if !log.params.is_empty() {
            write_section(&mut out, &log.params, "Parameter Information");
        }

        if !log.other.is_empty() {
            out.push_str("~Other Information\n");
            for line in &log.other {
                out.push_str(line);
                out.push('\n');
            }
        }

        for section in &log.extra {
            write_section(&mut out, section, "");
        }

        self.write_data(&mut out, log);

        Ok(out)
    }

    fn write_data(&self, out: &mut String, log: &WellLog) {
        out.push_str("~ASCII");
        for curve in &log.curves {
            out.push(' ');
            out.push_str(&curve.mnemonic);
        }
        out.push('\n');

        let precision = self.options.precision;
        // The declared NULL text is written as-is; rounding it to the data
        // precision would turn missing samples into real values.
        let null = match (log.null_value(), log.well.value_of("NULL")) {
            (Some(_), Some(text)) => text.to_string(),
            _ => "NaN".to_string(),
        };

        let columns: Vec<Vec<String>> = log
            .curves
            .iter()
            .map(|curve| {
                curve
                    .data
                    .iter()
                    .map(|v| match v {
                        Some(v) => format!("{:.*}", precision, v),
                        None => null.clone(),
                    })
                    .collect()
            })
            .collect();

        let widths: Vec<usize> = columns
            .iter()
            .map(|col| col.iter().map(String::len).max().unwrap_or(0))
            .collect();

        for row in 0..log.row_count() {
            let mut line = String::new();
            for (col, width) in columns.iter().zip(&widths) {
                line.push_str(&format!(" {:>width$}", col[row], width = width));
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }
}

fn write_section(out: &mut String, section: &Section, default_title: &str) {
    let title = if section.title.is_empty() {
        default_title
    } else {
        section.title.as_str()
    };
    out.push('~');
    out.push_str(title);
    out.push('\n');
    write_items(out, &section.items);
}

/// Write header items with the `MNEM.UNIT` and value columns aligned.
fn write_items(out: &mut String, items: &[HeaderItem]) {
    let keys: Vec<String> = items
        .iter()
        .map(|item| format!("{}.{}", item.mnemonic, item.unit))
        .collect();
    let key_width = keys.iter().map(String::len).max().unwrap_or(0);
    let value_width = items.iter().map(|i| i.value.len()).max().unwrap_or(0);

    for (key, item) in keys.iter().zip(items) {
        out.push_str(&format!(
            " {:<kw$} {:>vw$} : {}\n",
            key,
            item.value,
            item.description,
            kw = key_width,
            vw = value_width
        ));
    }
}
