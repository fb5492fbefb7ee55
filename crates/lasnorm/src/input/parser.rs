//! Dataset file parser: delimited text with delimiter detection, or the
//! first sheet of a workbook.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::source::{DataTable, SourceMetadata};
use super::spreadsheet::{read_first_sheet, spreadsheet_format};
use crate::error::{LasNormError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Parses dataset files. The first row is always the header.
///
/// Files with a spreadsheet extension are read as workbooks; anything else
/// is delimited text.
pub struct DatasetParser {
    config: ParserConfig,
}

impl DatasetParser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| LasNormError::io(path, e))?;
        let size_bytes = file
            .metadata()
            .map_err(|e| LasNormError::io(path, e))?
            .len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| LasNormError::io(path, e))?;

        let (table, format) = match spreadsheet_format(path) {
            Some(format) => (read_first_sheet(&contents, self.config.max_rows)?, format),
            None => self.parse_bytes(&contents)?,
        };

        let source_metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash_bytes(&contents),
            size_bytes,
            format,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, source_metadata))
    }

    /// Parse in-memory bytes. Returns the table and the detected format name.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<(DataTable, String)> {
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes)?,
        };

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        Ok((self.read_table(bytes, delimiter)?, format))
    }

    fn read_table(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(LasNormError::EmptyData("No columns found".to_string()));
        }

        let mut rows = Vec::new();
        let expected_cols = headers.len();

        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();

            // Pad short rows, truncate long ones
            while row.len() < expected_cols {
                row.push(String::new());
            }
            row.truncate(expected_cols);

            rows.push(row);
        }

        Ok(DataTable::new(headers, rows, Some(delimiter)))
    }
}

impl Default for DatasetParser {
    fn default() -> Self {
        Self::new()
    }
}

/// `sha256:<hex>` digest of a byte slice.
pub(crate) fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{:x}", hasher.finalize())
}

/// Non-blank lines sampled for delimiter detection.
const SAMPLE_LINES: usize = 10;

/// Pick the delimiter that splits the header into at least two fields and
/// gives the most sampled lines that same field count. Ties go to the
/// earlier entry of `DELIMITERS`; with no candidate, comma.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let head = &bytes[..bytes.len().min(64 * 1024)];
    let text = String::from_utf8_lossy(head);
    let lines: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(SAMPLE_LINES)
        .collect();

    let Some(header) = lines.first() else {
        return Err(LasNormError::EmptyData("dataset has no header row".to_string()));
    };

    let mut best: Option<(usize, usize, u8)> = None;
    for &delim in DELIMITERS {
        let fields = count_fields(header, delim);
        if fields < 2 {
            continue;
        }
        let agreeing = lines
            .iter()
            .filter(|line| count_fields(line, delim) == fields)
            .count();
        if best.is_none_or(|(a, f, _)| (agreeing, fields) > (a, f)) {
            best = Some((agreeing, fields, delim));
        }
    }

    Ok(best.map(|(_, _, delim)| delim).unwrap_or(b','))
}

/// Number of fields `delimiter` splits a line into, ignoring quoted text.
fn count_fields(line: &str, delimiter: u8) -> usize {
    let delimiter = delimiter as char;
    let mut in_quotes = false;
    let mut fields = 1;

    for ch in line.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == delimiter && !in_quotes {
            fields += 1;
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"DEPTH,POR,SW\n100,0.2,0.5\n101,0.21,0.4";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"DEPTH\tPOR\tSW\n100\t0.2\t0.5\n101\t0.21\t0.4";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        let data = b"DEPT;PHIE\n100;0,2\n101;0,3";
        assert_eq!(detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_parse_csv() {
        let parser = DatasetParser::new();
        let (table, format) = parser
            .parse_bytes(b"DEPTH, POR ,SW\n100,0.2,0.5\n101,0.21")
            .unwrap();

        assert_eq!(format, "csv");
        assert_eq!(table.headers, vec!["DEPTH", "POR", "SW"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 1), Some("0.2"));
        assert_eq!(table.get(1, 2), Some(""));
    }

    #[test]
    fn test_quoted_delimiters_ignored() {
        let data = b"DEPTH;NOTE\n100;\"a,b,c\"\n101;\"d,e\"";
        assert_eq!(detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_single_column_defaults_to_comma() {
        assert_eq!(detect_delimiter(b"DEPTH\n100\n").unwrap(), b',');
    }

    #[test]
    fn test_max_rows() {
        let parser = DatasetParser::with_config(ParserConfig {
            max_rows: Some(1),
            ..ParserConfig::default()
        });
        let (table, _) = parser.parse_bytes(b"DEPTH,POR\n1,2\n3,4\n").unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(DatasetParser::new().parse_bytes(b"").is_err());
    }

    #[test]
    fn test_hash_format() {
        assert!(hash_bytes(b"abc").starts_with("sha256:ba7816bf"));
    }
}
