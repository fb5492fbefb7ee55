//! LAS 1.2 / 2.0 reader.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::model::{Curve, HeaderItem, Section, WellLog};
use crate::error::{LasNormError, Result};

/// `MNEM.UNIT  VALUE : DESCRIPTION`. Value and description are split on the
/// last colon of `rest`.
static HEADER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<mnemonic>[^.]*?)\s*\.(?P<unit>[^\s:]*)(?P<rest>.*)$").unwrap()
});

/// Section kinds, keyed by the first letter after `~`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Version,
    Well,
    Curves,
    Params,
    Other,
    Data,
    Custom,
}

impl SectionKind {
    fn from_title(title: &str) -> Self {
        match title.chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('V') => SectionKind::Version,
            Some('W') => SectionKind::Well,
            Some('C') => SectionKind::Curves,
            Some('P') => SectionKind::Params,
            Some('O') => SectionKind::Other,
            Some('A') => SectionKind::Data,
            _ => SectionKind::Custom,
        }
    }
}

/// Reads LAS files into [`WellLog`]s.
///
/// Parsing is strict about the data section: a row with the wrong number of
/// values or a token that is not a number fails the whole file.
#[derive(Debug, Clone, Default)]
pub struct LasReader;

impl LasReader {
    /// Create a new reader.
    pub fn new() -> Self {
        Self
    }

    /// Read a file from disk. The log's source is the file name.
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<WellLog> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| LasNormError::io(path, e))?;
        let source = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.read_bytes(source, &bytes)
    }

    /// Read raw bytes. Invalid UTF-8 sequences are dropped.
    pub fn read_bytes(&self, source: impl Into<String>, bytes: &[u8]) -> Result<WellLog> {
        let text = decode_lossy(bytes);
        self.read_str(source, &text)
    }

    /// Read LAS text.
    pub fn read_str(&self, source: impl Into<String>, text: &str) -> Result<WellLog> {
        let mut log = WellLog::new(source);
        let mut current: Option<SectionKind> = None;
        let mut seen_curves = false;
        let mut seen_data = false;
        let mut data_lines: Vec<(usize, &str)> = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = raw.trim();

            if let Some(title) = trimmed.strip_prefix('~') {
                let title = title.trim();
                let kind = SectionKind::from_title(title);
                match kind {
                    SectionKind::Version => log.version.title = title.to_string(),
                    SectionKind::Well => log.well.title = title.to_string(),
                    SectionKind::Params => log.params.title = title.to_string(),
                    SectionKind::Curves => seen_curves = true,
                    SectionKind::Data => {
                        if !seen_curves {
                            return Err(LasNormError::las(
                                line_no,
                                "~A section found before ~C section",
                            ));
                        }
                        seen_data = true;
                    }
                    SectionKind::Custom => log.extra.push(Section::new(title)),
                    SectionKind::Other => {}
                }
                current = Some(kind);
                continue;
            }

            // ~O is free text: keep every line as written.
            if current == Some(SectionKind::Other) {
                log.other.push(raw.to_string());
                continue;
            }

            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some(kind) = current else {
                return Err(LasNormError::las(line_no, "content before the first section"));
            };

            match kind {
                SectionKind::Data => data_lines.push((line_no, trimmed)),
                SectionKind::Version => log.version.items.push(parse_header_line(raw, line_no)?),
                SectionKind::Well => log.well.items.push(parse_header_line(raw, line_no)?),
                SectionKind::Params => log.params.items.push(parse_header_line(raw, line_no)?),
                SectionKind::Curves => {
                    let item = parse_header_line(raw, line_no)?;
                    if item.mnemonic.is_empty() {
                        return Err(LasNormError::las(line_no, "curve without a mnemonic"));
                    }
                    log.curves.push(Curve::from_header(item));
                }
                SectionKind::Custom => {
                    let item = parse_header_line(raw, line_no)?;
                    if let Some(section) = log.extra.last_mut() {
                        section.items.push(item);
                    }
                }
                SectionKind::Other => {}
            }
        }

        check_version(&log)?;

        if !seen_curves || log.curves.is_empty() {
            return Err(LasNormError::EmptyData(format!(
                "'{}' has no curves in a ~C section",
                log.source
            )));
        }
        if !seen_data {
            return Err(LasNormError::EmptyData(format!(
                "'{}' has no ~A data section",
                log.source
            )));
        }

        let columns = if log.is_wrapped() {
            read_wrapped(&data_lines, log.curves.len(), log.null_value())?
        } else {
            read_unwrapped(&data_lines, log.curves.len(), log.null_value())?
        };

        for (curve, data) in log.curves.iter_mut().zip(columns) {
            curve.data = data;
        }

        debug!(
            source = %log.source,
            curves = log.curves.len(),
            rows = log.row_count(),
            "parsed LAS file"
        );

        Ok(log)
    }
}

/// Decode bytes as UTF-8, dropping anything that is not valid.
fn decode_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_start_matches('\u{feff}')
        .replace('\u{fffd}', "")
}

/// Split a header line into its four fields.
fn parse_header_line(line: &str, line_no: usize) -> Result<HeaderItem> {
    let caps = HEADER_LINE.captures(line).ok_or_else(|| {
        LasNormError::las(
            line_no,
            format!("expected 'MNEM.UNIT VALUE : DESCRIPTION', found '{}'", line.trim()),
        )
    })?;

    let rest = &caps["rest"];
    let (value, description) = match rest.rfind(':') {
        Some(pos) => (&rest[..pos], &rest[pos + 1..]),
        None => (rest, ""),
    };

    Ok(HeaderItem::new(
        caps["mnemonic"].trim(),
        &caps["unit"],
        value.trim(),
        description.trim(),
    ))
}

fn check_version(log: &WellLog) -> Result<()> {
    let Some(version) = log.version_number() else {
        return Ok(());
    };
    match version.parse::<f64>() {
        Ok(v) if v < 3.0 => Ok(()),
        _ => Err(LasNormError::UnsupportedFormat(format!(
            "LAS version '{}' in '{}' (only 1.2 and 2.0 are read)",
            version, log.source
        ))),
    }
}

fn parse_sample(token: &str, null: Option<f64>, line_no: usize) -> Result<Option<f64>> {
    let value: f64 = token
        .parse()
        .map_err(|_| LasNormError::las(line_no, format!("invalid number '{}'", token)))?;

    if value.is_nan() || Some(value) == null {
        Ok(None)
    } else {
        Ok(Some(value))
    }
}

fn read_unwrapped(
    lines: &[(usize, &str)],
    curve_count: usize,
    null: Option<f64>,
) -> Result<Vec<Vec<Option<f64>>>> {
    let mut columns = vec![Vec::with_capacity(lines.len()); curve_count];

    for &(line_no, line) in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != curve_count {
            return Err(LasNormError::las(
                line_no,
                format!("expected {} values, found {}", curve_count, tokens.len()),
            ));
        }
        for (column, token) in columns.iter_mut().zip(tokens) {
            column.push(parse_sample(token, null, line_no)?);
        }
    }

    Ok(columns)
}

fn read_wrapped(
    lines: &[(usize, &str)],
    curve_count: usize,
    null: Option<f64>,
) -> Result<Vec<Vec<Option<f64>>>> {
    let mut columns = vec![Vec::new(); curve_count];
    let mut next = 0;
    let mut last_line = 0;

    for &(line_no, line) in lines {
        last_line = line_no;
        for token in line.split_whitespace() {
            columns[next].push(parse_sample(token, null, line_no)?);
            next = (next + 1) % curve_count;
        }
    }

    if next != 0 {
        return Err(LasNormError::las(
            last_line,
            format!(
                "wrapped data ends mid-step ({} of {} values)",
                next, curve_count
            ),
        ));
    }

    Ok(columns)
}
