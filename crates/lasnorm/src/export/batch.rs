//! Standardize and fuse a collection of logs into one archive.

use std::io::{Cursor, Seek, Write};

use serde::Serialize;
use tracing::{info, warn};

use super::archive::ArchiveWriter;
use crate::error::Result;
use crate::fusion::{Collision, FusionOutcome};
use crate::las::WellLog;
use crate::pipeline::Pipeline;
use crate::standardize::Rename;

/// Result for one log of a batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    /// Source file name, also the archive entry name.
    pub file_name: String,
    pub renames: Vec<Rename>,
    pub collisions: Vec<Collision>,
    pub fusion: FusionOutcome,
    /// Size of the archived file; zero when `error` is set.
    pub bytes_written: usize,
    /// Why the log is missing from the archive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchItem {
    pub fn is_exported(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-log results of a batch export.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    /// Number of logs written to the archive.
    pub fn exported(&self) -> usize {
        self.items.iter().filter(|i| i.is_exported()).count()
    }

    /// Number of logs left out of the archive.
    pub fn failed(&self) -> usize {
        self.items.len() - self.exported()
    }

    /// Number of logs whose fusion was skipped or failed.
    pub fn fusion_warnings(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.fusion.warning().is_some())
            .count()
    }
}

/// An in-memory archive with its report.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub archive: Vec<u8>,
    pub report: BatchReport,
}

/// Runs the pipeline over many logs, one archive entry per log.
///
/// Logs are processed independently: a log that fails to render or to be
/// added to the archive is recorded in its [`BatchItem`] and never stops
/// the others. Only finishing the archive can abort the batch.
pub struct BatchExporter<'p, 'a> {
    pipeline: &'p Pipeline<'a>,
}

impl<'p, 'a> BatchExporter<'p, 'a> {
    pub fn new(pipeline: &'p Pipeline<'a>) -> Self {
        Self { pipeline }
    }

    /// Export into `writer` as a deflated `.zip`.
    pub fn export<'l, W, I>(&self, logs: I, writer: W) -> Result<(W, BatchReport)>
    where
        W: Write + Seek,
        I: IntoIterator<Item = &'l WellLog>,
    {
        let mut archive = ArchiveWriter::new(writer);
        let mut report = BatchReport::default();

        for log in logs {
            let item = match self.pipeline.render(log) {
                Ok((processed, bytes)) => {
                    let added = archive.add(&log.source, &bytes);
                    if let Err(e) = &added {
                        warn!(source = %log.source, error = %e, "log left out of batch");
                    }
                    BatchItem {
                        file_name: log.source.clone(),
                        renames: processed.renames,
                        collisions: processed.collisions,
                        fusion: processed.fusion,
                        bytes_written: if added.is_ok() { bytes.len() } else { 0 },
                        error: added.err().map(|e| e.to_string()),
                    }
                }
                Err(e) => {
                    warn!(source = %log.source, error = %e, "log left out of batch");
                    BatchItem {
                        file_name: log.source.clone(),
                        renames: Vec::new(),
                        collisions: Vec::new(),
                        fusion: FusionOutcome::NotRequested,
                        bytes_written: 0,
                        error: Some(e.to_string()),
                    }
                }
            };
            report.items.push(item);
        }

        let writer = archive.finish()?;
        info!(
            exported = report.exported(),
            failed = report.failed(),
            "batch export finished"
        );

        Ok((writer, report))
    }

    /// Export into an in-memory archive.
    pub fn export_to_vec<'l, I>(&self, logs: I) -> Result<BatchOutput>
    where
        I: IntoIterator<Item = &'l WellLog>,
    {
        let (cursor, report) = self.export(logs, Cursor::new(Vec::new()))?;
        Ok(BatchOutput {
            archive: cursor.into_inner(),
            report,
        })
    }
}
