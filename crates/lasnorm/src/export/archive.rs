//! Deflate-compressed zip archives of exported logs.

use std::io::{Read, Seek, Write};
use std::path::{Component, Path};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{LasNormError, Result};

/// Default file name for batch archives.
pub const DEFAULT_ARCHIVE_NAME: &str = "all_standardized_las_files.zip";

/// Streams named entries into a `.zip`.
///
/// Entry names must be plain relative paths: empty names, absolute paths
/// and `.`/`..` components are rejected before anything is written.
pub struct ArchiveWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    entries: Vec<String>,
}

impl<W: Write + Seek> ArchiveWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            entries: Vec::new(),
        }
    }

    /// Append one file.
    pub fn add(&mut self, name: &str, contents: &[u8]) -> Result<()> {
        if !is_plain_entry_name(name) {
            return Err(LasNormError::Export(format!(
                "'{}' is not a valid archive entry name",
                name
            )));
        }

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);
        self.zip
            .start_file(name, options)
            .map_err(|e| LasNormError::Export(format!("failed to add '{}' to archive: {}", name, e)))?;
        self.zip
            .write_all(contents)
            .map_err(|e| LasNormError::Export(format!("failed to write '{}': {}", name, e)))?;
        self.entries.push(name.to_string());
        Ok(())
    }

    /// Names added so far.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Write the central directory, returning the inner writer.
    pub fn finish(self) -> Result<W> {
        self.zip
            .finish()
            .map_err(|e| LasNormError::Export(format!("failed to finish archive: {}", e)))
    }
}

fn is_plain_entry_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('\\')
        && Path::new(name)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// Read every file entry of a `.zip` as `(name, contents)`, in archive order.
pub fn read_archive(reader: impl Read + Seek) -> Result<Vec<(String, Vec<u8>)>> {
    let mut archive = ZipArchive::new(reader)
        .map_err(|e| LasNormError::Export(format!("failed to read archive: {}", e)))?;
    let mut files = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| LasNormError::Export(format!("bad archive entry: {}", e)))?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        let mut contents = Vec::new();
        entry
            .read_to_end(&mut contents)
            .map_err(|e| LasNormError::Export(format!("failed to read '{}': {}", name, e)))?;
        files.push((name, contents));
    }

    Ok(files)
}
