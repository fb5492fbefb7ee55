//! Writing standardized logs: single files and batch archives.

mod archive;
mod batch;
mod rebuild;

pub use archive::{ArchiveWriter, DEFAULT_ARCHIVE_NAME, read_archive};
pub use batch::{BatchExporter, BatchItem, BatchOutput, BatchReport};
pub use rebuild::rebuild_log;
