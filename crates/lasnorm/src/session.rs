//! The session: loaded logs, standard names and dataset for one run.

use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::error::{LasNormError, Result};
use crate::export::{BatchExporter, BatchOutput};
use crate::fusion::{CollisionPolicy, ExternalDataset};
use crate::input::{ParserConfig, SourceMetadata, hash_bytes};
use crate::las::{LasReader, LasWriter, WellLog, WriteOptions};
use crate::pipeline::{Pipeline, ProcessedLog};
use crate::preview::{self, CurveComparison, PlotSeries};
use crate::standardize::{StandardNames, Standardizer};

/// Shown when there is nothing to process yet.
pub const GUIDANCE: &str =
    "Load one or more LAS files and provide at least one standard curve name to begin.";

/// Settings shared by every stage of a session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// How external datasets are parsed.
    pub parser: ParserConfig,
    /// How duplicate mnemonics are resolved in the tabular view.
    pub collision: CollisionPolicy,
    /// How standardized logs are written.
    pub write: WriteOptions,
}

/// Holds everything a user has loaded.
///
/// Processing never changes what the session holds: every call builds a
/// [`Pipeline`] snapshot and works on copies of the logs.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    reader: LasReader,
    logs: IndexMap<String, (WellLog, SourceMetadata)>,
    names: StandardNames,
    dataset: Option<ExternalDataset>,
}

impl Session {
    /// Create a session with the default standard names.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            reader: LasReader::new(),
            logs: IndexMap::new(),
            names: StandardNames::default(),
            dataset: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // ---- logs ----

    /// Parse and add a log from memory. A log with the same name is
    /// replaced.
    pub fn add_log_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<&WellLog> {
        let log = self.reader.read_bytes(name, bytes)?;
        let metadata = SourceMetadata::new(
            name.into(),
            hash_bytes(bytes),
            bytes.len() as u64,
            "las".to_string(),
            log.row_count(),
            log.curves.len(),
        );
        Ok(self.insert(log, metadata))
    }

    /// Read and add a log from disk, keyed by its file name.
    pub fn load_log(&mut self, path: impl AsRef<Path>) -> Result<&WellLog> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| LasNormError::io(path, e))?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let log = self.reader.read_bytes(name, &bytes)?;
        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash_bytes(&bytes),
            bytes.len() as u64,
            "las".to_string(),
            log.row_count(),
            log.curves.len(),
        );
        Ok(self.insert(log, metadata))
    }

    fn insert(&mut self, log: WellLog, metadata: SourceMetadata) -> &WellLog {
        debug!(source = %log.source, curves = log.curves.len(), rows = log.row_count(), "loaded log");
        let name = log.source.clone();
        let (index, _) = self.logs.insert_full(name, (log, metadata));
        &self.logs[index].0
    }

    pub fn remove_log(&mut self, name: &str) -> Option<WellLog> {
        self.logs.shift_remove(name).map(|(log, _)| log)
    }

    pub fn log(&self, name: &str) -> Option<&WellLog> {
        self.logs.get(name).map(|(log, _)| log)
    }

    pub fn metadata(&self, name: &str) -> Option<&SourceMetadata> {
        self.logs.get(name).map(|(_, meta)| meta)
    }

    /// Loaded log names in load order.
    pub fn log_names(&self) -> Vec<&str> {
        self.logs.keys().map(String::as_str).collect()
    }

    pub fn logs(&self) -> impl Iterator<Item = &WellLog> {
        self.logs.values().map(|(log, _)| log)
    }

    // ---- names and dataset ----

    pub fn set_names(&mut self, names: StandardNames) {
        self.names = names;
    }

    pub fn names(&self) -> &StandardNames {
        &self.names
    }

    /// Load the external dataset, replacing any previous one.
    pub fn load_dataset(&mut self, path: impl AsRef<Path>) -> Result<&ExternalDataset> {
        let (dataset, metadata) = ExternalDataset::load(path, self.config.parser.clone())?;
        info!(
            dataset = %metadata.file,
            format = %metadata.format,
            rows = metadata.row_count,
            columns = metadata.column_count,
            "loaded dataset"
        );
        Ok(&*self.dataset.insert(dataset))
    }

    pub fn set_dataset(&mut self, dataset: ExternalDataset) {
        self.dataset = Some(dataset);
    }

    pub fn clear_dataset(&mut self) {
        self.dataset = None;
    }

    pub fn dataset(&self) -> Option<&ExternalDataset> {
        self.dataset.as_ref()
    }

    // ---- processing ----

    /// Whether there is at least one log and one standard name.
    pub fn is_ready(&self) -> bool {
        !self.logs.is_empty() && !self.names.is_empty()
    }

    /// A pipeline over the current names, dataset and settings.
    pub fn pipeline(&self) -> Pipeline<'_> {
        Pipeline::new(self.names.clone())
            .with_dataset(self.dataset.as_ref())
            .with_collision_policy(self.config.collision)
            .with_writer(LasWriter::with_options(self.config.write.clone()))
    }

    fn require(&self, name: &str) -> Result<&WellLog> {
        self.log(name)
            .ok_or_else(|| LasNormError::UnknownLog(name.to_string()))
    }

    /// Standardize and fuse one log.
    pub fn process(&self, name: &str) -> Result<ProcessedLog> {
        self.pipeline().process(self.require(name)?)
    }

    /// Standardize, fuse and serialize one log.
    pub fn export_log(&self, name: &str) -> Result<(ProcessedLog, Vec<u8>)> {
        self.pipeline().render(self.require(name)?)
    }

    /// Export every loaded log into an in-memory archive.
    pub fn export_archive(&self) -> Result<BatchOutput> {
        let pipeline = self.pipeline();
        BatchExporter::new(&pipeline).export_to_vec(self.logs())
    }

    /// Before/after mnemonics of one log.
    pub fn curve_comparison(&self, name: &str) -> Result<CurveComparison> {
        let standardizer = Standardizer::new(self.names.clone());
        Ok(CurveComparison::new(self.require(name)?, &standardizer))
    }

    /// Depth series of the processed log. With no mnemonics, the first few
    /// curves are plotted.
    pub fn plot_series(&self, name: &str, mnemonics: &[String]) -> Result<Vec<PlotSeries>> {
        let processed = self.process(name)?;
        let selection = if mnemonics.is_empty() {
            preview::default_selection(&processed.log)
        } else {
            mnemonics.to_vec()
        };
        Ok(preview::plot_series(&processed.log, &selection))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
