//! The per-log processing pipeline: standardize, tabulate, fuse, rebuild.

use serde::Serialize;

use crate::error::Result;
use crate::export::rebuild_log;
use crate::fusion::{Collision, CollisionPolicy, DepthFusion, DepthTable, ExternalDataset, FusionOutcome};
use crate::las::{LasWriter, WellLog};
use crate::standardize::{Rename, StandardNames, Standardizer};

/// Everything produced for one log.
#[derive(Debug, Clone)]
pub struct ProcessedLog {
    /// Mnemonics as read.
    pub original_mnemonics: Vec<String>,
    pub renames: Vec<Rename>,
    /// Duplicate mnemonics after renaming and how the table resolved them.
    pub collisions: Vec<Collision>,
    /// The table the output was built from (fused when fusion succeeded).
    pub table: DepthTable,
    pub fusion: FusionOutcome,
    /// The standardized, possibly fused log ready to write.
    pub log: WellLog,
}

/// Serializable summary of a [`ProcessedLog`].
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingSummary {
    pub file_name: String,
    pub original_mnemonics: Vec<String>,
    pub output_mnemonics: Vec<String>,
    pub renames: Vec<Rename>,
    pub collisions: Vec<Collision>,
    pub fusion: FusionOutcome,
}

impl ProcessedLog {
    pub fn summary(&self) -> ProcessingSummary {
        ProcessingSummary {
            file_name: self.log.source.clone(),
            original_mnemonics: self.original_mnemonics.clone(),
            output_mnemonics: self.log.mnemonics(),
            renames: self.renames.clone(),
            collisions: self.collisions.clone(),
            fusion: self.fusion.clone(),
        }
    }
}

/// A snapshot of the inputs shared by every log in one run.
///
/// Stages never mutate their inputs: each call clones the log it works on,
/// so running the pipeline repeatedly over the same logs gives the same
/// result.
#[derive(Debug, Clone)]
pub struct Pipeline<'a> {
    standardizer: Standardizer,
    dataset: Option<&'a ExternalDataset>,
    collision: CollisionPolicy,
    writer: LasWriter,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline with default collision handling and write options.
    pub fn new(names: StandardNames) -> Self {
        Self {
            standardizer: Standardizer::new(names),
            dataset: None,
            collision: CollisionPolicy::default(),
            writer: LasWriter::new(),
        }
    }

    /// Fuse every log with `dataset`.
    pub fn with_dataset(mut self, dataset: Option<&'a ExternalDataset>) -> Self {
        self.dataset = dataset;
        self
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision = policy;
        self
    }

    pub fn with_writer(mut self, writer: LasWriter) -> Self {
        self.writer = writer;
        self
    }

    pub fn standardizer(&self) -> &Standardizer {
        &self.standardizer
    }

    /// Run every stage on a copy of `log`. Standardization always happens
    /// before fusion.
    pub fn process(&self, log: &WellLog) -> Result<ProcessedLog> {
        let standardized = self.standardizer.apply(log);
        let table = DepthTable::from_log(&standardized.log, self.collision)?;
        let collisions = table.collisions.clone();

        let (table, fusion) = match self.dataset {
            Some(dataset) => {
                let result = DepthFusion::new(dataset).fuse(&table, &log.source);
                (result.table, result.outcome)
            }
            None => (table, FusionOutcome::NotRequested),
        };

        let output = rebuild_log(&table, &standardized.log);

        Ok(ProcessedLog {
            original_mnemonics: log.mnemonics(),
            renames: standardized.renames,
            collisions,
            table,
            fusion,
            log: output,
        })
    }

    /// Process `log` and serialize the result.
    pub fn render(&self, log: &WellLog) -> Result<(ProcessedLog, Vec<u8>)> {
        let processed = self.process(log)?;
        let bytes = self.writer.to_bytes(&processed.log)?;
        Ok((processed, bytes))
    }
}
