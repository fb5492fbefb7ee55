//! Depth-keyed left join of an [`ExternalDataset`] onto a [`DepthTable`].

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::dataset::ExternalDataset;
use super::table::{Column, DepthTable};

/// A join that could not be performed.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FusionError {
    /// A dataset column has the same name as a column of the log.
    #[error("dataset column '{column}' clashes with an existing curve")]
    ColumnClash { column: String },

    /// The dataset itself has two value columns with the same name.
    #[error("dataset has more than one column named '{column}'")]
    DuplicateColumn { column: String },
}

/// What happened when fusing one log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FusionOutcome {
    /// No dataset was loaded.
    NotRequested,
    /// The dataset columns were joined on.
    Fused {
        /// Dataset column used as the join key.
        depth_column: String,
        /// Log rows that found a dataset row.
        matched_rows: usize,
        added_columns: Vec<String>,
        /// Dataset rows ignored because an earlier row had the same depth.
        duplicate_depths: usize,
    },
    /// Fusion was not attempted; the log passes through unchanged.
    Skipped { reason: String },
    /// The join failed; the log passes through unchanged.
    Failed { error: FusionError },
}

impl FusionOutcome {
    pub fn is_fused(&self) -> bool {
        matches!(self, FusionOutcome::Fused { .. })
    }

    /// A user-facing warning for skipped or failed fusion.
    pub fn warning(&self) -> Option<String> {
        match self {
            FusionOutcome::Skipped { reason } => Some(format!("Fusion skipped: {}", reason)),
            FusionOutcome::Failed { error } => Some(format!("Fusion failed: {}", error)),
            _ => None,
        }
    }
}

/// A table together with how it was produced.
#[derive(Debug, Clone)]
pub struct FusionResult {
    pub table: DepthTable,
    pub outcome: FusionOutcome,
}

/// Left-joins a shared dataset onto log tables by exact depth equality.
///
/// Every row of the log table is kept exactly once and in order. Dataset
/// rows with no matching depth are dropped. The dataset's depth column is
/// never copied into the result.
#[derive(Debug, Clone, Copy)]
pub struct DepthFusion<'a> {
    dataset: &'a ExternalDataset,
}

impl<'a> DepthFusion<'a> {
    pub fn new(dataset: &'a ExternalDataset) -> Self {
        Self { dataset }
    }

    /// Join the dataset onto `table`. Never fails: problems are reported in
    /// the outcome and the unfused table is returned.
    pub fn fuse(&self, table: &DepthTable, source: &str) -> FusionResult {
        match self.try_fuse(table) {
            Ok(result) => {
                if let Some(warning) = result.outcome.warning() {
                    warn!(source, dataset = %self.dataset.name, "{}", warning);
                }
                result
            }
            Err(error) => {
                warn!(source, dataset = %self.dataset.name, %error, "fusion failed");
                FusionResult {
                    table: table.clone(),
                    outcome: FusionOutcome::Failed { error },
                }
            }
        }
    }

    fn try_fuse(&self, table: &DepthTable) -> Result<FusionResult, FusionError> {
        let dataset = self.dataset;
        let depth_columns = dataset.depth_columns();

        let Some(&depth_idx) = depth_columns.first() else {
            return Ok(FusionResult {
                table: table.clone(),
                outcome: FusionOutcome::Skipped {
                    reason: format!("'{}' has no DEPT or DEPTH column", dataset.name),
                },
            });
        };
        if depth_columns.len() > 1 {
            warn!(
                dataset = %dataset.name,
                using = %dataset.headers[depth_idx],
                "dataset has several depth columns, using the first"
            );
        }

        let value_columns: Vec<(usize, &str)> = dataset
            .headers
            .iter()
            .enumerate()
            .filter(|&(idx, _)| idx != depth_idx)
            .map(|(idx, name)| (idx, name.as_str()))
            .collect();

        let mut seen = HashSet::new();
        for &(_, name) in &value_columns {
            if !seen.insert(name) {
                return Err(FusionError::DuplicateColumn {
                    column: name.to_string(),
                });
            }
            if table.has_column(name) {
                return Err(FusionError::ColumnClash {
                    column: name.to_string(),
                });
            }
        }

        // First dataset row per depth
        let mut index: HashMap<u64, usize> = HashMap::new();
        let mut duplicate_depths = 0;
        for (row_idx, _) in dataset.rows.iter().enumerate() {
            let Some(depth) = dataset.value(row_idx, depth_idx) else {
                continue;
            };
            match index.entry(depth_key(depth)) {
                Entry::Vacant(slot) => {
                    slot.insert(row_idx);
                }
                Entry::Occupied(_) => duplicate_depths += 1,
            }
        }
        if duplicate_depths > 0 {
            warn!(
                dataset = %dataset.name,
                duplicate_depths,
                "dataset repeats depths, keeping the first row of each"
            );
        }

        let matches: Vec<Option<usize>> = table
            .depth_values()
            .iter()
            .map(|depth| depth.and_then(|d| index.get(&depth_key(d)).copied()))
            .collect();
        let matched_rows = matches.iter().filter(|m| m.is_some()).count();

        let mut fused = table.clone();
        let mut added_columns = Vec::with_capacity(value_columns.len());
        for (col_idx, name) in value_columns {
            let values = matches
                .iter()
                .map(|m| m.and_then(|row| dataset.value(row, col_idx)))
                .collect();
            fused.columns.insert(
                name.to_string(),
                Column {
                    unit: String::new(),
                    value: String::new(),
                    description: format!("Merged from {}", dataset.name),
                    values,
                },
            );
            added_columns.push(name.to_string());
        }

        debug!(
            dataset = %dataset.name,
            rows = fused.row_count(),
            matched_rows,
            columns = added_columns.len(),
            "fused dataset"
        );

        Ok(FusionResult {
            table: fused,
            outcome: FusionOutcome::Fused {
                depth_column: dataset.headers[depth_idx].clone(),
                matched_rows,
                added_columns,
                duplicate_depths,
            },
        })
    }
}

/// Exact-equality join key; `-0.0` and `0.0` are the same depth.
fn depth_key(depth: f64) -> u64 {
    if depth == 0.0 {
        0.0f64.to_bits()
    } else {
        depth.to_bits()
    }
}
