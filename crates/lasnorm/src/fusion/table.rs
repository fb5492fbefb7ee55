//! Depth-indexed tabular view of a log.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{LasNormError, Result};
use crate::las::{Curve, WellLog};

/// What to do when two curves share a mnemonic in the tabular view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The later curve's data replaces the earlier one; the column keeps
    /// its first position.
    #[default]
    KeepLast,
    /// Later duplicates are dropped.
    KeepFirst,
    /// Later duplicates become `NAME:1`, `NAME:2`, ...
    Suffix,
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "keep_last" | "last" => Ok(CollisionPolicy::KeepLast),
            "keep_first" | "first" => Ok(CollisionPolicy::KeepFirst),
            "suffix" => Ok(CollisionPolicy::Suffix),
            _ => Err(format!(
                "Unknown collision policy: {}. Use keep-last, keep-first, or suffix.",
                s
            )),
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionPolicy::KeepLast => write!(f, "keep-last"),
            CollisionPolicy::KeepFirst => write!(f, "keep-first"),
            CollisionPolicy::Suffix => write!(f, "suffix"),
        }
    }
}

/// How a colliding curve was handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "name", rename_all = "snake_case")]
pub enum CollisionResolution {
    /// Its data replaced the earlier column of the same name.
    Replaced,
    /// It was left out of the table.
    Dropped,
    /// It was added under a new name.
    Renamed(String),
}

/// A curve whose mnemonic was already taken in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    /// Curve position in the log.
    pub index: usize,
    pub mnemonic: String,
    pub resolution: CollisionResolution,
}

/// One column of a [`DepthTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub unit: String,
    pub value: String,
    pub description: String,
    pub values: Vec<Option<f64>>,
}

impl Column {
    fn from_curve(curve: &Curve) -> Self {
        Self {
            unit: curve.unit.clone(),
            value: curve.value.clone(),
            description: curve.description.clone(),
            values: curve.data.clone(),
        }
    }
}

/// A log's curves as named columns aligned on its depth axis.
///
/// Column names are unique; how duplicate mnemonics were resolved is listed
/// in `collisions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthTable {
    /// Mnemonic of the depth curve as read.
    pub depth_name: String,
    pub depth: Column,
    pub columns: IndexMap<String, Column>,
    pub collisions: Vec<Collision>,
}

impl DepthTable {
    /// Build the tabular view of a log.
    pub fn from_log(log: &WellLog, policy: CollisionPolicy) -> Result<Self> {
        let depth_curve = log.depth().ok_or_else(|| {
            LasNormError::EmptyData(format!("'{}' has no depth curve", log.source))
        })?;
        let depth_name = depth_curve.mnemonic.clone();

        let mut columns: IndexMap<String, Column> = IndexMap::new();
        let mut collisions = Vec::new();

        for (index, curve) in log.curves.iter().enumerate().skip(1) {
            let name = &curve.mnemonic;
            let clashes_depth = *name == depth_name;

            if !clashes_depth && !columns.contains_key(name) {
                columns.insert(name.clone(), Column::from_curve(curve));
                continue;
            }

            let resolution = match policy {
                CollisionPolicy::KeepLast if !clashes_depth => {
                    columns.insert(name.clone(), Column::from_curve(curve));
                    CollisionResolution::Replaced
                }
                CollisionPolicy::KeepLast | CollisionPolicy::KeepFirst => {
                    CollisionResolution::Dropped
                }
                CollisionPolicy::Suffix => {
                    let renamed = (1..)
                        .map(|n| format!("{}:{}", name, n))
                        .find(|candidate| *candidate != depth_name && !columns.contains_key(candidate))
                        .unwrap_or_else(|| name.clone());
                    columns.insert(renamed.clone(), Column::from_curve(curve));
                    CollisionResolution::Renamed(renamed)
                }
            };

            warn!(
                source = %log.source,
                mnemonic = %name,
                index,
                resolution = ?resolution,
                "mnemonic collision"
            );
            collisions.push(Collision {
                index,
                mnemonic: name.clone(),
                resolution,
            });
        }

        Ok(Self {
            depth_name,
            depth: Column::from_curve(depth_curve),
            columns,
            collisions,
        })
    }

    /// Number of depth rows.
    pub fn row_count(&self) -> usize {
        self.depth.values.len()
    }

    /// Depth values, one per row.
    pub fn depth_values(&self) -> &[Option<f64>] {
        &self.depth.values
    }

    /// Column names with the depth column first.
    pub fn column_names(&self) -> Vec<String> {
        std::iter::once(self.depth_name.clone())
            .chain(self.columns.keys().cloned())
            .collect()
    }

    /// A non-depth column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Whether a name is already used by the depth or a data column.
    pub fn has_column(&self, name: &str) -> bool {
        name == self.depth_name || self.columns.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_with(curves: &[(&str, f64)]) -> WellLog {
        let mut log = WellLog::new("t.las");
        log.curves.push(Curve::new("DEPT", vec![Some(100.0), Some(101.0)]));
        for (name, v) in curves {
            log.curves.push(Curve::new(*name, vec![Some(*v), Some(*v)]));
        }
        log
    }

    #[test]
    fn test_from_log_keeps_order() {
        let table = DepthTable::from_log(&log_with(&[("GR", 1.0), ("NPHI", 2.0)]), CollisionPolicy::KeepLast).unwrap();
        assert_eq!(table.column_names(), vec!["DEPT", "GR", "NPHI"]);
        assert_eq!(table.row_count(), 2);
        assert!(table.collisions.is_empty());
    }

    #[test]
    fn test_keep_last_replaces_data_in_first_position() {
        let log = log_with(&[("GR", 1.0), ("RHOB", 2.0), ("GR", 3.0)]);
        let table = DepthTable::from_log(&log, CollisionPolicy::KeepLast).unwrap();

        assert_eq!(table.column_names(), vec!["DEPT", "GR", "RHOB"]);
        assert_eq!(table.column("GR").unwrap().values[0], Some(3.0));
        assert_eq!(table.collisions[0].resolution, CollisionResolution::Replaced);
        assert_eq!(table.collisions[0].index, 3);
    }

    #[test]
    fn test_keep_first_drops_duplicates() {
        let log = log_with(&[("GR", 1.0), ("GR", 3.0)]);
        let table = DepthTable::from_log(&log, CollisionPolicy::KeepFirst).unwrap();

        assert_eq!(table.column_names(), vec!["DEPT", "GR"]);
        assert_eq!(table.column("GR").unwrap().values[0], Some(1.0));
        assert_eq!(table.collisions[0].resolution, CollisionResolution::Dropped);
    }

    #[test]
    fn test_suffix_renames_duplicates() {
        let log = log_with(&[("GR", 1.0), ("GR", 2.0), ("GR", 3.0)]);
        let table = DepthTable::from_log(&log, CollisionPolicy::Suffix).unwrap();

        assert_eq!(table.column_names(), vec!["DEPT", "GR", "GR:1", "GR:2"]);
        assert_eq!(table.column("GR:2").unwrap().values[0], Some(3.0));
    }

    #[test]
    fn test_depth_always_wins() {
        let log = log_with(&[("DEPT", 9.0)]);

        let kept = DepthTable::from_log(&log, CollisionPolicy::KeepLast).unwrap();
        assert_eq!(kept.column_names(), vec!["DEPT"]);
        assert_eq!(kept.depth.values[0], Some(100.0));

        let suffixed = DepthTable::from_log(&log, CollisionPolicy::Suffix).unwrap();
        assert_eq!(suffixed.column_names(), vec!["DEPT", "DEPT:1"]);
    }

    #[test]
    fn test_empty_log_is_error() {
        assert!(DepthTable::from_log(&WellLog::new("empty.las"), CollisionPolicy::KeepLast).is_err());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("keep-first".parse::<CollisionPolicy>(), Ok(CollisionPolicy::KeepFirst));
        assert_eq!("SUFFIX".parse::<CollisionPolicy>(), Ok(CollisionPolicy::Suffix));
        assert!("merge".parse::<CollisionPolicy>().is_err());
        assert_eq!(CollisionPolicy::default().to_string(), "keep-last");
    }
}
