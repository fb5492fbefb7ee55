//! Renames curve mnemonics against a [`StandardNames`] list.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::names::StandardNames;
use crate::las::WellLog;

/// A single mnemonic change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rename {
    /// Curve position in the log.
    pub index: usize,
    pub from: String,
    pub to: String,
}

/// Output of [`Standardizer::apply`].
#[derive(Debug, Clone)]
pub struct StandardizedLog {
    /// The renamed copy of the input log.
    pub log: WellLog,
    /// Curves whose mnemonic changed.
    pub renames: Vec<Rename>,
    /// Mnemonics that occur more than once after renaming.
    pub collisions: Vec<String>,
}

/// Substring-based mnemonic standardizer.
///
/// Each curve's uppercased mnemonic is checked against the names in order;
/// the first name it contains replaces it. Curves matching nothing keep
/// their mnemonic as read. The depth curve (first curve) is never renamed.
#[derive(Debug, Clone)]
pub struct Standardizer {
    names: StandardNames,
}

impl Standardizer {
    /// Create a standardizer for a name list.
    pub fn new(names: StandardNames) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &StandardNames {
        &self.names
    }

    /// The standardized form of a single mnemonic.
    pub fn standardize_mnemonic<'a>(&'a self, mnemonic: &'a str) -> &'a str {
        self.names.first_match(mnemonic).unwrap_or(mnemonic)
    }

    /// Standardize a copy of `log`. Sample data is untouched.
    pub fn apply(&self, log: &WellLog) -> StandardizedLog {
        let mut out = log.clone();
        let mut renames = Vec::new();

        for (index, curve) in out.curves.iter_mut().enumerate().skip(1) {
            let Some(standard) = self.names.first_match(&curve.mnemonic) else {
                continue;
            };
            if curve.mnemonic == standard {
                continue;
            }

            debug!(
                source = %log.source,
                from = %curve.mnemonic,
                to = %standard,
                "renamed curve"
            );
            renames.push(Rename {
                index,
                from: curve.mnemonic.clone(),
                to: standard.to_string(),
            });
            curve.mnemonic = standard.to_string();
        }

        let collisions = duplicate_mnemonics(&out);
        if !collisions.is_empty() {
            warn!(
                source = %log.source,
                mnemonics = ?collisions,
                "duplicate mnemonics after standardization"
            );
        }

        StandardizedLog {
            log: out,
            renames,
            collisions,
        }
    }
}

/// Mnemonics appearing on more than one curve, in order of first appearance.
fn duplicate_mnemonics(log: &WellLog) -> Vec<String> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for curve in &log.curves {
        *counts.entry(curve.mnemonic.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|&(_, count)| count > 1)
        .map(|(name, _)| name.to_string())
        .collect()
}
