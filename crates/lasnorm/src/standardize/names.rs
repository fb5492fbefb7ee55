//! The ordered set of canonical curve names.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LasNormError, Result};

/// Names used when the user supplies none.
pub const DEFAULT_STANDARD_NAMES: &[&str] = &["GR", "NPHI", "RHOB", "DT", "CALI"];

/// Ordered list of canonical mnemonics.
///
/// Entries are trimmed and uppercased; blank entries are dropped. Order is
/// significant: earlier names win when several match a curve. Duplicates are
/// kept and are harmless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StandardNames {
    names: Vec<String>,
}

impl StandardNames {
    /// Build from raw user entries.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = entries
            .into_iter()
            .map(|entry| entry.as_ref().trim().to_uppercase())
            .filter(|entry| !entry.is_empty())
            .collect();
        Self { names }
    }

    /// Parse a comma-separated list, e.g. `"GR, NPHI,RHOB"`.
    pub fn parse_list(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// Load names from a file.
    ///
    /// `.json` files hold an array of strings. Anything else is read one name
    /// per line; lines starting with `#` are comments.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| LasNormError::io(path, e))?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            let entries: Vec<String> = serde_json::from_str(&text)?;
            return Ok(Self::new(entries));
        }

        Ok(Self::new(
            text.lines().filter(|line| !line.trim_start().starts_with('#')),
        ))
    }

    /// The first name (in list order) contained in the uppercased mnemonic.
    pub fn first_match(&self, mnemonic: &str) -> Option<&str> {
        let upper = mnemonic.to_uppercase();
        self.names
            .iter()
            .find(|name| upper.contains(name.as_str()))
            .map(|name| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|s| s.as_str())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }
}

impl Default for StandardNames {
    fn default() -> Self {
        Self::new(DEFAULT_STANDARD_NAMES)
    }
}
