//! In-memory model of a LAS well log.

use serde::{Deserialize, Serialize};

/// Canonical mnemonic of the depth axis.
pub const DEPTH_MNEMONIC: &str = "DEPT";

/// One `MNEM.UNIT VALUE : DESCRIPTION` header line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeaderItem {
    pub mnemonic: String,
    pub unit: String,
    pub value: String,
    pub description: String,
}

impl HeaderItem {
    /// Create a header item.
    pub fn new(
        mnemonic: impl Into<String>,
        unit: impl Into<String>,
        value: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            unit: unit.into(),
            value: value.into(),
            description: description.into(),
        }
    }
}

/// A header section made of items (`~V`, `~W`, `~P` or a custom section).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Section {
    /// Title text following the `~`, as read.
    pub title: String,
    pub items: Vec<HeaderItem>,
}

impl Section {
    /// Create an empty section with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    /// Find an item by mnemonic (case-insensitive).
    pub fn get(&self, mnemonic: &str) -> Option<&HeaderItem> {
        self.items
            .iter()
            .find(|item| item.mnemonic.eq_ignore_ascii_case(mnemonic))
    }

    /// Value of an item, trimmed.
    pub fn value_of(&self, mnemonic: &str) -> Option<&str> {
        self.get(mnemonic).map(|item| item.value.trim())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A named, depth-indexed series of samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub mnemonic: String,
    pub unit: String,
    /// API code column of the curve header line; usually empty.
    pub value: String,
    pub description: String,
    /// Samples parallel to the depth axis. `None` is a missing sample.
    pub data: Vec<Option<f64>>,
}

impl Curve {
    /// Create a curve with no unit or description.
    pub fn new(mnemonic: impl Into<String>, data: Vec<Option<f64>>) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            unit: String::new(),
            value: String::new(),
            description: String::new(),
            data,
        }
    }

    /// Build a curve from its header line.
    pub fn from_header(header: HeaderItem) -> Self {
        Self {
            mnemonic: header.mnemonic,
            unit: header.unit,
            value: header.value,
            description: header.description,
            data: Vec::new(),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The `~C` header line describing this curve.
    pub fn header(&self) -> HeaderItem {
        HeaderItem::new(&self.mnemonic, &self.unit, &self.value, &self.description)
    }
}

/// A parsed LAS file.
///
/// The first curve is the depth axis; every curve has one sample per depth
/// step. Mnemonics are not required to be unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellLog {
    /// Source identifier, normally the file name.
    pub source: String,
    /// `~V` section as read.
    pub version: Section,
    /// `~W` section.
    pub well: Section,
    pub curves: Vec<Curve>,
    /// `~P` section.
    pub params: Section,
    /// `~O` free text, line by line.
    pub other: Vec<String>,
    /// Sections with unrecognised titles, in order of appearance.
    pub extra: Vec<Section>,
}

impl WellLog {
    /// Create an empty log.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            version: Section::new("Version Information"),
            well: Section::new("Well Information"),
            curves: Vec::new(),
            params: Section::new("Parameter Information"),
            other: Vec::new(),
            extra: Vec::new(),
        }
    }

    /// The depth axis curve.
    pub fn depth(&self) -> Option<&Curve> {
        self.curves.first()
    }

    /// Number of depth steps.
    pub fn row_count(&self) -> usize {
        self.depth().map(|c| c.data.len()).unwrap_or(0)
    }

    /// Curve mnemonics in file order.
    pub fn mnemonics(&self) -> Vec<String> {
        self.curves.iter().map(|c| c.mnemonic.clone()).collect()
    }

    /// First curve with the given mnemonic (exact match).
    pub fn curve(&self, mnemonic: &str) -> Option<&Curve> {
        self.curves.iter().find(|c| c.mnemonic == mnemonic)
    }

    /// The `NULL` value declared in `~W`, if it parses as a number.
    pub fn null_value(&self) -> Option<f64> {
        self.well.value_of("NULL").and_then(|v| v.parse::<f64>().ok())
    }

    /// The `VERS` value declared in `~V`.
    pub fn version_number(&self) -> Option<&str> {
        self.version.value_of("VERS")
    }

    /// Whether the data section was written in wrapped mode.
    pub fn is_wrapped(&self) -> bool {
        self.version
            .value_of("WRAP")
            .map(|v| v.eq_ignore_ascii_case("YES"))
            .unwrap_or(false)
    }
}
