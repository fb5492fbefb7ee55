//! Curve mnemonic standardization.

mod names;
mod standardizer;

pub use names::{DEFAULT_STANDARD_NAMES, StandardNames};
pub use standardizer::{Rename, StandardizedLog, Standardizer};
