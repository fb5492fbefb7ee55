//! Input parsing and data source handling.

mod parser;
mod source;
mod spreadsheet;

pub use parser::{DatasetParser, ParserConfig};
pub(crate) use parser::hash_bytes;
pub use source::{DataTable, SourceMetadata};
pub use spreadsheet::{SPREADSHEET_EXTENSIONS, read_first_sheet};
