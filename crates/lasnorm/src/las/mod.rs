//! LAS well-log model, reader and writer.

mod model;
mod reader;
mod writer;

pub use model::{Curve, DEPTH_MNEMONIC, HeaderItem, Section, WellLog};
pub use reader::LasReader;
pub use writer::{LasWriter, WRITE_VERSION, WriteOptions};
