//! lasnorm: curve mnemonic standardization and depth fusion for LAS well logs.
//!
//! lasnorm reads LAS 1.2/2.0 files, renames curve mnemonics against an
//! ordered list of standard names, optionally joins an external depth-keyed
//! dataset onto each log, and writes the results back out as LAS files or
//! as one deflated `.zip` archive.
//!
//! # Core Principles
//!
//! - **First match wins**: a curve takes the first standard name its
//!   mnemonic contains, in list order
//! - **Non-destructive**: loaded logs are never modified; every run works on
//!   copies
//! - **Row-preserving fusion**: joining a dataset never adds or drops depth
//!   rows
//!
//! # Example
//!
//! ```no_run
//! use lasnorm::{Session, StandardNames};
//!
//! let mut session = Session::new();
//! session.set_names(StandardNames::parse_list("GR, NPHI, RHOB"));
//! session.load_log("well.las").unwrap();
//! session.load_dataset("core.csv").unwrap();
//!
//! let output = session.export_archive().unwrap();
//! std::fs::write("standardized.zip", &output.archive).unwrap();
//! println!("Exported: {}", output.report.exported());
//! ```

pub mod error;
pub mod export;
pub mod fusion;
pub mod input;
pub mod las;
pub mod pipeline;
pub mod preview;
pub mod standardize;

mod session;

pub use crate::session::{GUIDANCE, Session, SessionConfig};
pub use error::{LasNormError, Result};
pub use export::{BatchExporter, BatchReport, DEFAULT_ARCHIVE_NAME};
pub use fusion::{CollisionPolicy, DepthFusion, ExternalDataset, FusionOutcome};
pub use las::{Curve, LasReader, LasWriter, WellLog, WriteOptions};
pub use pipeline::{Pipeline, ProcessedLog};
pub use standardize::{StandardNames, Standardizer};
