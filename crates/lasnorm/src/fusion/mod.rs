//! Tabular views of logs and depth-keyed fusion with external datasets.

mod dataset;
mod join;
mod table;

pub use dataset::{DEPTH_COLUMN_NAMES, ExternalDataset};
pub use join::{DepthFusion, FusionError, FusionOutcome, FusionResult};
pub use table::{Collision, CollisionPolicy, CollisionResolution, Column, DepthTable};
