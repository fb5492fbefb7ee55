//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use lasnorm::CollisionPolicy;
use std::path::PathBuf;

/// lasnorm: standardize LAS curve mnemonics and merge depth-keyed data
#[derive(Parser)]
#[command(name = "lasnorm")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub session: SessionArgs,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Options shared by every command.
#[derive(Args, Clone, Debug)]
pub struct SessionArgs {
    /// Standard curve names, comma separated, in priority order
    #[arg(long, global = true, default_value = "GR,NPHI,RHOB,DT,CALI")]
    pub names: String,

    /// File with standard names (one per line, or a JSON array); overrides --names
    #[arg(long, global = true, value_name = "FILE")]
    pub names_file: Option<PathBuf>,

    /// Delimited or spreadsheet dataset with a DEPT or DEPTH column to merge into every log
    #[arg(short, long, global = true, value_name = "FILE")]
    pub dataset: Option<PathBuf>,

    /// How to resolve curves that end up with the same mnemonic
    #[arg(long, global = true, default_value = "keep-last")]
    pub collision: CollisionPolicy,

    /// Decimal places for written sample values
    #[arg(long, global = true, default_value = "5")]
    pub precision: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show curve mnemonics before and after standardization
    Curves {
        /// LAS files
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print depth series of a standardized log as CSV
    Preview {
        /// LAS file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Curves to print, comma separated (default: first three)
        #[arg(short, long, value_delimiter = ',')]
        curves: Vec<String>,

        /// Maximum points per curve
        #[arg(short, long)]
        rows: Option<usize>,
    },

    /// Write standardized LAS files into a directory
    Standardize {
        /// LAS files
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "standardized")]
        out_dir: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export all standardized logs into one .zip archive
    Export {
        /// LAS files
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Archive path
        #[arg(short, long, default_value = lasnorm::DEFAULT_ARCHIVE_NAME)]
        output: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
