//! CLI command implementations.

pub mod curves;
pub mod export;
pub mod preview;
pub mod standardize;

use std::path::PathBuf;

use colored::Colorize;
use tracing::debug;
use lasnorm::{GUIDANCE, Session, SessionConfig, StandardNames, WriteOptions};

use crate::cli::SessionArgs;

/// Build a session from the shared options and load `files` into it.
///
/// A file that fails to parse is reported and skipped; the other files are
/// still loaded. A dataset that fails to load is an error.
pub fn load_session(
    args: &SessionArgs,
    files: &[PathBuf],
) -> Result<Session, Box<dyn std::error::Error>> {
    let config = SessionConfig {
        collision: args.collision,
        write: WriteOptions {
            precision: args.precision,
        },
        ..Default::default()
    };
    let mut session = Session::with_config(config);

    let names = match &args.names_file {
        Some(path) => StandardNames::load(path)?,
        None => StandardNames::parse_list(&args.names),
    };
    session.set_names(names);

    if let Some(path) = &args.dataset {
        let dataset = session.load_dataset(path)?;
        eprintln!(
            "{} {} ({} rows, {} columns)",
            "Dataset".cyan().bold(),
            dataset.name.white(),
            dataset.row_count(),
            dataset.headers.len()
        );
        if !dataset.text_columns.is_empty() {
            eprintln!(
                "{} text columns not merged: {}",
                "Warning:".yellow().bold(),
                dataset.text_columns.join(", ")
            );
        }
    }

    for file in files {
        if let Err(e) = session.load_log(file) {
            eprintln!(
                "{} skipping {}: {}",
                "Warning:".yellow().bold(),
                file.display(),
                e
            );
        }
    }

    debug!(
        logs = session.log_names().len(),
        names = session.names().len(),
        dataset = session.dataset().is_some(),
        "session loaded"
    );

    Ok(session)
}

/// Print the guidance message when there is nothing to do.
pub fn ensure_ready(session: &Session) -> bool {
    if session.is_ready() {
        return true;
    }
    println!("{}", GUIDANCE.yellow());
    false
}
