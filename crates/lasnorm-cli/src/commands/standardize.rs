//! Standardize command - write standardized LAS files into a directory.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;

use crate::cli::SessionArgs;

pub fn run(
    files: Vec<PathBuf>,
    out_dir: PathBuf,
    json_output: bool,
    args: &SessionArgs,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = super::load_session(args, &files)?;
    if !super::ensure_ready(&session) {
        return Ok(());
    }

    fs::create_dir_all(&out_dir)?;

    let mut summaries = Vec::new();
    let mut failed = 0;

    for name in session.log_names() {
        let (processed, bytes) = match session.export_log(name) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("{} {}: {}", "Error:".red().bold(), name, e);
                failed += 1;
                continue;
            }
        };

        let path = out_dir.join(name);
        fs::write(&path, &bytes)?;

        if !json_output {
            println!(
                "{} {} ({} renamed)",
                "Wrote".green().bold(),
                path.display().to_string().white(),
                processed.renames.len()
            );
            if verbose {
                for rename in &processed.renames {
                    println!("  {} -> {}", rename.from, rename.to.green());
                }
            }
            if let Some(warning) = processed.fusion.warning() {
                println!("  {} {}", "Warning:".yellow().bold(), warning);
            }
        }
        summaries.push(processed.summary());
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else if failed > 0 {
        println!();
        println!("{} {} file(s) could not be written", "Warning:".yellow().bold(), failed);
    }

    Ok(())
}
