//! Export command - write every standardized log into one archive.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;

use crate::cli::SessionArgs;

pub fn run(
    files: Vec<PathBuf>,
    output: PathBuf,
    json_output: bool,
    args: &SessionArgs,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = super::load_session(args, &files)?;
    if !super::ensure_ready(&session) {
        return Ok(());
    }

    let batch = session.export_archive()?;
    fs::write(&output, &batch.archive)?;
    let report = &batch.report;

    if json_output {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for item in &report.items {
        match &item.error {
            None => println!(
                "  {} {} ({} bytes, {} renamed)",
                "+".green(),
                item.file_name,
                item.bytes_written,
                item.renames.len()
            ),
            Some(error) => println!("  {} {}: {}", "x".red(), item.file_name, error),
        }
        if let Some(warning) = item.fusion.warning() {
            println!("    {} {}", "Warning:".yellow().bold(), warning);
        } else if verbose && item.fusion.is_fused() {
            println!("    {:?}", item.fusion);
        }
    }

    println!();
    println!(
        "{} {} of {} logs written to {}",
        "Done:".green().bold(),
        report.exported().to_string().white().bold(),
        report.items.len(),
        output.display().to_string().white()
    );
    if report.fusion_warnings() > 0 {
        println!(
            "{} fusion skipped or failed for {} log(s)",
            "Warning:".yellow().bold(),
            report.fusion_warnings()
        );
    }

    Ok(())
}
