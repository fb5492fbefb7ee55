//! Preview command - print depth series of a standardized log.

use std::path::PathBuf;

use colored::Colorize;

use crate::cli::SessionArgs;

pub fn run(
    file: PathBuf,
    curves: Vec<String>,
    rows: Option<usize>,
    args: &SessionArgs,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = super::load_session(args, std::slice::from_ref(&file))?;
    if !super::ensure_ready(&session) {
        return Ok(());
    }
    let Some(name) = session.log_names().first().map(|n| n.to_string()) else {
        return Ok(());
    };

    let requested: Vec<String> = curves.iter().map(|c| c.trim().to_string()).collect();
    let series = session.plot_series(&name, &requested)?;

    if verbose {
        for missing in requested
            .iter()
            .filter(|r| !series.iter().any(|s| &s.mnemonic == *r))
        {
            eprintln!(
                "{} no curve named {} in {}",
                "Warning:".yellow().bold(),
                missing,
                name
            );
        }
    }

    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record(["curve", "unit", "depth", "value"])?;
    for s in &series {
        let limit = rows.unwrap_or(s.points.len());
        for (depth, value) in s.points.iter().take(limit) {
            writer.write_record(&[
                s.mnemonic.clone(),
                s.unit.clone(),
                depth.to_string(),
                value.to_string(),
            ])?;
        }
    }
    writer.flush()?;

    Ok(())
}
