//! Curves command - show mnemonics before and after standardization.

use std::path::PathBuf;

use colored::Colorize;

use crate::cli::SessionArgs;

pub fn run(
    files: Vec<PathBuf>,
    json_output: bool,
    args: &SessionArgs,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = super::load_session(args, &files)?;
    if !super::ensure_ready(&session) {
        return Ok(());
    }

    let comparisons = session
        .log_names()
        .into_iter()
        .map(|name| session.curve_comparison(name))
        .collect::<Result<Vec<_>, _>>()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&comparisons)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Standard names:".cyan().bold(),
        session.names().as_slice().join(", ").white()
    );

    for cmp in &comparisons {
        println!();
        println!("{}", cmp.file_name.white().bold());
        println!("  {:20} {:20}", "Before".dimmed(), "After".dimmed());
        for (before, after) in cmp.before.iter().zip(&cmp.after) {
            if before == after {
                if verbose {
                    println!("  {:20} {:20}", before, after);
                }
            } else {
                println!("  {:20} {:20}", before, after.green());
            }
        }

        let changed = cmp.changed().count();
        println!(
            "  {} of {} curves renamed",
            changed.to_string().white().bold(),
            cmp.before.len()
        );
    }

    Ok(())
}
