//! lasnorm CLI - standardize LAS curve mnemonics and merge depth-keyed data.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins; --verbose raises the default level
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Curves { files, json } => {
            commands::curves::run(files, json, &cli.session, cli.verbose)
        }

        Commands::Preview { file, curves, rows } => {
            commands::preview::run(file, curves, rows, &cli.session, cli.verbose)
        }

        Commands::Standardize {
            files,
            out_dir,
            json,
        } => commands::standardize::run(files, out_dir, json, &cli.session, cli.verbose),

        Commands::Export {
            files,
            output,
            json,
        } => commands::export::run(files, output, json, &cli.session, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
