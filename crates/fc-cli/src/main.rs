use std::io::{Write, stdout};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fc_cli::commands::{frags, import, matches, session, streaks};
use fc_cli::{Cli, Commands, Config};

/// Ensures the database's parent directory exists before it is opened.
fn ensure_database_dir(config: &Config) -> Result<()> {
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so CSV and JSON on stdout stay clean
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let stdout = stdout();
    let mut out = stdout.lock();
    match command {
        Commands::Frags { log, csv, pretty } => {
            let output = match (csv, pretty) {
                (Some(path), _) => frags::Output::CsvFile(path),
                (None, true) => frags::Output::Pretty,
                (None, false) => frags::Output::Csv,
            };
            frags::run(&mut out, log, output, &config)?;
        }
        Commands::Session { log, json } => session::run(&mut out, log, *json, &config)?,
        Commands::Streaks { log, losing, json } => {
            streaks::run(&mut out, log, *losing, *json, &config)?;
        }
        Commands::Import { log } => {
            ensure_database_dir(&config)?;
            import::run(&mut out, log, &config)?;
        }
        Commands::Matches { json, delete } => {
            ensure_database_dir(&config)?;
            match delete {
                Some(match_id) => matches::delete(&mut out, match_id, &config)?,
                None => matches::run(&mut out, *json, &config)?,
            }
        }
    }
    out.flush()?;

    Ok(())
}
