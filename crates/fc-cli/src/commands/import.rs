//! Import command for storing an analyzed match in the local `SQLite` store.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use fc_db::Database;

use super::util::analyze_file;
use crate::Config;

/// Analyzes `log` and persists the match. Returns the new match ID.
pub fn run<W: Write>(writer: &mut W, log: &Path, config: &Config) -> Result<String> {
    let report = analyze_file(log, config.end_time_policy)?;

    let mut db = Database::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))?;
    let match_id = db
        .insert_match(&report.session, &report.frags)
        .context("failed to store match")?;

    writeln!(
        writer,
        "Imported match {match_id} ({} on {}, {} frags)",
        report.session.mode,
        report.session.map,
        report.frags.len()
    )?;
    Ok(match_id)
}
