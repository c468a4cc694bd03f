//! Matches command for listing stored matches.

use std::io::Write;

use anyhow::{Context, Result, bail};
use serde::Serialize;

use fc_db::{Database, MatchRecord};

use super::util::format_time;
use crate::Config;

#[derive(Debug, Serialize)]
struct MatchOutput {
    match_id: String,
    start_time: String,
    end_time: String,
    game_mode: String,
    map_name: String,
    frag_count: usize,
}

impl From<MatchRecord> for MatchOutput {
    fn from(record: MatchRecord) -> Self {
        Self {
            start_time: format_time(record.start_time),
            end_time: format_time(record.end_time),
            match_id: record.match_id,
            game_mode: record.game_mode,
            map_name: record.map_name,
            frag_count: record.frag_count,
        }
    }
}

fn open_database(config: &Config) -> Result<Database> {
    Database::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))
}

pub fn run<W: Write>(writer: &mut W, json: bool, config: &Config) -> Result<()> {
    let db = open_database(config)?;
    let matches: Vec<MatchOutput> = db.list_matches()?.into_iter().map(Into::into).collect();

    if json {
        serde_json::to_writer_pretty(&mut *writer, &matches)?;
        writeln!(writer)?;
        return Ok(());
    }

    writeln!(writer, "Database: {}", config.database_path.display())?;
    if matches.is_empty() {
        writeln!(writer, "No matches recorded.")?;
        return Ok(());
    }
    for m in &matches {
        writeln!(
            writer,
            "- {} {} on {}: {} .. {} ({} frags)",
            m.match_id, m.game_mode, m.map_name, m.start_time, m.end_time, m.frag_count
        )?;
    }
    Ok(())
}

/// Deletes a stored match together with its frags.
pub fn delete<W: Write>(writer: &mut W, match_id: &str, config: &Config) -> Result<()> {
    let mut db = open_database(config)?;
    if !db.delete_match(match_id).context("failed to delete match")? {
        bail!("no match with ID {match_id}");
    }
    tracing::info!(match_id, "deleted match");
    writeln!(writer, "Deleted match {match_id}")?;
    Ok(())
}
