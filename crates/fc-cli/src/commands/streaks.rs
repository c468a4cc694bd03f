//! Streaks command: longest kill or death run of every player.

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use fc_core::{StreakEntry, StreakTable};

use super::util::analyze_file;
use crate::Config;

pub fn run<W: Write>(
    writer: &mut W,
    log: &Path,
    losing: bool,
    json: bool,
    config: &Config,
) -> Result<()> {
    let report = analyze_file(log, config.end_time_policy)?;
    let table = if losing {
        &report.serial_losers
    } else {
        &report.serial_killers
    };

    if json {
        serde_json::to_writer_pretty(&mut *writer, table)?;
        writeln!(writer)?;
        return Ok(());
    }

    let title = if losing { "Death streaks" } else { "Kill streaks" };
    write_table(writer, title, table)
}

fn write_table<W: Write>(writer: &mut W, title: &str, table: &StreakTable) -> Result<()> {
    writeln!(writer, "{title}:")?;
    if table.is_empty() {
        writeln!(writer, "No frags recorded.")?;
        return Ok(());
    }
    for (player, streak) in table {
        writeln!(writer, "- {player} ({})", streak.len())?;
        for entry in streak {
            writeln!(writer, "    {}", format_entry(entry))?;
        }
    }
    Ok(())
}

fn format_entry(entry: &StreakEntry) -> String {
    let time = entry.time.format("%H:%M:%S");
    match (&entry.opponent, &entry.weapon) {
        (Some(opponent), Some(weapon)) => format!("{time} {opponent} ({weapon})"),
        (Some(opponent), None) => format!("{time} {opponent}"),
        (None, _) => format!("{time} (self)"),
    }
}
