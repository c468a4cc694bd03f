//! Session command: game mode, map and boundaries of one match.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use fc_core::SessionMeta;

use super::util::{analyze_file, format_time};
use crate::Config;

#[derive(Debug, Serialize)]
struct SessionOutput<'a> {
    #[serde(flatten)]
    session: &'a SessionMeta,
    frag_count: usize,
}

pub fn run<W: Write>(writer: &mut W, log: &Path, json: bool, config: &Config) -> Result<()> {
    let report = analyze_file(log, config.end_time_policy)?;
    let output = SessionOutput {
        session: &report.session,
        frag_count: report.frags.len(),
    };

    if json {
        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)?;
        return Ok(());
    }

    writeln!(writer, "Mode:  {}", output.session.mode)?;
    writeln!(writer, "Map:   {}", output.session.map)?;
    writeln!(writer, "Start: {}", format_time(output.session.start_time))?;
    writeln!(writer, "End:   {}", format_time(output.session.end_time))?;
    writeln!(writer, "Frags: {}", output.frag_count)?;
    Ok(())
}
