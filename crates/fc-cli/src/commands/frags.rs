//! Frags command: list reconstructed frags as CSV or emoji lines.
//!
//! CSV rows carry four columns for a kill (`time,killer,victim,weapon`) and
//! two for a suicide (`time,player`). There is no header row.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use fc_core::{ReconstructedFrag, prettify_frags};

use super::util::{analyze_file, format_time};
use crate::Config;

/// How to emit the frag list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output<'a> {
    /// CSV rows to the writer.
    Csv,
    /// CSV rows to a file.
    CsvFile(&'a Path),
    /// Emoji lines to the writer.
    Pretty,
}

pub fn run<W: Write>(writer: &mut W, log: &Path, output: Output<'_>, config: &Config) -> Result<()> {
    let report = analyze_file(log, config.end_time_policy)?;
    match output {
        Output::Csv => write_csv(writer, &report.frags)?,
        Output::CsvFile(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut file = BufWriter::new(file);
            write_csv(&mut file, &report.frags)?;
            file.flush()
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), frags = report.frags.len(), "wrote frag csv");
            writeln!(writer, "Wrote {} frags to {}", report.frags.len(), path.display())?;
        }
        Output::Pretty => {
            for line in prettify_frags(&report.frags) {
                writeln!(writer, "{line}")?;
            }
        }
    }
    Ok(())
}

/// Writes one CSV row per frag.
pub fn write_csv<W: Write>(writer: &mut W, frags: &[ReconstructedFrag]) -> Result<()> {
    for frag in frags {
        writeln!(writer, "{}", csv_row(frag))?;
    }
    Ok(())
}

fn csv_row(frag: &ReconstructedFrag) -> String {
    let time = format_time(frag.absolute_time);
    let mut fields = vec![time.as_str(), frag.killer()];
    if let (Some(victim), Some(weapon)) = (frag.victim(), frag.weapon()) {
        fields.push(victim);
        fields.push(weapon);
    }
    fields.into_iter().map(csv_field).collect::<Vec<_>>().join(",")
}

/// Quotes a field when it contains a separator, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
