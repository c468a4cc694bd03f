//! Shared helpers for commands that analyze a log file.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};

use fc_core::{EndTimePolicy, LogDocument, MatchReport, analyze};

/// Reads a log file into memory.
///
/// Invalid UTF-8 (Latin-1 player names) is replaced rather than rejected.
pub fn read_log(path: &Path) -> Result<LogDocument> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read log file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read log file");
    Ok(LogDocument::from_bytes(&bytes))
}

/// Reads and analyzes a log file.
pub fn analyze_file(path: &Path, policy: EndTimePolicy) -> Result<MatchReport> {
    let doc = read_log(path)?;
    analyze(&doc, policy).with_context(|| format!("failed to analyze {}", path.display()))
}

/// Formats a time for display, keeping the server offset.
pub fn format_time(time: DateTime<FixedOffset>) -> String {
    time.to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_log_reports_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let err = read_log(&temp.path().join("missing.txt")).unwrap_err();
        assert!(err.to_string().starts_with("failed to read log file:"));
    }

    #[test]
    fn analyze_file_names_the_violated_assumption() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("log.txt");
        std::fs::write(&path, "Log Started at Monday, March 04, 2019 20:00:00\n").unwrap();

        let err = analyze_file(&path, EndTimePolicy::Strict).unwrap_err();
        assert!(err.to_string().starts_with("failed to analyze"));
        assert_eq!(err.root_cause().to_string(), "no timezone directive found in log");
    }
}
