//! Structural errors raised while analyzing a server log.

use thiserror::Error;

/// Fatal input errors. Any of these aborts the analysis pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LogError {
    /// The first line is not a `Log Started at ...` header.
    #[error("malformed log header: {line:?}")]
    MalformedHeader { line: String },

    /// No `(g_timezone,<offset>)` directive anywhere in the log.
    #[error("no timezone directive found in log")]
    MissingTimezoneDirective,

    /// The timezone directive carries an offset no real timezone has.
    #[error("timezone offset out of range: {0} hours")]
    InvalidTimezoneOffset(i32),

    /// No `Loading level ..., mission ...` line.
    #[error("no level-load line with game mode and map found in log")]
    MissingSessionInfo,

    /// No `Precaching level` line to anchor the session start.
    #[error("no precaching line found to mark the session start")]
    MissingSessionStart,

    /// The log ends before any timestamped line follows the last frag.
    #[error("no timestamped line after line {after_line} to mark the session end")]
    NoTrailingTimestamp { after_line: usize },
}
