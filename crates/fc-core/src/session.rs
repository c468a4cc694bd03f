//! Session start and end boundaries.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::clock::resolve_after;
use crate::document::LogDocument;
use crate::error::LogError;
use crate::extract::{HeaderInfo, parse_clock_marker};
use crate::frag::ReconstructedFrag;

const PRECACHE_MARKER: &str = "Precaching level";

/// What to do when no timestamped line follows the last frag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndTimePolicy {
    /// Fail with [`LogError::NoTrailingTimestamp`].
    #[default]
    Strict,
    /// End the session at the last frag (or the session start if there are none).
    LastFrag,
}

impl EndTimePolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::LastFrag => "last_frag",
        }
    }
}

impl fmt::Display for EndTimePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EndTimePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(Self::Strict),
            "last_frag" => Ok(Self::LastFrag),
            _ => Err(format!("invalid end time policy: {s}")),
        }
    }
}

/// One played match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMeta {
    pub mode: String,
    pub map: String,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
}

/// Locates the precaching line and resolves its marker after the header time.
///
/// Returns the line index alongside the time so the end scan can start there
/// when the session has no frags.
pub fn resolve_session_start(
    doc: &LogDocument,
    header: &HeaderInfo,
) -> Result<(usize, DateTime<FixedOffset>), LogError> {
    doc.lines()
        .filter(|(_, line)| line.contains(PRECACHE_MARKER))
        .find_map(|(index, line)| parse_clock_marker(line).map(|clock| (index, clock)))
        .map(|(index, clock)| (index, resolve_after(header.start_time(), clock)))
        .ok_or(LogError::MissingSessionStart)
}

/// Finds the first timestamped line after `after_line` and resolves it
/// relative to `anchor`.
pub fn resolve_session_end(
    doc: &LogDocument,
    after_line: usize,
    anchor: DateTime<FixedOffset>,
    policy: EndTimePolicy,
) -> Result<DateTime<FixedOffset>, LogError> {
    let trailing = doc
        .lines_after(after_line)
        .find_map(|(_, line)| parse_clock_marker(line));
    match (trailing, policy) {
        (Some(clock), _) => Ok(resolve_after(anchor, clock)),
        (None, EndTimePolicy::LastFrag) => {
            tracing::warn!(after_line, "no trailing timestamp, ending session at last activity");
            Ok(anchor)
        }
        (None, EndTimePolicy::Strict) => Err(LogError::NoTrailingTimestamp { after_line }),
    }
}

/// Resolves both boundaries of the session.
pub fn resolve_session_boundaries(
    doc: &LogDocument,
    header: &HeaderInfo,
    frags: &[ReconstructedFrag],
    policy: EndTimePolicy,
) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>), LogError> {
    let (start_line, start_time) = resolve_session_start(doc, header)?;
    let (after_line, anchor) = frags
        .last()
        .map_or((start_line, start_time), |frag| (frag.event.line(), frag.absolute_time));
    let end_time = resolve_session_end(doc, after_line, anchor, policy)?;
    tracing::debug!(%start_time, %end_time, "resolved session boundaries");
    Ok((start_time, end_time))
}
