//! Line-level extraction of typed records from a server log.
//!
//! The log grammar recognised here:
//!
//! ```text
//! Log Started at Friday, November 09, 2018 12:22:07
//! <00:00>  Lua cvar: (g_timezone,-5)
//! <01:00>  Loading level Levels/mp_surf, mission ASSAULT ------
//! <01:12>  Precaching level ... done
//! <02:06>  <Lua> papazark killed lamonthe with AG36
//! <02:21>  <Lua> lamonthe killed itself
//! <14:37>  == Statistics ==
//! ```
//!
//! Everything else is ignored.

use std::sync::LazyLock;

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, Timelike};
use regex::Regex;
use serde::Serialize;

use crate::document::LogDocument;
use crate::error::LogError;
use crate::frag::{ClockReading, FragEvent};

const HEADER_PREFIX: &str = "Log Started at ";
const HEADER_FORMAT: &str = "%A, %B %d, %Y %H:%M:%S";

/// Offsets actually in use around the world.
const TIMEZONE_RANGE: std::ops::RangeInclusive<i32> = -12..=14;

static CLOCK_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<([0-5]\d):([0-5]\d)>").unwrap());

static TIMEZONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(g_timezone,\s*([+-]?\d{1,3})\)").unwrap());

static LEVEL_LOAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Loading level (?:\S*/)?([^\s,/]+), mission (\S+)").unwrap()
});

static FRAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^<([0-5]\d):([0-5]\d)>\s+<[^>]*>\s+(.+?) killed (?:(itself)|(.+?) with (\S+))\s*$",
    )
    .unwrap()
});

/// When the log was started and in which timezone the server clock runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderInfo {
    start_wall_time: NaiveDateTime,
    timezone_offset_hours: i32,
    #[serde(skip)]
    offset: FixedOffset,
}

impl HeaderInfo {
    pub fn new(start_wall_time: NaiveDateTime, timezone_offset_hours: i32) -> Result<Self, LogError> {
        let offset = TIMEZONE_RANGE
            .contains(&timezone_offset_hours)
            .then(|| FixedOffset::east_opt(timezone_offset_hours * 3600))
            .flatten()
            .ok_or(LogError::InvalidTimezoneOffset(timezone_offset_hours))?;
        Ok(Self {
            start_wall_time,
            timezone_offset_hours,
            offset,
        })
    }

    pub const fn start_wall_time(&self) -> NaiveDateTime {
        self.start_wall_time
    }

    pub const fn timezone_offset_hours(&self) -> i32 {
        self.timezone_offset_hours
    }

    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// The header's wall-clock time with the server offset attached.
    ///
    /// The wall time is not shifted: `20:00:00` at `-5` is `20:00:00-05:00`.
    pub fn start_time(&self) -> DateTime<FixedOffset> {
        let utc = self.start_wall_time - Duration::seconds(i64::from(self.offset.local_minus_utc()));
        DateTime::from_naive_utc_and_offset(utc, self.offset)
    }

    pub fn start_minute(&self) -> u32 {
        self.start_wall_time.minute()
    }
}

/// Reads the log header and the server timezone.
pub fn parse_header(doc: &LogDocument) -> Result<HeaderInfo, LogError> {
    let first = doc.first_line().unwrap_or_default();
    let start_wall_time = first
        .strip_prefix(HEADER_PREFIX)
        .and_then(|rest| NaiveDateTime::parse_from_str(rest.trim_end(), HEADER_FORMAT).ok())
        .ok_or_else(|| LogError::MalformedHeader {
            line: first.to_string(),
        })?;

    let hours = doc
        .lines()
        .find_map(|(_, line)| TIMEZONE_RE.captures(line))
        .and_then(|caps| caps[1].parse::<i32>().ok())
        .ok_or(LogError::MissingTimezoneDirective)?;

    let header = HeaderInfo::new(start_wall_time, hours)?;
    tracing::debug!(start = %header.start_time(), "parsed log header");
    Ok(header)
}

/// Reads the game mode and map name, in that order.
pub fn parse_session_meta(doc: &LogDocument) -> Result<(String, String), LogError> {
    let caps = doc
        .lines()
        .find_map(|(_, line)| LEVEL_LOAD_RE.captures(line))
        .ok_or(LogError::MissingSessionInfo)?;
    let map = caps[1].to_string();
    let mode = caps[2].to_string();
    tracing::debug!(%mode, %map, "parsed session info");
    Ok((mode, map))
}

/// Collects every kill and suicide line in document order.
pub fn extract_frag_events(doc: &LogDocument) -> Vec<FragEvent> {
    let frags: Vec<FragEvent> = doc
        .lines()
        .filter_map(|(index, line)| parse_frag_line(index, line))
        .collect();
    tracing::debug!(count = frags.len(), "extracted frag events");
    frags
}

fn parse_frag_line(index: usize, line: &str) -> Option<FragEvent> {
    let caps = FRAG_RE.captures(line)?;
    let clock = ClockReading::new(caps[1].parse().ok()?, caps[2].parse().ok()?)?;
    let killer = caps[3].to_string();
    if caps.get(4).is_some() {
        return Some(FragEvent::Suicide {
            clock,
            line: index,
            player: killer,
        });
    }
    Some(FragEvent::Kill {
        clock,
        line: index,
        killer,
        victim: caps[5].to_string(),
        weapon: caps[6].to_string(),
    })
}

/// The `<MM:SS>` marker a line starts with, if any.
pub fn parse_clock_marker(line: &str) -> Option<ClockReading> {
    let caps = CLOCK_MARKER_RE.captures(line)?;
    ClockReading::new(caps[1].parse().ok()?, caps[2].parse().ok()?)
}
