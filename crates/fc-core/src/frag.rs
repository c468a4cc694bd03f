//! Frag events as read from the log and after timestamp reconstruction.

use std::fmt;

use chrono::{DateTime, FixedOffset, Timelike};
use serde::{Deserialize, Deserializer, Serialize, de};

/// A `<MM:SS>` marker. Carries no hour or date on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ClockReading {
    minute: u32,
    second: u32,
}

impl ClockReading {
    /// Returns `None` unless both components are in `0..=59`.
    pub const fn new(minute: u32, second: u32) -> Option<Self> {
        if minute < 60 && second < 60 {
            Some(Self { minute, second })
        } else {
            None
        }
    }

    /// The minute and second of an absolute time, ignoring everything else.
    pub fn of<Tz: chrono::TimeZone>(time: &DateTime<Tz>) -> Self {
        Self {
            minute: time.minute(),
            second: time.second(),
        }
    }

    pub const fn minute(self) -> u32 {
        self.minute
    }

    pub const fn second(self) -> u32 {
        self.second
    }

    /// Seconds elapsed since the top of the hour.
    pub fn seconds_into_hour(self) -> i64 {
        i64::from(self.minute * 60 + self.second)
    }
}

impl<'de> Deserialize<'de> for ClockReading {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            minute: u32,
            second: u32,
        }

        let Raw { minute, second } = Raw::deserialize(deserializer)?;
        Self::new(minute, second).ok_or_else(|| {
            de::Error::custom(format!("clock reading {minute:02}:{second:02} is out of range"))
        })
    }
}

impl fmt::Display for ClockReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minute, self.second)
    }
}

/// An elimination as written in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FragEvent {
    /// One player killed another.
    Kill {
        clock: ClockReading,
        /// Zero-based index of the source line.
        line: usize,
        killer: String,
        victim: String,
        weapon: String,
    },
    /// A player killed itself.
    Suicide {
        clock: ClockReading,
        line: usize,
        player: String,
    },
}

impl FragEvent {
    pub const fn clock(&self) -> ClockReading {
        match self {
            Self::Kill { clock, .. } | Self::Suicide { clock, .. } => *clock,
        }
    }

    pub const fn line(&self) -> usize {
        match self {
            Self::Kill { line, .. } | Self::Suicide { line, .. } => *line,
        }
    }

    /// The player credited with the frag. For a suicide, the player itself.
    pub fn killer(&self) -> &str {
        match self {
            Self::Kill { killer, .. } => killer,
            Self::Suicide { player, .. } => player,
        }
    }

    /// The other player involved, absent for a suicide.
    pub fn victim(&self) -> Option<&str> {
        match self {
            Self::Kill { victim, .. } => Some(victim),
            Self::Suicide { .. } => None,
        }
    }

    pub fn weapon(&self) -> Option<&str> {
        match self {
            Self::Kill { weapon, .. } => Some(weapon),
            Self::Suicide { .. } => None,
        }
    }
}

/// A frag pinned to an absolute point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconstructedFrag {
    pub absolute_time: DateTime<FixedOffset>,
    #[serde(flatten)]
    pub event: FragEvent,
}

impl ReconstructedFrag {
    pub fn killer(&self) -> &str {
        self.event.killer()
    }

    pub fn victim(&self) -> Option<&str> {
        self.event.victim()
    }

    pub fn weapon(&self) -> Option<&str> {
        self.event.weapon()
    }

    pub const fn is_suicide(&self) -> bool {
        matches!(self.event, FragEvent::Suicide { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_reading_rejects_out_of_range_components() {
        assert!(ClockReading::new(59, 59).is_some());
        assert!(ClockReading::new(60, 0).is_none());
        assert!(ClockReading::new(0, 60).is_none());
    }

    #[test]
    fn deserializing_clock_reading_checks_range() {
        let reading: ClockReading = serde_json::from_str(r#"{"minute":5,"second":2}"#).unwrap();
        assert_eq!(reading, ClockReading::new(5, 2).unwrap());

        let err = serde_json::from_str::<ClockReading>(r#"{"minute":60,"second":0}"#).unwrap_err();
        assert!(err.to_string().contains("60:00 is out of range"), "{err}");
        assert!(serde_json::from_str::<ClockReading>(r#"{"minute":0,"second":75}"#).is_err());
    }

    #[test]
    fn clock_reading_displays_zero_padded() {
        let clock = ClockReading::new(5, 2).unwrap();
        assert_eq!(clock.to_string(), "05:02");
        assert_eq!(clock.seconds_into_hour(), 302);
    }

    #[test]
    fn suicide_has_no_victim_or_weapon() {
        let frag = FragEvent::Suicide {
            clock: ClockReading::new(12, 0).unwrap(),
            line: 7,
            player: "A".into(),
        };
        assert_eq!(frag.killer(), "A");
        assert_eq!(frag.victim(), None);
        assert_eq!(frag.weapon(), None);
        assert_eq!(frag.line(), 7);
    }

    #[test]
    fn reconstructed_frag_serializes_flat() {
        let frag = ReconstructedFrag {
            absolute_time: DateTime::parse_from_rfc3339("2019-03-04T20:05:10-05:00").unwrap(),
            event: FragEvent::Kill {
                clock: ClockReading::new(5, 10).unwrap(),
                line: 3,
                killer: "A".into(),
                victim: "B".into(),
                weapon: "M4".into(),
            },
        };
        let json = serde_json::to_value(&frag).unwrap();
        assert_eq!(json["type"], "kill");
        assert_eq!(json["killer"], "A");
        assert_eq!(json["absolute_time"], "2019-03-04T20:05:10-05:00");
    }
}
