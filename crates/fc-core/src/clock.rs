//! Absolute timestamps for frags that only carry `<MM:SS>`.
//!
//! # Algorithm
//!
//! The log prints minute and second but never the hour. Frags are walked in
//! document order carrying `(last_minute, hour_offset)`; a minute reading
//! smaller than the previous one means the clock wrapped past `59` exactly
//! once, so the offset grows by one hour. The absolute time is the header's
//! hour plus the offset, with the frag's own minute and second.
//!
//! Two consecutive frags more than an hour apart are therefore placed in the
//! wrong hour. Server logs of a single match never exhibit that, and guessing
//! harder would make ordinary logs ambiguous.

use chrono::{DateTime, Duration, FixedOffset, Timelike};

use crate::extract::HeaderInfo;
use crate::frag::{ClockReading, FragEvent, ReconstructedFrag};

/// State carried from one reading to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolloverState {
    pub last_minute: u32,
    pub hour_offset: i64,
}

impl RolloverState {
    /// State before the first reading, anchored on a known minute.
    pub const fn starting_at(minute: u32) -> Self {
        Self {
            last_minute: minute,
            hour_offset: 0,
        }
    }

    /// Consumes one reading, returning the state after it.
    #[must_use]
    pub const fn advance(self, reading: ClockReading) -> Self {
        let hour_offset = if reading.minute() < self.last_minute {
            self.hour_offset + 1
        } else {
            self.hour_offset
        };
        Self {
            last_minute: reading.minute(),
            hour_offset,
        }
    }
}

/// Truncates a time to the start of its hour.
pub fn floor_to_hour(time: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    time - Duration::seconds(ClockReading::of(&time).seconds_into_hour())
        - Duration::nanoseconds(i64::from(time.nanosecond()))
}

/// Places a reading `hour_offset` hours after the hour `anchor` falls in.
pub fn resolve_reading(
    anchor: DateTime<FixedOffset>,
    hour_offset: i64,
    reading: ClockReading,
) -> DateTime<FixedOffset> {
    floor_to_hour(anchor)
        + Duration::hours(hour_offset)
        + Duration::seconds(reading.seconds_into_hour())
}

/// Resolves a single reading that follows `anchor`, applying at most one
/// rollover relative to the anchor's minute.
pub fn resolve_after(anchor: DateTime<FixedOffset>, reading: ClockReading) -> DateTime<FixedOffset> {
    let state = RolloverState::starting_at(ClockReading::of(&anchor).minute()).advance(reading);
    resolve_reading(anchor, state.hour_offset, reading)
}

/// Pins every frag to an absolute time, preserving order.
pub fn reconstruct_frags(header: &HeaderInfo, frags: Vec<FragEvent>) -> Vec<ReconstructedFrag> {
    let start = header.start_time();
    let mut state = RolloverState::starting_at(header.start_minute());
    let reconstructed: Vec<ReconstructedFrag> = frags
        .into_iter()
        .map(|event| {
            state = state.advance(event.clock());
            ReconstructedFrag {
                absolute_time: resolve_reading(start, state.hour_offset, event.clock()),
                event,
            }
        })
        .collect();
    tracing::debug!(
        count = reconstructed.len(),
        rollovers = state.hour_offset,
        "reconstructed frag timestamps"
    );
    reconstructed
}
