//! Core analysis for Far Cry dedicated-server logs.
//!
//! This crate turns a raw console log into:
//! - Frags with absolute timestamps, inferring the hour the log never prints
//! - Session boundaries (start at precaching, end at the last activity)
//! - Longest kill and death streaks per player
//!
//! Reading files, CSV output and persistence live in the outer crates.

pub mod analysis;
pub mod clock;
pub mod display;
pub mod document;
mod error;
pub mod extract;
pub mod frag;
pub mod session;
pub mod streak;
pub mod weapon;

pub use analysis::{MatchReport, analyze};
pub use clock::reconstruct_frags;
pub use display::{prettify_frag, prettify_frags};
pub use document::LogDocument;
pub use error::LogError;
pub use extract::{HeaderInfo, extract_frag_events, parse_header, parse_session_meta};
pub use frag::{ClockReading, FragEvent, ReconstructedFrag};
pub use session::{EndTimePolicy, SessionMeta};
pub use streak::{
    Streak, StreakEntry, StreakTable, calculate_serial_killers, calculate_serial_losers,
    find_losing_streak, find_winning_streak,
};
pub use weapon::{UnrecognizedWeaponCode, Weapon, WeaponCategory};
