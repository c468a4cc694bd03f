//! Longest kill and death streaks per player.
//!
//! A streak is a run of frags in which a player is always the killer
//! (winning) or always the victim (losing). The opposite role ends it. The
//! longest run wins; on a tie the one found first is kept.

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::frag::{FragEvent, ReconstructedFrag};

/// One frag within a streak, seen from the streak owner's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakEntry {
    pub time: DateTime<FixedOffset>,
    /// The other player. Absent when the owner killed itself.
    pub opponent: Option<String>,
    pub weapon: Option<String>,
}

pub type Streak = Vec<StreakEntry>;

/// Per-player best streaks in first-appearance order.
pub type StreakTable = IndexMap<String, Streak>;

/// How a frag relates to the player whose streak is being tracked.
enum Step {
    Extend(StreakEntry),
    Break,
    Skip,
}

fn best_streak<F>(frags: &[ReconstructedFrag], classify: F) -> Streak
where
    F: Fn(&ReconstructedFrag) -> Step,
{
    let mut best = Streak::new();
    let mut current = Streak::new();
    for frag in frags {
        match classify(frag) {
            Step::Extend(entry) => current.push(entry),
            Step::Break => {
                if current.len() > best.len() {
                    best = std::mem::take(&mut current);
                } else {
                    current.clear();
                }
            }
            Step::Skip => {}
        }
    }
    if current.len() > best.len() {
        best = current;
    }
    best
}

/// The longest run of kills by `player`.
///
/// Being killed, or killing itself, ends the run.
pub fn find_winning_streak(player: &str, frags: &[ReconstructedFrag]) -> Streak {
    best_streak(frags, |frag| match &frag.event {
        FragEvent::Kill {
            killer,
            victim,
            weapon,
            ..
        } if killer == player => Step::Extend(StreakEntry {
            time: frag.absolute_time,
            opponent: Some(victim.clone()),
            weapon: Some(weapon.clone()),
        }),
        FragEvent::Kill { victim, .. } if victim == player => Step::Break,
        FragEvent::Suicide { player: p, .. } if p == player => Step::Break,
        _ => Step::Skip,
    })
}

/// The longest run of deaths of `player`, self-kills included.
///
/// Killing someone else ends the run.
pub fn find_losing_streak(player: &str, frags: &[ReconstructedFrag]) -> Streak {
    best_streak(frags, |frag| match &frag.event {
        FragEvent::Kill {
            killer,
            victim,
            weapon,
            ..
        } if victim == player => Step::Extend(StreakEntry {
            time: frag.absolute_time,
            opponent: Some(killer.clone()),
            weapon: Some(weapon.clone()),
        }),
        FragEvent::Suicide { player: p, .. } if p == player => Step::Extend(StreakEntry {
            time: frag.absolute_time,
            opponent: None,
            weapon: None,
        }),
        FragEvent::Kill { killer, .. } if killer == player => Step::Break,
        _ => Step::Skip,
    })
}

/// Every player named in `frags`, in order of first appearance.
pub fn players(frags: &[ReconstructedFrag]) -> Vec<&str> {
    let mut seen = indexmap::IndexSet::new();
    for frag in frags {
        seen.insert(frag.killer());
        if let Some(victim) = frag.victim() {
            seen.insert(victim);
        }
    }
    seen.into_iter().collect()
}

fn streak_table<F>(frags: &[ReconstructedFrag], find: F) -> StreakTable
where
    F: Fn(&str, &[ReconstructedFrag]) -> Streak,
{
    players(frags)
        .into_iter()
        .map(|player| (player.to_string(), find(player, frags)))
        .collect()
}

/// Best winning streak of every player.
pub fn calculate_serial_killers(frags: &[ReconstructedFrag]) -> StreakTable {
    streak_table(frags, find_winning_streak)
}

/// Best losing streak of every player.
pub fn calculate_serial_losers(frags: &[ReconstructedFrag]) -> StreakTable {
    streak_table(frags, find_losing_streak)
}
