//! Human-friendly one-line rendering of frags.

use crate::frag::{FragEvent, ReconstructedFrag};
use crate::weapon::Weapon;

/// Renders a frag as an emoji line, e.g.
/// `[⌚ 2019-03-04 20:05:10] 😛 A 🔫 😦 B`.
///
/// Unknown weapon codes are rendered without an icon.
pub fn prettify_frag(frag: &ReconstructedFrag) -> String {
    let time = frag.absolute_time.format("%Y-%m-%d %H:%M:%S");
    match &frag.event {
        FragEvent::Kill {
            killer,
            victim,
            weapon,
            ..
        } => match Weapon::lookup(weapon) {
            Ok(weapon) => format!("[⌚ {time}] 😛 {killer} {} 😦 {victim}", weapon.icon()),
            Err(err) => {
                tracing::debug!(%err, "rendering frag without weapon icon");
                format!("[⌚ {time}] 😛 {killer} 😦 {victim}")
            }
        },
        FragEvent::Suicide { player, .. } => format!("[⌚ {time}] 😦 {player} ☠"),
    }
}

/// Renders every frag, one per line.
pub fn prettify_frags(frags: &[ReconstructedFrag]) -> Vec<String> {
    frags.iter().map(prettify_frag).collect()
}
