//! CLI subcommand implementations.

pub mod frags;
pub mod import;
pub mod matches;
pub mod session;
pub mod streaks;
pub mod util;
