//! Far Cry log analyzer CLI library.
//!
//! This crate provides the CLI interface and the file/CSV/database plumbing
//! around `fc-core`.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
