//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Far Cry server log analyzer.
///
/// Reconstructs the timeline of a match from a dedicated-server console log:
/// when every frag happened, when the session started and ended, and who
/// went on the longest streaks.
#[derive(Debug, Parser)]
#[command(name = "farcry", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every frag with its absolute time.
    Frags {
        /// The server log to analyze.
        log: PathBuf,

        /// Write CSV rows to this file instead of stdout.
        #[arg(long, conflicts_with = "pretty")]
        csv: Option<PathBuf>,

        /// Render frags as emoji lines.
        #[arg(long)]
        pretty: bool,
    },

    /// Show game mode, map and session boundaries.
    Session {
        /// The server log to analyze.
        log: PathBuf,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show each player's longest streak.
    Streaks {
        /// The server log to analyze.
        log: PathBuf,

        /// Show death streaks instead of kill streaks.
        #[arg(long)]
        losing: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Analyze a log and store the match in the database.
    Import {
        /// The server log to analyze.
        log: PathBuf,
    },

    /// List stored matches, or delete one.
    Matches {
        /// Output as JSON.
        #[arg(long)]
        json: bool,

        /// Delete the match with this ID (and its frags) instead of listing.
        #[arg(long, value_name = "MATCH_ID", conflicts_with = "json")]
        delete: Option<String>,
    },
}
