//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use fc_core::EndTimePolicy;

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,
    /// How to end a session whose log stops right after the last frag.
    #[serde(default)]
    pub end_time_policy: EndTimePolicy,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("end_time_policy", &self.end_time_policy)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("farcry.db"),
            end_time_policy: EndTimePolicy::default(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (FARCRY_*)
        figment = figment.merge(Env::prefixed("FARCRY_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for farcry.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("farcry"))
}

/// Returns the platform-specific data directory for farcry.
///
/// On Linux: `~/.local/share/farcry`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("farcry"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_farcry() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "farcry");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_db() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.database_path, data_dir.join("farcry.db"));
        assert_eq!(config.end_time_policy, EndTimePolicy::Strict);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("farcry.toml");
        std::fs::write(
            &path,
            "database_path = \"/srv/farcry/matches.db\"\nend_time_policy = \"last_frag\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/srv/farcry/matches.db"));
        assert_eq!(config.end_time_policy, EndTimePolicy::LastFrag);
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("farcry.toml");
        std::fs::write(&path, "end_time_policy = \"lenient\"\n").unwrap();

        assert!(Config::load_from(Some(&path)).is_err());
    }
}
