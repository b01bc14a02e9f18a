//! Autowar configuration with documented defaults
//!
//! Values are read from a TOML file. A missing file means "use the defaults";
//! the defaults are then written once so operators have something to edit.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{AutowarError, Result};

/// Largest accepted tick interval (one week)
pub const MAX_TICK_SECONDS: u64 = 7 * 24 * 60 * 60;

/// File holding the per-faction personality profiles
pub const PROFILES_FILENAME: &str = "autowar_faction_stats.json";

/// File holding the most recent turn record of every faction
pub const TURNS_FILENAME: &str = "autowar_faction_turns.json";

/// Configuration consumed by the engine and the scheduler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutowarConfig {
    /// Folder holding the persisted profile and turn files
    pub base_folder: PathBuf,

    /// Whether the timer fires at all
    pub enabled: bool,

    /// Seconds between two passes
    ///
    /// Must be in `1..=MAX_TICK_SECONDS`. At the default (3600) every
    /// faction acts once an hour.
    pub tick_seconds: u64,

    /// Distance (map units) within which a lone faction looks for targets
    pub planets_in_range_distance: f32,

    /// Lower bound of a control change, inclusive
    pub min_faction_control_change: i32,

    /// Upper bound of a control change
    ///
    /// Exclusive for remote attacks and invasions, inclusive for local
    /// attacks. The difference matters: with the defaults a remote attack
    /// can never move control by 20, a local attack can.
    pub max_faction_control_change: i32,

    /// Lower bound of a fortify gain, inclusive
    pub min_fortify_change: i32,

    /// Upper bound of a fortify gain, inclusive
    pub max_fortify_change: i32,

    /// Fortifying never pushes control above this value
    pub upper_fortify_border: i32,

    /// Resume the previous turn's target instead of picking fresh each step
    pub continuation_enabled: bool,

    /// Endpoints receiving the per-pass news feed
    pub webhook_urls: Vec<String>,

    /// Title of the rich embed posted to the webhooks
    pub webhook_title: String,

    /// Faction universe; empty means "every faction named in the galaxy"
    pub factions: Vec<String>,

    /// Fixed seed for every pass (reproducible runs); `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for AutowarConfig {
    fn default() -> Self {
        Self {
            base_folder: PathBuf::from("data"),
            enabled: true,
            tick_seconds: 3600,
            planets_in_range_distance: 25.0,
            min_faction_control_change: 5,
            max_faction_control_change: 20,
            min_fortify_change: 3,
            max_fortify_change: 25,
            upper_fortify_border: 75,
            continuation_enabled: false,
            webhook_urls: Vec::new(),
            webhook_title: "Autowar Turn".to_string(),
            factions: Vec::new(),
            seed: None,
        }
    }
}

impl AutowarConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file, falling back to defaults when absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: AutowarConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Write this configuration to `path` unless a file already exists there
    pub fn save_if_absent(&self, path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        tracing::info!("Wrote default autowar settings to {:?}", path);
        Ok(true)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        validate_interval(self.tick_seconds)?;

        let percent = 0..=100;
        for (name, value) in [
            ("min_faction_control_change", self.min_faction_control_change),
            ("max_faction_control_change", self.max_faction_control_change),
            ("min_fortify_change", self.min_fortify_change),
            ("max_fortify_change", self.max_fortify_change),
            ("upper_fortify_border", self.upper_fortify_border),
        ] {
            if !percent.contains(&value) {
                return Err(AutowarError::InvalidConfig(format!(
                    "{} ({}) must be within 0..=100",
                    name, value
                )));
            }
        }

        // Remote draws are half-open, so the range must not be empty
        if self.min_faction_control_change >= self.max_faction_control_change {
            return Err(AutowarError::InvalidConfig(format!(
                "min_faction_control_change ({}) must be < max_faction_control_change ({})",
                self.min_faction_control_change, self.max_faction_control_change
            )));
        }

        if self.min_fortify_change > self.max_fortify_change {
            return Err(AutowarError::InvalidConfig(format!(
                "min_fortify_change ({}) must be <= max_fortify_change ({})",
                self.min_fortify_change, self.max_fortify_change
            )));
        }

        if !(self.planets_in_range_distance >= 0.0) {
            return Err(AutowarError::InvalidConfig(format!(
                "planets_in_range_distance ({}) must be non-negative",
                self.planets_in_range_distance
            )));
        }

        Ok(())
    }

    pub fn profiles_path(&self) -> PathBuf {
        self.base_folder.join(PROFILES_FILENAME)
    }

    pub fn turns_path(&self) -> PathBuf {
        self.base_folder.join(TURNS_FILENAME)
    }
}

/// Check a tick interval against the accepted range
pub fn validate_interval(seconds: u64) -> Result<()> {
    if seconds == 0 || seconds > MAX_TICK_SECONDS {
        return Err(AutowarError::InvalidInterval(seconds));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AutowarConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_seconds, 3600);
        assert_eq!(config.min_faction_control_change, 5);
        assert_eq!(config.max_faction_control_change, 20);
        assert!(!config.continuation_enabled);
    }

    #[test]
    fn test_interval_bounds() {
        assert!(validate_interval(0).is_err());
        assert!(validate_interval(1).is_ok());
        assert!(validate_interval(MAX_TICK_SECONDS).is_ok());
        assert!(validate_interval(MAX_TICK_SECONDS + 1).is_err());
    }

    #[test]
    fn test_empty_control_range_rejected() {
        let config = AutowarConfig {
            min_faction_control_change: 10,
            max_faction_control_change: 10,
            ..AutowarConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_equal_fortify_bounds_allowed() {
        let config = AutowarConfig {
            min_fortify_change: 7,
            max_fortify_change: 7,
            ..AutowarConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_border_above_hundred_rejected() {
        let config = AutowarConfig {
            upper_fortify_border: 101,
            ..AutowarConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AutowarConfig = toml::from_str(
            r#"
            tick_seconds = 60
            webhook_urls = ["https://example.invalid/hook"]
            "#,
        )
        .unwrap();
        assert_eq!(config.tick_seconds, 60);
        assert_eq!(config.webhook_urls.len(), 1);
        assert_eq!(config.max_fortify_change, 25);
    }

    #[test]
    fn test_state_paths() {
        let config = AutowarConfig {
            base_folder: PathBuf::from("/tmp/war"),
            ..AutowarConfig::default()
        };
        assert_eq!(config.profiles_path(), PathBuf::from("/tmp/war/autowar_faction_stats.json"));
        assert_eq!(config.turns_path(), PathBuf::from("/tmp/war/autowar_faction_turns.json"));
    }
}
