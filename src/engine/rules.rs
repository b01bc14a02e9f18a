//! Numeric rules a pass runs under

use crate::core::config::AutowarConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct TurnRules {
    pub planets_in_range_distance: f32,
    /// Control change bounds: `[min, max)` remotely, `[min, max]` locally
    pub min_control_change: i32,
    pub max_control_change: i32,
    /// Fortify gain bounds, both inclusive
    pub min_fortify_change: i32,
    pub max_fortify_change: i32,
    pub continuation_enabled: bool,
}

impl From<&AutowarConfig> for TurnRules {
    fn from(config: &AutowarConfig) -> Self {
        Self {
            planets_in_range_distance: config.planets_in_range_distance,
            min_control_change: config.min_faction_control_change,
            max_control_change: config.max_faction_control_change,
            min_fortify_change: config.min_fortify_change,
            max_fortify_change: config.max_fortify_change,
            continuation_enabled: config.continuation_enabled,
        }
    }
}

impl Default for TurnRules {
    fn default() -> Self {
        Self::from(&AutowarConfig::default())
    }
}
