//! The Autowar turn engine
//!
//! `Autowar` owns what persists between passes (rules, faction profiles,
//! the last turn record of every faction). Everything else it touches is
//! lent by the host through a `TurnContext` for the duration of one pass.

pub mod context;
pub mod dice;
pub mod fortify;
pub mod pass;
pub mod rules;
pub mod step;

pub use context::TurnContext;
pub use dice::{Dice, RngDice, ScriptedDice};
pub use pass::PassSummary;
pub use rules::TurnRules;
pub use step::StepAction;

use std::path::Path;

use crate::core::config::AutowarConfig;
use crate::core::error::Result;
use crate::core::types::FactionId;
use crate::faction::store::ProfileStore;
use crate::turns::history::TurnHistory;

pub struct Autowar {
    rules: TurnRules,
    profiles: ProfileStore,
    turns: TurnHistory,
}

impl Autowar {
    pub fn new(rules: TurnRules, profiles: ProfileStore, turns: TurnHistory) -> Self {
        Self { rules, profiles, turns }
    }

    /// Build the engine from its persisted files.
    ///
    /// Profiles are generated for `universe` on first run only; turn records
    /// start empty when the turns file is absent.
    pub fn load(config: &AutowarConfig, universe: &[FactionId]) -> Result<Self> {
        let mut dice = match config.seed {
            Some(seed) => RngDice::seeded(seed),
            None => RngDice::from_clock(),
        };
        let profiles = ProfileStore::load_or_initialize(&config.profiles_path(), universe, &mut dice)?;
        let turns = TurnHistory::load(&config.turns_path())?;

        tracing::info!(
            "Autowar loaded {} faction profiles and {} turn records",
            profiles.len(),
            turns.len()
        );
        Ok(Self::new(TurnRules::from(config), profiles, turns))
    }

    pub fn rules(&self) -> &TurnRules {
        &self.rules
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    pub fn turns(&self) -> &TurnHistory {
        &self.turns
    }

    pub fn set_faction_enabled(&mut self, faction: &FactionId, enabled: bool) -> Result<()> {
        self.profiles.set_enabled(faction, enabled)
    }

    pub fn save_turns(&self, path: &Path) -> Result<()> {
        self.turns.save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_initializes_profiles_once() {
        let dir = TempDir::new().unwrap();
        let config = AutowarConfig {
            base_folder: dir.path().to_path_buf(),
            seed: Some(7),
            ..Default::default()
        };
        let universe = vec![FactionId::new("Davion"), FactionId::new("Liao"), FactionId::none()];

        let first = Autowar::load(&config, &universe).unwrap();
        assert_eq!(first.profiles().len(), 2);
        assert!(first.turns().is_empty());
        assert!(config.profiles_path().exists());

        let again = Autowar::load(
            &AutowarConfig { seed: Some(99), ..config.clone() },
            &universe,
        )
        .unwrap();
        assert_eq!(first.profiles(), again.profiles());
    }

    #[test]
    fn test_toggle_unknown_faction_fails() {
        let mut autowar = Autowar::new(TurnRules::default(), ProfileStore::new(), TurnHistory::new());
        assert!(autowar.set_faction_enabled(&FactionId::new("Kurita"), false).is_err());
    }
}
