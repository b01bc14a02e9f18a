//! Profile store: one profile per playable faction

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::error::{AutowarError, Result};
use crate::core::types::FactionId;
use crate::engine::dice::Dice;
use crate::faction::profile::FactionProfile;
use crate::persistence;

/// Profiles keyed by faction, iterated in faction order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileStore {
    profiles: BTreeMap<FactionId, FactionProfile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roll a profile for every faction in `universe`, skipping sentinels
    pub fn generate<'a>(universe: impl IntoIterator<Item = &'a FactionId>, dice: &mut dyn Dice) -> Self {
        let mut store = Self::new();
        for faction in universe {
            if faction.is_sentinel() || store.profiles.contains_key(faction) {
                continue;
            }
            store.insert(FactionProfile::random(faction.clone(), dice));
        }
        store
    }

    /// Read the stored profiles, or generate and persist them on first run.
    ///
    /// An existing file is never overwritten. Out-of-range stats in it are
    /// clamped with a warning; sentinel entries are dropped.
    pub fn load_or_initialize<'a>(
        path: &Path,
        universe: impl IntoIterator<Item = &'a FactionId>,
        dice: &mut dyn Dice,
    ) -> Result<Self> {
        if let Some(mut store) = persistence::load_json::<ProfileStore>(path)? {
            tracing::debug!("Read {} faction profiles from {:?}", store.len(), path);
            store.sanitize();
            return Ok(store);
        }

        tracing::debug!("Generating and saving faction profiles to {:?}", path);
        let store = Self::generate(universe, dice);
        persistence::save_json_if_absent(path, &store)?;
        Ok(store)
    }

    fn sanitize(&mut self) {
        self.profiles.retain(|faction, _| {
            if faction.is_sentinel() {
                tracing::warn!("Dropping profile for sentinel faction {}", faction);
                return false;
            }
            true
        });

        for (faction, profile) in self.profiles.iter_mut() {
            if &profile.faction != faction {
                tracing::warn!("Profile stored under {} names {}; using the key", faction, profile.faction);
                profile.faction = faction.clone();
            }
            if profile.clamp_to_ranges() {
                tracing::warn!("Clamped out-of-range stats for {}", profile);
            }
        }
    }

    /// Insert a profile, ignoring sentinel factions
    pub fn insert(&mut self, profile: FactionProfile) -> Option<FactionProfile> {
        if profile.faction.is_sentinel() {
            return None;
        }
        self.profiles.insert(profile.faction.clone(), profile)
    }

    pub fn get(&self, faction: &FactionId) -> Option<&FactionProfile> {
        self.profiles.get(faction)
    }

    /// Administrative toggle: a disabled faction is skipped for whole passes
    pub fn set_enabled(&mut self, faction: &FactionId, enabled: bool) -> Result<()> {
        let profile = self
            .profiles
            .get_mut(faction)
            .ok_or_else(|| AutowarError::UnknownFaction(faction.clone()))?;
        profile.enabled = enabled;
        tracing::info!("{} is {}", faction, if enabled { "enabled" } else { "disabled" });
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FactionId, &FactionProfile)> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::dice::RngDice;
    use crate::faction::profile::Behavior;

    fn universe() -> Vec<FactionId> {
        vec![
            FactionId::unset(),
            FactionId::new("Davion"),
            FactionId::none(),
            FactionId::new("Liao"),
            FactionId::new("Davion"),
        ]
    }

    #[test]
    fn test_generate_skips_sentinels_and_duplicates() {
        let store = ProfileStore::generate(&universe(), &mut RngDice::seeded(1));
        assert_eq!(store.len(), 2);
        assert!(store.get(&FactionId::unset()).is_none());
        assert!(store.get(&FactionId::none()).is_none());
        assert!(store.iter().all(|(_, p)| p.enabled));
    }

    #[test]
    fn test_insert_rejects_sentinel() {
        let mut store = ProfileStore::new();
        store.insert(FactionProfile::new(FactionId::none(), 1, 1, 1, Behavior::Balanced));
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_enabled() {
        let mut store = ProfileStore::generate(&universe(), &mut RngDice::seeded(1));
        store.set_enabled(&FactionId::new("Liao"), false).unwrap();
        assert!(!store.get(&FactionId::new("Liao")).unwrap().enabled);
        assert!(matches!(
            store.set_enabled(&FactionId::new("Kurita"), false),
            Err(AutowarError::UnknownFaction(_))
        ));
    }

    #[test]
    fn test_load_clamps_and_drops_sentinels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        std::fs::write(
            &path,
            r#"{
                "Davion": {"faction":"Davion","strength":40,"difficulty":0,"tech_level":2,"behavior":"Balanced"},
                "NoFaction": {"faction":"NoFaction","strength":1,"difficulty":1,"tech_level":1,"behavior":"Balanced"}
            }"#,
        )
        .unwrap();

        let store = ProfileStore::load_or_initialize(&path, &universe(), &mut RngDice::seeded(5)).unwrap();
        assert_eq!(store.len(), 1);
        let davion = store.get(&FactionId::new("Davion")).unwrap();
        assert_eq!((davion.strength, davion.difficulty), (10, 1));
    }
}
