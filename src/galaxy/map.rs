//! The galaxy snapshot lent to the engine for one pass

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::core::error::Result;
use crate::core::types::{FactionId, SystemId};
use crate::galaxy::system::StarSystem;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StarMap {
    pub systems: Vec<StarSystem>,
}

impl StarMap {
    pub fn new(systems: Vec<StarSystem>) -> Self {
        Self { systems }
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    pub fn get(&self, id: SystemId) -> Option<&StarSystem> {
        self.systems.get(id.0)
    }

    pub fn get_mut(&mut self, id: SystemId) -> Option<&mut StarSystem> {
        self.systems.get_mut(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = SystemId> {
        (0..self.systems.len()).map(SystemId)
    }

    pub fn find_by_name(&self, name: &str) -> Option<SystemId> {
        self.systems.iter().position(|s| s.name == name).map(SystemId)
    }

    /// Systems within `distance` of `origin`, not counting `origin` itself
    pub fn systems_in_range(&self, origin: SystemId, distance: f32) -> Vec<SystemId> {
        let Some(center) = self.get(origin).map(|s| s.position) else {
            return Vec::new();
        };

        self.systems
            .iter()
            .enumerate()
            .filter(|(idx, s)| *idx != origin.0 && center.distance(&s.position) <= distance)
            .map(|(idx, _)| SystemId(idx))
            .collect()
    }

    /// Every non-sentinel faction that owns or holds control anywhere
    pub fn factions(&self) -> BTreeSet<FactionId> {
        self.systems
            .iter()
            .flat_map(|s| std::iter::once(&s.owner).chain(s.factions.iter().map(|fc| &fc.faction)))
            .filter(|f| !f.is_sentinel())
            .cloned()
            .collect()
    }

    /// Load a galaxy from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the galaxy to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        crate::persistence::save_json(path, self)
    }
}
