//! Star systems and the factions contesting them

use serde::{Deserialize, Serialize};

use crate::core::types::{FactionId, Vec2};

/// A faction's share of control over one system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionControl {
    pub faction: FactionId,
    /// Control percentage, 0-100
    pub percentage: i32,
}

impl FactionControl {
    pub fn new(faction: FactionId, percentage: i32) -> Self {
        Self { faction, percentage }
    }
}

/// A company (player or faction army) stationed on a system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub faction: FactionId,
}

impl Company {
    /// The roster entry a faction uses when it fights on its own behalf
    pub fn for_faction(faction: &FactionId) -> Self {
        Self {
            name: faction.to_string(),
            faction: faction.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    pub name: String,
    /// Top-level owner of the system
    pub owner: FactionId,
    pub position: Vec2,
    #[serde(default)]
    pub factions: Vec<FactionControl>,
    #[serde(default)]
    pub companies: Vec<Company>,
}

impl StarSystem {
    pub fn new(name: impl Into<String>, owner: FactionId, position: Vec2) -> Self {
        Self {
            name: name.into(),
            owner,
            position,
            factions: Vec::new(),
            companies: Vec::new(),
        }
    }

    /// Builder-style helper for seeding control entries
    pub fn with_control(mut self, faction: FactionId, percentage: i32) -> Self {
        self.set_control(faction, percentage);
        self
    }

    /// The entry with the highest control; ties go to the earliest entry
    pub fn find_highest_control(&self) -> Option<&FactionControl> {
        self.factions.iter().fold(None, |best: Option<&FactionControl>, fc| match best {
            Some(b) if b.percentage >= fc.percentage => Some(b),
            _ => Some(fc),
        })
    }

    pub fn control_of(&self, faction: &FactionId) -> Option<&FactionControl> {
        self.factions.iter().find(|fc| &fc.faction == faction)
    }

    pub fn control_of_mut(&mut self, faction: &FactionId) -> Option<&mut FactionControl> {
        self.factions.iter_mut().find(|fc| &fc.faction == faction)
    }

    pub fn control_index(&self, faction: &FactionId) -> Option<usize> {
        self.factions.iter().position(|fc| &fc.faction == faction)
    }

    pub fn percentage_of(&self, faction: &FactionId) -> Option<i32> {
        self.control_of(faction).map(|fc| fc.percentage)
    }

    /// Set a faction's control, creating the entry if needed
    pub fn set_control(&mut self, faction: FactionId, percentage: i32) {
        let percentage = percentage.clamp(0, 100);
        match self.control_of_mut(&faction) {
            Some(fc) => fc.percentage = percentage,
            None => self.factions.push(FactionControl::new(faction, percentage)),
        }
    }

    /// Create a zero-percent entry unless the faction already has one
    pub fn ensure_control(&mut self, faction: &FactionId) {
        if self.control_of(faction).is_none() {
            self.factions.push(FactionControl::new(faction.clone(), 0));
        }
    }

    /// Apply a won fight and return the change actually made.
    ///
    /// Against a loser the winner gains only what the loser gives up, and
    /// never past 100, so the system total is unchanged. Without a loser
    /// (an invasion) the winner simply gains up to 100.
    pub fn apply_victory(&mut self, winner: &FactionId, loser: Option<&FactionId>, delta: i32) -> i32 {
        self.ensure_control(winner);
        let held = self.percentage_of(winner).unwrap_or(0);
        let mut applied = delta.min(100 - held).max(0);

        if let Some(loser) = loser {
            let available = self.percentage_of(loser).unwrap_or(0);
            applied = applied.min(available);
            if let Some(fc) = self.control_of_mut(loser) {
                fc.percentage -= applied;
            }
        }
        if let Some(fc) = self.control_of_mut(winner) {
            fc.percentage += applied;
        }
        applied
    }

    pub fn has_company(&self, name: &str) -> bool {
        self.companies.iter().any(|c| c.name == name)
    }

    /// Add a company unless one with the same name is already present
    pub fn add_company(&mut self, company: Company) -> bool {
        if self.has_company(&company.name) {
            return false;
        }
        self.companies.push(company);
        true
    }

    pub fn occupant_count(&self) -> usize {
        self.factions.len()
    }
}
