//! What a faction did on its most recent decision step

use serde::{Deserialize, Serialize};

use crate::core::types::FactionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LastAction {
    #[default]
    None,
    Attack,
    Invaded,
    Fortified,
}

/// Systems are referenced by name so records survive galaxy reloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub faction: FactionId,
    #[serde(default)]
    pub last_action: LastAction,
    #[serde(default)]
    pub picked_system: Option<String>,
    #[serde(default)]
    pub targeted_system: Option<String>,
    #[serde(default)]
    pub targeted_faction: Option<FactionId>,
}

impl TurnRecord {
    pub fn new(faction: FactionId) -> Self {
        Self {
            faction,
            last_action: LastAction::None,
            picked_system: None,
            targeted_system: None,
            targeted_faction: None,
        }
    }

    pub fn record_fortify(&mut self) {
        self.last_action = LastAction::Fortified;
        self.targeted_faction = None;
    }

    pub fn record_invasion(&mut self, system: &str) {
        self.last_action = LastAction::Invaded;
        self.targeted_system = Some(system.to_string());
        self.targeted_faction = None;
    }

    pub fn record_attack(&mut self, system: &str, defender: &FactionId) {
        self.last_action = LastAction::Attack;
        self.targeted_system = Some(system.to_string());
        self.targeted_faction = Some(defender.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fortify_clears_target_faction() {
        let mut r = TurnRecord::new(FactionId::new("Steiner"));
        r.record_attack("Hesperus", &FactionId::new("Marik"));
        r.record_fortify();
        assert_eq!(r.last_action, LastAction::Fortified);
        assert!(r.targeted_faction.is_none());
    }

    #[test]
    fn test_invasion_has_no_defender() {
        let mut r = TurnRecord::new(FactionId::new("Steiner"));
        r.record_invasion("Coventry");
        assert_eq!(r.last_action, LastAction::Invaded);
        assert_eq!(r.targeted_system.as_deref(), Some("Coventry"));
        assert!(r.targeted_faction.is_none());
    }
}
