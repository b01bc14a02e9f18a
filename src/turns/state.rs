//! Per-faction continuation state
//!
//! With continuation enabled a faction keeps pressing the fight it started:
//!
//! ```text
//! Idle --attack/invade--> Targeting --fortify--> Fortified --next step--> Idle
//! ```
//!
//! `Targeting` reuses the previously picked home system, target system and
//! defender when they are still valid. `Fortified` and `Idle` both pick fresh.

use crate::core::types::FactionId;
use crate::turns::record::{LastAction, TurnRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    Targeting {
        picked: String,
        system: String,
        faction: Option<FactionId>,
    },
    Fortified,
}

impl TurnState {
    /// Derive the state a faction starts its next step in
    pub fn from_record(record: Option<&TurnRecord>) -> Self {
        let Some(record) = record else {
            return TurnState::Idle;
        };

        match record.last_action {
            LastAction::None => TurnState::Idle,
            LastAction::Fortified => TurnState::Fortified,
            LastAction::Attack | LastAction::Invaded => {
                match (&record.picked_system, &record.targeted_system) {
                    (Some(picked), Some(system)) => TurnState::Targeting {
                        picked: picked.clone(),
                        system: system.clone(),
                        faction: record.targeted_faction.clone(),
                    },
                    _ => TurnState::Idle,
                }
            }
        }
    }

    pub fn picked_system(&self) -> Option<&str> {
        match self {
            TurnState::Targeting { picked, .. } => Some(picked),
            _ => None,
        }
    }

    pub fn target_system(&self) -> Option<&str> {
        match self {
            TurnState::Targeting { system, .. } => Some(system),
            _ => None,
        }
    }

    pub fn target_faction(&self) -> Option<&FactionId> {
        match self {
            TurnState::Targeting { faction, .. } => faction.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> TurnRecord {
        let mut r = TurnRecord::new(FactionId::new("Steiner"));
        r.picked_system = Some("Tharkad".into());
        r
    }

    #[test]
    fn test_no_record_is_idle() {
        assert_eq!(TurnState::from_record(None), TurnState::Idle);
        assert_eq!(TurnState::from_record(Some(&record())), TurnState::Idle);
    }

    #[test]
    fn test_attack_leads_to_targeting() {
        let mut r = record();
        r.record_attack("Hesperus", &FactionId::new("Marik"));
        let state = TurnState::from_record(Some(&r));
        assert_eq!(state.picked_system(), Some("Tharkad"));
        assert_eq!(state.target_system(), Some("Hesperus"));
        assert_eq!(state.target_faction(), Some(&FactionId::new("Marik")));
    }

    #[test]
    fn test_invasion_targets_system_only() {
        let mut r = record();
        r.record_invasion("Coventry");
        let state = TurnState::from_record(Some(&r));
        assert_eq!(state.target_system(), Some("Coventry"));
        assert!(state.target_faction().is_none());
    }

    #[test]
    fn test_fortify_leaves_targeting() {
        let mut r = record();
        r.record_attack("Hesperus", &FactionId::new("Marik"));
        r.record_fortify();
        let state = TurnState::from_record(Some(&r));
        assert_eq!(state, TurnState::Fortified);
        assert!(state.picked_system().is_none());
    }
}
