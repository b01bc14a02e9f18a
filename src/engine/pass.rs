//! A full pass: every enabled faction spends its turn budget

use std::collections::HashMap;

use crate::core::error::Result;
use crate::core::types::{FactionId, SystemId};
use crate::engine::context::TurnContext;
use crate::engine::dice::Dice;
use crate::engine::step::StepAction;
use crate::engine::Autowar;
use crate::faction::profile::FactionProfile;
use crate::galaxy::map::StarMap;

/// Counts of what happened during one pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub steps: u32,
    pub invasions: u32,
    pub remote_attacks: u32,
    pub local_attacks: u32,
    pub fortifications: u32,
    /// Factions that took at least one step, in pass order
    pub acted: Vec<FactionId>,
    /// Factions whose turn was cut short by an error
    pub failed_factions: Vec<FactionId>,
}

impl PassSummary {
    fn count(&mut self, action: StepAction) {
        self.steps += 1;
        match action {
            StepAction::Invaded => self.invasions += 1,
            StepAction::RemoteAttack => self.remote_attacks += 1,
            StepAction::LocalAttack => self.local_attacks += 1,
            StepAction::Fortified => self.fortifications += 1,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.steps == 0 && self.failed_factions.is_empty()
    }
}

impl Autowar {
    /// Run one pass over the lent galaxy.
    ///
    /// Clears the news feed first. A galaxy without any validly held system
    /// is a no-op. A faction whose step fails loses the rest of its budget
    /// for this pass; the remaining factions still act.
    pub fn take_turn(&mut self, ctx: &mut TurnContext<'_>, dice: &mut dyn Dice) -> PassSummary {
        tracing::info!("***Autowar turn started***");
        ctx.news.clear();

        let valid = valid_systems(ctx.map);
        if valid.is_empty() {
            tracing::warn!("No valid systems found");
            return PassSummary::default();
        }

        let occupied = occupied_systems(ctx.map, &valid);
        let roster: Vec<FactionProfile> = self.profiles.iter().map(|(_, p)| p.clone()).collect();
        let mut summary = PassSummary::default();

        for profile in &roster {
            let faction = &profile.faction;
            let Some(systems) = occupied.get(faction) else {
                continue;
            };
            if !profile.enabled {
                tracing::debug!("Skipping disabled faction {}", faction);
                continue;
            }

            let turns = profile.turn_budget();
            tracing::info!("{}", profile);
            tracing::info!("{}'s taking {} turns", faction, turns);

            spend_budget(&mut summary, faction, turns, || self.take_step(profile, systems, ctx, dice));
            tracing::info!("---");
        }

        tracing::info!("***Autowar turn ended***");
        summary
    }
}

/// Run up to `turns` steps for one faction, stopping at its first error.
/// The faction counts as having acted only if some step succeeded.
fn spend_budget(
    summary: &mut PassSummary,
    faction: &FactionId,
    turns: u32,
    mut step: impl FnMut() -> Result<StepAction>,
) {
    let mut stepped = false;
    for _ in 0..turns {
        match step() {
            Ok(action) => {
                summary.count(action);
                stepped = true;
            }
            Err(e) => {
                tracing::error!("{} turn aborted: {}", faction, e);
                summary.failed_factions.push(faction.clone());
                break;
            }
        }
    }

    if stepped {
        summary.acted.push(faction.clone());
    }
}

/// Systems whose strongest holder is a real faction
pub(crate) fn valid_systems(map: &StarMap) -> Vec<SystemId> {
    map.ids()
        .filter(|id| {
            map.get(*id)
                .and_then(|s| s.find_highest_control())
                .is_some_and(|fc| !fc.faction.is_sentinel())
        })
        .collect()
}

/// Faction -> every valid system it has an entry on
pub(crate) fn occupied_systems(map: &StarMap, valid: &[SystemId]) -> HashMap<FactionId, Vec<SystemId>> {
    let mut occupied: HashMap<FactionId, Vec<SystemId>> = HashMap::new();
    for &id in valid {
        let Some(system) = map.get(id) else { continue };
        for fc in &system.factions {
            occupied.entry(fc.faction.clone()).or_default().push(id);
        }
    }
    occupied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AutowarError;
    use crate::core::types::Vec2;
    use crate::galaxy::system::StarSystem;

    #[test]
    fn test_valid_systems_skip_sentinel_holders() {
        let map = StarMap::new(vec![
            StarSystem::new("A", FactionId::new("Davion"), Vec2::default())
                .with_control(FactionId::new("Davion"), 60),
            StarSystem::new("B", FactionId::none(), Vec2::default())
                .with_control(FactionId::none(), 70)
                .with_control(FactionId::new("Liao"), 30),
            StarSystem::new("C", FactionId::none(), Vec2::default()),
        ]);
        assert_eq!(valid_systems(&map), vec![SystemId(0)]);
    }

    #[test]
    fn test_occupied_includes_minor_holders() {
        let map = StarMap::new(vec![StarSystem::new("A", FactionId::new("Davion"), Vec2::default())
            .with_control(FactionId::new("Davion"), 60)
            .with_control(FactionId::new("Liao"), 0)]);
        let occupied = occupied_systems(&map, &[SystemId(0)]);
        assert_eq!(occupied.get(&FactionId::new("Liao")), Some(&vec![SystemId(0)]));
        assert_eq!(occupied.len(), 2);
    }

    #[test]
    fn test_failed_first_step_does_not_count_as_acted() {
        let mut summary = PassSummary::default();
        let davion = FactionId::new("Davion");
        let mut calls = 0;

        spend_budget(&mut summary, &davion, 3, || {
            calls += 1;
            Err(AutowarError::UnknownSystem(SystemId(9)))
        });

        assert_eq!(calls, 1);
        assert!(summary.acted.is_empty());
        assert_eq!(summary.failed_factions, vec![davion]);
        assert_eq!(summary.steps, 0);
    }

    #[test]
    fn test_error_after_a_step_keeps_faction_as_acted() {
        let mut summary = PassSummary::default();
        let liao = FactionId::new("Liao");
        let mut results = vec![Err(AutowarError::UnknownSystem(SystemId(1))), Ok(StepAction::Fortified)];

        spend_budget(&mut summary, &liao, 4, || results.pop().unwrap());

        assert_eq!(summary.steps, 1);
        assert_eq!(summary.acted, vec![liao.clone()]);
        assert_eq!(summary.failed_factions, vec![liao]);
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = PassSummary::default();
        assert!(summary.is_noop());
        summary.count(StepAction::Invaded);
        summary.count(StepAction::Fortified);
        assert_eq!(summary.steps, 2);
        assert_eq!(summary.invasions, 1);
        assert_eq!(summary.fortifications, 1);
        assert!(!summary.is_noop());
    }
}
