//! One decision step of one faction
//!
//! A faction picks a system it occupies. Alone there, it may strike a
//! system in range (invading it if empty); sharing it, it fights a local
//! rival. Whenever no target is available it fortifies instead.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::activity::recorder::ActivityRecorder;
use crate::core::error::Result;
use crate::core::types::{FactionId, MissionResult, SystemId};
use crate::engine::context::{missing_control, system, system_mut, TurnContext};
use crate::engine::dice::Dice;
use crate::engine::fortify::fortify;
use crate::engine::Autowar;
use crate::faction::profile::FactionProfile;
use crate::galaxy::control::ControlChange;
use crate::galaxy::map::StarMap;
use crate::galaxy::system::Company;
use crate::turns::record::TurnRecord;
use crate::turns::state::TurnState;

/// What a decision step ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepAction {
    Invaded,
    RemoteAttack,
    LocalAttack,
    Fortified,
}

impl Autowar {
    pub(crate) fn take_step(
        &mut self,
        profile: &FactionProfile,
        occupied: &[SystemId],
        ctx: &mut TurnContext<'_>,
        dice: &mut dyn Dice,
    ) -> Result<StepAction> {
        let faction = &profile.faction;
        let state = if self.rules.continuation_enabled {
            TurnState::from_record(self.turns.latest(faction))
        } else {
            TurnState::Idle
        };

        let picked = pick_home(&state, occupied, ctx.map, dice);
        let home = system(ctx.map, picked)?;
        if home.control_of(faction).is_none() {
            return Err(missing_control(faction, &home.name));
        }

        let mut record = TurnRecord::new(faction.clone());
        record.picked_system = Some(home.name.clone());

        let action = if home.occupant_count() == 1 {
            self.remote_step(profile, picked, &state, &mut record, ctx, dice)?
        } else {
            self.local_step(faction, picked, &state, &mut record, ctx, dice)?
        };

        self.turns.replace(record);
        Ok(action)
    }

    /// Sole occupant: attack or invade a system in range, or fortify
    fn remote_step(
        &self,
        profile: &FactionProfile,
        picked: SystemId,
        state: &TurnState,
        record: &mut TurnRecord,
        ctx: &mut TurnContext<'_>,
        dice: &mut dyn Dice,
    ) -> Result<StepAction> {
        let faction = &profile.faction;
        let home = system(ctx.map, picked)?;
        let home_owner = home.owner.clone();
        let home_name = home.name.clone();

        // Same owner with a single occupant is already fully held
        let candidates: Vec<SystemId> = ctx
            .map
            .systems_in_range(picked, self.rules.planets_in_range_distance)
            .into_iter()
            .filter(|id| {
                ctx.map
                    .get(*id)
                    .is_some_and(|s| !(s.owner == home_owner && s.occupant_count() == 1))
            })
            .collect();

        if candidates.is_empty() {
            tracing::info!("No attackable systems in range of {}", home_name);
            return self.fortify_at(faction, picked, record, ctx, dice);
        }

        if dice.range(0, 100) >= profile.attack_chance() as i32 {
            return self.fortify_at(faction, picked, record, ctx, dice);
        }

        let target = state
            .target_system()
            .and_then(|name| ctx.map.find_by_name(name))
            .filter(|id| candidates.contains(id))
            .unwrap_or_else(|| candidates[dice.pick(candidates.len())]);

        if system(ctx.map, target)?.occupant_count() == 0 {
            self.invade(faction, target, record, ctx, dice)
        } else {
            self.attack_remote(faction, picked, target, state, record, ctx, dice)
        }
    }

    fn invade(
        &self,
        faction: &FactionId,
        target: SystemId,
        record: &mut TurnRecord,
        ctx: &mut TurnContext<'_>,
        dice: &mut dyn Dice,
    ) -> Result<StepAction> {
        let delta = dice.range(self.rules.min_control_change, self.rules.max_control_change);

        let target_sys = system_mut(ctx.map, target)?;
        target_sys.set_control(faction.clone(), 0);
        let delta = target_sys.apply_victory(faction, None, delta);

        ctx.listener.on_control_change(&ControlChange {
            attacker: faction.clone(),
            defender: FactionId::unset(),
            outcome: MissionResult::Victory,
            system: target_sys.name.clone(),
            delta,
            at: Utc::now(),
        });
        ActivityRecorder::new(ctx.connections, ctx.histories).record(faction, None, target_sys);

        record.record_invasion(&target_sys.name);
        ctx.news.push(format!("{} invaded {}", faction, target_sys.name));
        Ok(StepAction::Invaded)
    }

    #[allow(clippy::too_many_arguments)]
    fn attack_remote(
        &self,
        faction: &FactionId,
        picked: SystemId,
        target: SystemId,
        state: &TurnState,
        record: &mut TurnRecord,
        ctx: &mut TurnContext<'_>,
        dice: &mut dyn Dice,
    ) -> Result<StepAction> {
        let target_sys = system(ctx.map, target)?;

        let remembered = state
            .target_faction()
            .filter(|f| *f != faction && target_sys.control_of(f).is_some())
            .cloned();

        let defender = match remembered {
            Some(f) => f,
            None => {
                let rivals: Vec<&FactionId> = target_sys
                    .factions
                    .iter()
                    .map(|fc| &fc.faction)
                    .filter(|f| *f != faction)
                    .collect();
                if rivals.is_empty() {
                    return self.fortify_at(faction, picked, record, ctx, dice);
                }
                rivals[dice.pick(rivals.len())].clone()
            }
        };

        let delta = dice.range(self.rules.min_control_change, self.rules.max_control_change);

        let target_sys = system_mut(ctx.map, target)?;
        target_sys.ensure_control(faction);
        let delta = target_sys.apply_victory(faction, Some(&defender), delta);

        ctx.listener.on_control_change(&ControlChange {
            attacker: faction.clone(),
            defender: defender.clone(),
            outcome: MissionResult::Victory,
            system: target_sys.name.clone(),
            delta,
            at: Utc::now(),
        });
        ActivityRecorder::new(ctx.connections, ctx.histories).record(faction, Some(&defender), target_sys);

        record.record_attack(&target_sys.name, &defender);
        report_fight(ctx, faction, &defender, target, delta)?;
        Ok(StepAction::RemoteAttack)
    }

    /// Shared system: take control directly from a local rival
    fn local_step(
        &self,
        faction: &FactionId,
        picked: SystemId,
        state: &TurnState,
        record: &mut TurnRecord,
        ctx: &mut TurnContext<'_>,
        dice: &mut dyn Dice,
    ) -> Result<StepAction> {
        let home = system_mut(ctx.map, picked)?;
        let attacker = home
            .control_index(faction)
            .ok_or_else(|| missing_control(faction, &home.name))?;

        let rivals: Vec<usize> = home
            .factions
            .iter()
            .enumerate()
            .filter(|(idx, fc)| *idx != attacker && fc.percentage > 0)
            .map(|(idx, _)| idx)
            .collect();

        if rivals.is_empty() {
            tracing::info!("No attackable factions on {}", home.name);
            return self.fortify_at(faction, picked, record, ctx, dice);
        }

        let remembered = state
            .target_faction()
            .and_then(|f| rivals.iter().copied().find(|&idx| &home.factions[idx].faction == f));
        let defender = remembered.unwrap_or_else(|| rivals[dice.pick(rivals.len())]);

        // Never take more than the defender holds or the attacker can absorb
        let drawn = dice.range_inclusive(self.rules.min_control_change, self.rules.max_control_change);
        let delta = drawn
            .min(home.factions[defender].percentage)
            .min(100 - home.factions[attacker].percentage)
            .max(0);

        home.factions[attacker].percentage += delta;
        home.factions[defender].percentage -= delta;
        home.add_company(Company::for_faction(faction));

        let defender_id = home.factions[defender].faction.clone();
        record.record_attack(&home.name, &defender_id);
        report_fight(ctx, faction, &defender_id, picked, delta)?;
        Ok(StepAction::LocalAttack)
    }

    fn fortify_at(
        &self,
        faction: &FactionId,
        home: SystemId,
        record: &mut TurnRecord,
        ctx: &mut TurnContext<'_>,
        dice: &mut dyn Dice,
    ) -> Result<StepAction> {
        let border = ctx.upper_fortify_border;
        let home_sys = system_mut(ctx.map, home)?;
        fortify(home_sys, faction, &self.rules, border, ctx.news, record, dice)?;
        Ok(StepAction::Fortified)
    }
}

/// Reuse the remembered home system while the faction still holds it
fn pick_home(state: &TurnState, occupied: &[SystemId], map: &StarMap, dice: &mut dyn Dice) -> SystemId {
    state
        .picked_system()
        .and_then(|name| map.find_by_name(name))
        .filter(|id| occupied.contains(id))
        .unwrap_or_else(|| occupied[dice.pick(occupied.len())])
}

/// The two news lines of a fight
fn report_fight(
    ctx: &mut TurnContext<'_>,
    attacker: &FactionId,
    defender: &FactionId,
    at: SystemId,
    delta: i32,
) -> Result<()> {
    let sys = system(ctx.map, at)?;
    ctx.news.push(format!(
        "{} attacked {} on {}. Control changed by {}",
        attacker, defender, sys.name, delta
    ));
    ctx.news.push(format!(
        "{} control {}% and {} control {}%",
        attacker,
        sys.percentage_of(attacker).unwrap_or(0),
        defender,
        sys.percentage_of(defender).unwrap_or(0)
    ));
    Ok(())
}
