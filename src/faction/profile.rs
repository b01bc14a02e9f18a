//! Faction personality profiles
//!
//! A profile decides how many decisions a faction makes per pass and how
//! likely it is to attack rather than fortify.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::core::types::FactionId;
use crate::engine::dice::Dice;

pub const STRENGTH_RANGE: RangeInclusive<u8> = 1..=10;
pub const DIFFICULTY_RANGE: RangeInclusive<u8> = 1..=10;
pub const TECH_LEVEL_RANGE: RangeInclusive<u8> = 1..=3;

/// Behavior class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Behavior {
    Defensive,
    #[default]
    Balanced,
    Aggressive,
    WarMachine,
}

impl Behavior {
    pub const ALL: [Behavior; 4] = [
        Behavior::Defensive,
        Behavior::Balanced,
        Behavior::Aggressive,
        Behavior::WarMachine,
    ];

    /// Multiplier applied to the base turn count
    pub fn turn_multiplier(&self) -> f64 {
        match self {
            Behavior::WarMachine => 1.5,
            Behavior::Aggressive => 1.25,
            Behavior::Defensive | Behavior::Balanced => 1.0,
        }
    }

    /// Percent chance (0-100) that a lone faction attacks instead of fortifying
    pub fn attack_chance(&self) -> u32 {
        match self {
            Behavior::WarMachine | Behavior::Aggressive => 95,
            Behavior::Defensive => 15,
            Behavior::Balanced => 75,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionProfile {
    pub faction: FactionId,
    pub strength: u8,
    pub difficulty: u8,
    pub tech_level: u8,
    pub behavior: Behavior,
    /// Disabled factions sit out whole passes
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl FactionProfile {
    pub fn new(faction: FactionId, strength: u8, difficulty: u8, tech_level: u8, behavior: Behavior) -> Self {
        Self {
            faction,
            strength,
            difficulty,
            tech_level,
            behavior,
            enabled: true,
        }
    }

    /// Roll a fresh profile with uniform stats and behavior
    pub fn random(faction: FactionId, dice: &mut dyn Dice) -> Self {
        let strength = roll(dice, STRENGTH_RANGE);
        let difficulty = roll(dice, DIFFICULTY_RANGE);
        let tech_level = roll(dice, TECH_LEVEL_RANGE);
        let behavior = Behavior::ALL[dice.pick(Behavior::ALL.len())];
        Self::new(faction, strength, difficulty, tech_level, behavior)
    }

    /// Decision steps per pass.
    ///
    /// The stat average is truncated first, then scaled by behavior and
    /// rounded half-to-even.
    pub fn turn_budget(&self) -> u32 {
        let base = (self.strength as u32 + self.difficulty as u32 + self.tech_level as u32) / 3;
        (base as f64 * self.behavior.turn_multiplier()).round_ties_even() as u32
    }

    pub fn attack_chance(&self) -> u32 {
        self.behavior.attack_chance()
    }

    /// Pull out-of-range stats back into range. Returns true if anything changed.
    pub fn clamp_to_ranges(&mut self) -> bool {
        let before = (self.strength, self.difficulty, self.tech_level);
        self.strength = clamp_into(self.strength, STRENGTH_RANGE);
        self.difficulty = clamp_into(self.difficulty, DIFFICULTY_RANGE);
        self.tech_level = clamp_into(self.tech_level, TECH_LEVEL_RANGE);
        before != (self.strength, self.difficulty, self.tech_level)
    }
}

fn roll(dice: &mut dyn Dice, range: RangeInclusive<u8>) -> u8 {
    dice.range_inclusive(*range.start() as i32, *range.end() as i32) as u8
}

fn clamp_into(value: u8, range: RangeInclusive<u8>) -> u8 {
    value.clamp(*range.start(), *range.end())
}

impl fmt::Display for FactionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, Enabled:{}, Strength: {}, Difficulty: {}, Tech Level: {}, Behavior: {:?}",
            self.faction, self.enabled, self.strength, self.difficulty, self.tech_level, self.behavior
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::dice::{RngDice, ScriptedDice};
    use proptest::prelude::*;

    fn profile(s: u8, d: u8, t: u8, behavior: Behavior) -> FactionProfile {
        FactionProfile::new(FactionId::new("Davion"), s, d, t, behavior)
    }

    #[test]
    fn test_turn_budget_truncates_then_scales() {
        // (10 + 10 + 3) / 3 = 7
        assert_eq!(profile(10, 10, 3, Behavior::Balanced).turn_budget(), 7);
        assert_eq!(profile(10, 10, 3, Behavior::Defensive).turn_budget(), 7);
        // 7 * 1.25 = 8.75
        assert_eq!(profile(10, 10, 3, Behavior::Aggressive).turn_budget(), 9);
        // 7 * 1.5 = 10.5, ties to even
        assert_eq!(profile(10, 10, 3, Behavior::WarMachine).turn_budget(), 10);
    }

    #[test]
    fn test_turn_budget_rounds_half_to_even() {
        // base 3 * 1.5 = 4.5 -> 4
        assert_eq!(profile(3, 3, 3, Behavior::WarMachine).turn_budget(), 4);
        // base 2 * 1.25 = 2.5 -> 2
        assert_eq!(profile(2, 2, 2, Behavior::Aggressive).turn_budget(), 2);
        // base 1 * 1.5 = 1.5 -> 2
        assert_eq!(profile(1, 1, 1, Behavior::WarMachine).turn_budget(), 2);
    }

    #[test]
    fn test_attack_chance_per_behavior() {
        assert_eq!(Behavior::Defensive.attack_chance(), 15);
        assert_eq!(Behavior::Balanced.attack_chance(), 75);
        assert_eq!(Behavior::Aggressive.attack_chance(), 95);
        assert_eq!(Behavior::WarMachine.attack_chance(), 95);
    }

    #[test]
    fn test_random_profile_from_script() {
        let mut dice = ScriptedDice::new([4, 9, 2, 3]);
        let p = FactionProfile::random(FactionId::new("Marik"), &mut dice);
        assert_eq!((p.strength, p.difficulty, p.tech_level), (4, 9, 2));
        assert_eq!(p.behavior, Behavior::WarMachine);
        assert!(p.enabled);
    }

    #[test]
    fn test_random_profiles_stay_in_range() {
        let mut dice = RngDice::seeded(11);
        for _ in 0..500 {
            let p = FactionProfile::random(FactionId::new("Kurita"), &mut dice);
            assert!(STRENGTH_RANGE.contains(&p.strength));
            assert!(DIFFICULTY_RANGE.contains(&p.difficulty));
            assert!(TECH_LEVEL_RANGE.contains(&p.tech_level));
        }
    }

    #[test]
    fn test_clamp_to_ranges() {
        let mut p = profile(0, 14, 9, Behavior::Balanced);
        assert!(p.clamp_to_ranges());
        assert_eq!((p.strength, p.difficulty, p.tech_level), (1, 10, 3));
        assert!(!p.clamp_to_ranges());
    }

    #[test]
    fn test_enabled_defaults_when_missing_from_json() {
        let json = r#"{"faction":"Liao","strength":3,"difficulty":4,"tech_level":1,"behavior":"Defensive"}"#;
        let p: FactionProfile = serde_json::from_str(json).unwrap();
        assert!(p.enabled);
        assert_eq!(p.attack_chance(), 15);
    }

    #[test]
    fn test_display() {
        let p = profile(5, 6, 2, Behavior::Aggressive);
        assert_eq!(
            p.to_string(),
            "Davion, Enabled:true, Strength: 5, Difficulty: 6, Tech Level: 2, Behavior: Aggressive"
        );
    }

    proptest! {
        #[test]
        fn turn_budget_monotonic_in_stat_sum(
            s in 1_u8..=10, d in 1_u8..=10, t in 1_u8..=3,
            bump in 0_usize..3, behavior_idx in 0_usize..4,
        ) {
            let behavior = Behavior::ALL[behavior_idx];
            let low = profile(s, d, t, behavior);
            let mut high = low.clone();
            match bump {
                0 => high.strength = high.strength.saturating_add(1),
                1 => high.difficulty = high.difficulty.saturating_add(1),
                _ => high.tech_level = high.tech_level.saturating_add(1),
            }
            prop_assert!(high.turn_budget() >= low.turn_budget());
        }

        #[test]
        fn attack_chance_is_one_of_three(behavior_idx in 0_usize..4) {
            let chance = Behavior::ALL[behavior_idx].attack_chance();
            prop_assert!([95, 75, 15].contains(&chance));
        }
    }
}
