//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the sentinel faction used for "no faction chosen yet"
pub const UNSET_FACTION: &str = "INVALID_UNSET";

/// Name of the sentinel faction used for unclaimed territory
pub const NO_FACTION: &str = "NoFaction";

/// Faction identity
///
/// Factions are keyed by their display name. Two names are reserved as
/// sentinels and never act, own a profile, or take turns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactionId(pub String);

impl FactionId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The "unset" sentinel (defender of an invasion)
    pub fn unset() -> Self {
        Self(UNSET_FACTION.to_string())
    }

    /// The "no faction" sentinel (unclaimed territory)
    pub fn none() -> Self {
        Self(NO_FACTION.to_string())
    }

    pub fn is_sentinel(&self) -> bool {
        self.0 == UNSET_FACTION || self.0 == NO_FACTION
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FactionId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Index of a star system inside a `StarMap`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SystemId(pub usize);

/// Outcome reported for a fight. The engine only records fights it won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionResult {
    Victory,
}

/// 2D position on the star map
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
