//! Host state lent to the engine for exactly one pass

use crate::activity::store::{ConnectionStore, PlayerHistoryStore};
use crate::core::error::{AutowarError, Result};
use crate::core::types::{FactionId, SystemId};
use crate::galaxy::control::ControlListener;
use crate::galaxy::map::StarMap;
use crate::galaxy::system::StarSystem;
use crate::news::NewsFeed;

/// Borrowed views over host-owned state.
///
/// Built by the host right before `Autowar::take_turn` and dropped right
/// after; the engine keeps nothing from it between passes.
pub struct TurnContext<'a> {
    pub map: &'a mut StarMap,
    pub connections: &'a mut ConnectionStore,
    pub histories: &'a mut PlayerHistoryStore,
    pub news: &'a mut NewsFeed,
    pub listener: &'a mut dyn ControlListener,
    /// Fortifying never pushes control above this value
    pub upper_fortify_border: i32,
}

pub(crate) fn system(map: &StarMap, id: SystemId) -> Result<&StarSystem> {
    map.get(id).ok_or(AutowarError::UnknownSystem(id))
}

pub(crate) fn system_mut(map: &mut StarMap, id: SystemId) -> Result<&mut StarSystem> {
    map.get_mut(id).ok_or(AutowarError::UnknownSystem(id))
}

pub(crate) fn missing_control(faction: &FactionId, system: &str) -> AutowarError {
    AutowarError::MissingControl {
        faction: faction.clone(),
        system: system.to_string(),
    }
}
