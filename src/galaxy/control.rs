//! Control-change notifications sent back to the host

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{FactionId, MissionResult};

/// One remote attack or invasion, as reported to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlChange {
    pub attacker: FactionId,
    /// `FactionId::unset()` for an invasion of an empty system
    pub defender: FactionId,
    pub outcome: MissionResult,
    pub system: String,
    pub delta: i32,
    pub at: DateTime<Utc>,
}

/// Host callback for control changes.
///
/// Called once per remote attack or invasion, never for local contests or
/// fortifying. Implementations must not fail back into the engine.
pub trait ControlListener {
    fn on_control_change(&mut self, change: &ControlChange);
}

impl<F> ControlListener for F
where
    F: FnMut(&ControlChange),
{
    fn on_control_change(&mut self, change: &ControlChange) {
        self(change)
    }
}

/// Listener that only logs
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingListener;

impl ControlListener for LoggingListener {
    fn on_control_change(&mut self, change: &ControlChange) {
        tracing::info!(
            attacker = %change.attacker,
            defender = %change.defender,
            system = %change.system,
            delta = change.delta,
            "control changed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_listener_receives_change() {
        let mut seen = Vec::new();
        {
            let mut listener = |c: &ControlChange| seen.push(c.delta);
            listener.on_control_change(&ControlChange {
                attacker: FactionId::new("Davion"),
                defender: FactionId::unset(),
                outcome: MissionResult::Victory,
                system: "Robinson".into(),
                delta: 7,
                at: Utc::now(),
            });
        }
        assert_eq!(seen, vec![7]);
    }
}
