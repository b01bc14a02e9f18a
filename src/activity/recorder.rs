//! Writes faction fights into the host's connection and player histories

use chrono::{DateTime, Utc};

use crate::activity::store::{CompanyActivity, ConnectionStore, PlayerHistoryStore};
use crate::core::types::{FactionId, MissionResult};
use crate::galaxy::system::{Company, StarSystem};

/// Target label used when a faction invades an empty system
pub const INVADED_LABEL: &str = "Invaded";

/// IP recorded for connections the server creates on a faction's behalf
pub const SERVER_IP: &str = "server";

/// Borrows the host stores for one pass.
///
/// Every call appends a new activity; there is no dedup key, so call it
/// exactly once per fight.
pub struct ActivityRecorder<'a> {
    connections: &'a mut ConnectionStore,
    histories: &'a mut PlayerHistoryStore,
}

impl<'a> ActivityRecorder<'a> {
    pub fn new(connections: &'a mut ConnectionStore, histories: &'a mut PlayerHistoryStore) -> Self {
        Self { connections, histories }
    }

    /// Record that `acting` fought `target` (or invaded, when `None`) on `system`
    pub fn record(
        &mut self,
        acting: &FactionId,
        target: Option<&FactionId>,
        system: &mut StarSystem,
    ) -> CompanyActivity {
        let result_time = Utc::now();
        let client_id = acting.as_str();
        let target_label = target.map_or_else(|| INVADED_LABEL.to_string(), |t| t.to_string());

        tracing::debug!(
            "{} {} {} {} {}",
            system.name,
            acting,
            target_label,
            client_id,
            result_time
        );

        let activity = CompanyActivity {
            employer: acting.to_string(),
            target: target_label,
            system_id: system.name.clone(),
            company_name: acting.to_string(),
            result_time,
            result: MissionResult::Victory,
        };

        self.touch_connection(client_id, acting, &system.name);
        system.add_company(Company::for_faction(acting));
        self.append_history(client_id, activity.clone(), result_time);

        activity
    }

    fn touch_connection(&mut self, client_id: &str, acting: &FactionId, system_name: &str) {
        let info = self.connections.entry(client_id);
        info.company_name = acting.to_string();
        info.last_system_fought_at = system_name.to_string();
        info.ip = SERVER_IP.to_string();
        info.last_faction_fought_for = acting.clone();
        info.last_data_send = Utc::now();
    }

    fn append_history(&mut self, client_id: &str, activity: CompanyActivity, at: DateTime<Utc>) {
        let history = self.histories.entry(client_id, at);
        history.last_active = at;
        history.activities.push(activity);
    }
}
