//! Connection and player-history stores owned by the host

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::types::{FactionId, MissionResult};

/// Last known state of a client connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub company_name: String,
    pub last_system_fought_at: String,
    pub ip: String,
    pub last_faction_fought_for: FactionId,
    pub last_data_send: DateTime<Utc>,
}

impl Default for UserInfo {
    fn default() -> Self {
        Self {
            company_name: String::new(),
            last_system_fought_at: String::new(),
            ip: String::new(),
            last_faction_fought_for: FactionId::unset(),
            last_data_send: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

/// Connections keyed by client id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionStore {
    entries: HashMap<String, UserInfo>,
}

impl ConnectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, client_id: &str) -> Option<&UserInfo> {
        self.entries.get(client_id)
    }

    /// The entry for `client_id`, created empty if absent
    pub fn entry(&mut self, client_id: &str) -> &mut UserInfo {
        self.entries.entry(client_id.to_string()).or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A single fought mission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyActivity {
    pub employer: String,
    /// Defender name, or "Invaded" when the system was empty
    pub target: String,
    pub system_id: String,
    pub company_name: String,
    pub result_time: DateTime<Utc>,
    pub result: MissionResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerHistory {
    pub id: String,
    pub last_active: DateTime<Utc>,
    #[serde(default)]
    pub activities: Vec<CompanyActivity>,
}

impl PlayerHistory {
    pub fn new(id: impl Into<String>, last_active: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            last_active,
            activities: Vec::new(),
        }
    }
}

/// Player histories keyed by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerHistoryStore {
    entries: HashMap<String, PlayerHistory>,
}

impl PlayerHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&PlayerHistory> {
        self.entries.get(id)
    }

    /// The history for `id`, created with `now` as its first activity time if absent
    pub fn entry(&mut self, id: &str, now: DateTime<Utc>) -> &mut PlayerHistory {
        self.entries
            .entry(id.to_string())
            .or_insert_with(|| PlayerHistory::new(id, now))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
