//! Turn history: the latest record of each faction

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::Result;
use crate::core::types::FactionId;
use crate::persistence;
use crate::turns::record::TurnRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnHistory {
    records: Vec<TurnRecord>,
}

impl TurnHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<TurnRecord>) -> Self {
        let mut history = Self::new();
        for record in records {
            history.replace(record);
        }
        history
    }

    pub fn latest(&self, faction: &FactionId) -> Option<&TurnRecord> {
        self.records.iter().find(|r| &r.faction == faction)
    }

    /// Store `record` in its faction's slot, replacing any earlier one
    pub fn replace(&mut self, record: TurnRecord) {
        match self.records.iter_mut().find(|r| r.faction == record.faction) {
            Some(slot) => *slot = record,
            None => self.records.push(record),
        }
    }

    pub fn records(&self) -> &[TurnRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Load the history; a missing file is an empty history
    pub fn load(path: &Path) -> Result<Self> {
        let records: Option<Vec<TurnRecord>> = persistence::load_json(path)?;
        match records {
            Some(records) => {
                tracing::info!("Autowar loading {:?}", path);
                Ok(Self::from_records(records))
            }
            None => Ok(Self::new()),
        }
    }

    /// Overwrite the history file
    pub fn save(&self, path: &Path) -> Result<()> {
        tracing::info!("Autowar saving {:?}", path);
        persistence::save_json(path, &self.records)
    }
}
