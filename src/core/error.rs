use std::path::PathBuf;

use thiserror::Error;

use crate::core::types::{FactionId, SystemId};

#[derive(Error, Debug)]
pub enum AutowarError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid tick interval: {0} seconds")]
    InvalidInterval(u64),

    #[error("Faction {faction} has no control entry on {system}")]
    MissingControl { faction: FactionId, system: String },

    #[error("Unknown star system: {0:?}")]
    UnknownSystem(SystemId),

    #[error("Unknown faction: {0}")]
    UnknownFaction(FactionId),

    #[error("Corrupt state file {path:?}: {source}")]
    CorruptState {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Notification error: {0}")]
    Notify(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Config write error: {0}")]
    TomlWriteError(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, AutowarError>;
