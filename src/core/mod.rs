pub mod config;
pub mod error;
pub mod types;

pub use config::AutowarConfig;
pub use error::{AutowarError, Result};
pub use types::{FactionId, MissionResult, SystemId, Vec2};
