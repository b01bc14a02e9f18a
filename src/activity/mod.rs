//! Faction activity recording

pub mod recorder;
pub mod store;

pub use recorder::ActivityRecorder;
pub use store::{CompanyActivity, ConnectionStore, PlayerHistory, PlayerHistoryStore, UserInfo};
