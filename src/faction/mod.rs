//! Faction personalities

pub mod profile;
pub mod store;

pub use profile::{Behavior, FactionProfile};
pub use store::ProfileStore;
