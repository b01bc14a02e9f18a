//! Autowar - Automated Faction Warfare
//!
//! On every timer tick each enabled faction spends its turn budget attacking,
//! invading or fortifying star systems; the resulting news is posted to
//! webhooks and the turn history is saved.

pub mod activity;
pub mod core;
pub mod engine;
pub mod faction;
pub mod galaxy;
pub mod news;
pub mod notify;
pub mod persistence;
pub mod scheduler;
pub mod turns;
