//! Turn records and the continuation state machine

pub mod history;
pub mod record;
pub mod state;

pub use history::TurnHistory;
pub use record::{LastAction, TurnRecord};
pub use state::TurnState;
