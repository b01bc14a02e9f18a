//! Galaxy snapshot
//!
//! The host owns the star map; the engine borrows it for the length of one
//! pass and mutates control percentages and company rosters in place.

pub mod control;
pub mod map;
pub mod system;

pub use control::{ControlChange, ControlListener, LoggingListener};
pub use map::StarMap;
pub use system::{Company, FactionControl, StarSystem};
