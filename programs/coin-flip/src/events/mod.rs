pub mod asset_events;
pub mod bet_events;
pub mod core_state_events;

pub use asset_events::*;
pub use bet_events::*;
pub use core_state_events::*;
