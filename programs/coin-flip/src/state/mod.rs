pub mod asset_ledger;
pub mod bet_state;
pub mod core_state;

pub use asset_ledger::*;
pub use bet_state::*;
pub use core_state::*;
