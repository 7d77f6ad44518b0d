#![allow(ambiguous_glob_reexports)]

pub mod bet;
pub mod bet_directly;
pub mod bet_return;
pub mod close_bet;
pub mod deposit;
pub mod initialize;
pub mod register;
pub mod set_executer;
pub mod update_allowed_amounts;
pub mod update_core_state;
pub mod withdraw;

pub use bet::*;
pub use bet_directly::*;
pub use bet_return::*;
pub use close_bet::*;
pub use deposit::*;
pub use initialize::*;
pub use register::*;
pub use set_executer::*;
pub use update_allowed_amounts::*;
pub use update_core_state::*;
pub use withdraw::*;
