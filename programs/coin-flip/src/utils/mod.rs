pub mod flip;
pub mod randomness;
pub mod transfer;

pub use flip::*;
pub use randomness::*;
pub use transfer::*;
