//! Enemy catalog: stat blocks, spawn tables, loot and AI behaviour.

pub mod behavior;
pub mod factory;
pub mod loot;
pub mod types;

pub use behavior::*;
pub use factory::*;
pub use loot::*;
pub use types::*;
