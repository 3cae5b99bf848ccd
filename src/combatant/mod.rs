//! Combatants: the stat container shared by party members and enemies.

pub mod party;
pub mod progression;
pub mod types;

pub use party::*;
pub use types::*;
