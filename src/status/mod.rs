//! Timed status effects (poison, bleed, weaken, stun, curse).

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
