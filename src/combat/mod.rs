//! Damage formulas and action resolution.

pub mod damage;
pub mod resolve;
pub mod types;

pub use damage::*;
pub use resolve::*;
pub use types::*;
