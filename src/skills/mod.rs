//! Skill catalog: static skill records and per-job lookup.

pub mod catalog;
pub mod types;

pub use catalog::*;
pub use types::*;
