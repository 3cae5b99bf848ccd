//! Item system: catalog, weapon equipment, and the party stash.

pub mod catalog;
pub mod equipment;
pub mod stash;
pub mod types;

pub use catalog::*;
pub use equipment::*;
pub use stash::*;
pub use types::*;
