//! Battle sessions: the turn controller and post-victory rewards.

pub mod rewards;
pub mod session;
pub mod types;

pub use rewards::*;
pub use session::*;
pub use types::*;
