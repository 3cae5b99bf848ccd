//! Engine plumbing shared by every battle module: tuning constants,
//! configuration, the random source and boundary errors.

pub mod config;
pub mod constants;
pub mod dice;
pub mod error;

pub use config::BattleConfig;
pub use dice::{Dice, FixedDice};
pub use error::{ConfigError, EngineError};
