//! Batch battle simulator for balance checks.
//!
//! Plays a run of consecutive encounters with a fixed autopilot policy,
//! carrying levels, XP and loot from battle to battle, and summarizes the
//! outcomes.

pub mod autopilot;
pub mod config;
pub mod report;
pub mod runner;

pub use autopilot::choose_action;
pub use config::SimConfig;
pub use report::{BattleRecord, MemberSummary, SimReport};
pub use runner::run_simulation;
