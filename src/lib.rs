//! Skirmish - Turn-Based Party Battle Engine
//!
//! Combat rules, status effects, skills, enemy AI, loot and XP rewards for a
//! three-member party. Rendering, input and persistence stay outside the
//! crate and are reached through the traits in [`collaborators`].

pub mod battle;
pub mod collaborators;
pub mod combat;
pub mod combatant;
pub mod core;
pub mod enemies;
pub mod items;
pub mod simulator;
pub mod skills;
pub mod status;
