//! Simulation configuration.

use crate::core::config::BattleConfig;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Consecutive encounters to fight
    pub battles: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Rounds after which a battle is abandoned as a stalemate
    pub max_rounds_per_battle: u32,

    /// Print one line per battle
    pub verbose: bool,

    pub battle_config: BattleConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            battles: 100,
            seed: None,
            max_rounds_per_battle: 200,
            verbose: false,
            battle_config: BattleConfig::default(),
        }
    }
}

impl SimConfig {
    /// Short seeded run for quick balance checks.
    pub fn quick(seed: u64) -> Self {
        Self {
            battles: 20,
            seed: Some(seed),
            ..Default::default()
        }
    }
}
