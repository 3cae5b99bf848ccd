use crate::combatant::Combatant;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Slime,
    Bat,
    Cultist,
    Ghoul,
    VampireThrall,
    ShadowFiend,
    /// Fallback for names the catalog does not know
    Unknown,
}

impl EnemyKind {
    pub const SPAWNABLE: [EnemyKind; 6] = [
        EnemyKind::Slime,
        EnemyKind::Bat,
        EnemyKind::Cultist,
        EnemyKind::Ghoul,
        EnemyKind::VampireThrall,
        EnemyKind::ShadowFiend,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Slime => "Slime",
            EnemyKind::Bat => "Bat",
            EnemyKind::Cultist => "Cultist",
            EnemyKind::Ghoul => "Ghoul",
            EnemyKind::VampireThrall => "Vampire Thrall",
            EnemyKind::ShadowFiend => "Shadow Fiend",
            EnemyKind::Unknown => "Unknown",
        }
    }

    /// Unrecognised names map to `Unknown`.
    pub fn from_name(name: &str) -> EnemyKind {
        Self::SPAWNABLE
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .unwrap_or(EnemyKind::Unknown)
    }
}

/// Spawn-table entry: which kind may appear, from which level, how often.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyBlueprint {
    pub kind: EnemyKind,
    pub min_level: u32,
    pub weight: u32,
}

/// One entry of an enemy's loot table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LootDrop {
    pub item_id: &'static str,
    pub chance: f64,
}

/// A spawned enemy: its combat stats plus what it is worth when defeated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub unit: Combatant,
    pub xp_value: u32,
    pub gold_min: u32,
    pub gold_max: u32,
    pub drops: Vec<LootDrop>,
}

impl Enemy {
    pub fn name(&self) -> &str {
        &self.unit.name
    }

    pub fn is_alive(&self) -> bool {
        self.unit.is_alive()
    }
}
