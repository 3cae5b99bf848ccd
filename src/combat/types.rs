use serde::Serialize;

/// One landed hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hit {
    /// Slot of the target within its side
    pub target: usize,
    pub damage: u32,
    /// The hit took the target from positive HP to 0
    pub killed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SkillOutcome {
    /// Actor's level is below the skill's requirement
    Locked,
    NotEnoughMp,
    Used {
        hits: Vec<Hit>,
        /// HP the caster recovered through lifesteal
        healed: u32,
    },
}

impl SkillOutcome {
    pub fn total_damage(&self) -> u32 {
        match self {
            SkillOutcome::Used { hits, .. } => hits.iter().map(|h| h.damage).sum(),
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ItemOutcome {
    /// None left in the inventory
    Depleted,
    /// Unknown id or an item with no battle use
    NotUsable,
    TargetDown,
    Used { hp: u32, mp: u32 },
}

impl ItemOutcome {
    /// Whether a unit was taken from the inventory.
    pub fn consumed(&self) -> bool {
        matches!(self, ItemOutcome::Used { .. })
    }
}
