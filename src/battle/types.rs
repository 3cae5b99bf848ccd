use serde::{Deserialize, Serialize};

/// How a battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    /// Every enemy fell
    Hero,
    /// The whole party fell
    Enemy,
    /// A Run command succeeded
    Escape,
}

/// Where the turn controller is waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleState {
    /// Current actor picks a top-level command
    PlayerChoice,
    /// Picking an enemy for Attack, Magic or a single-target skill
    TargetSelect,
    SkillMenu,
    ItemMenu,
    /// Picking an ally for the chosen item
    ItemTarget,
    /// Every living member has acted; enemies move next
    EnemyTurn,
    End(Winner),
}

impl BattleState {
    /// States in which the current actor can still choose what to do.
    pub fn awaits_player(&self) -> bool {
        matches!(
            self,
            BattleState::PlayerChoice
                | BattleState::TargetSelect
                | BattleState::SkillMenu
                | BattleState::ItemMenu
                | BattleState::ItemTarget
        )
    }
}

/// A fully specified party action. Enemy targets index the enemy group;
/// item targets index the party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleAction {
    Attack { target: usize },
    Magic { target: usize },
    Skill { name: String, target: usize },
    Item { item_id: String, target: usize },
    Defend,
    Run,
}

/// XP result for one surviving member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpAward {
    pub name: String,
    /// Slot in the party
    pub index: usize,
    pub xp: u32,
    pub level_before: u32,
    pub level_after: u32,
    pub score: u64,
    pub xp_before: u32,
    pub xp_to_next_before: u32,
}

impl XpAward {
    pub fn leveled_up(&self) -> bool {
        self.level_after > self.level_before
    }
}

/// Everything a victory paid out, for the results screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSnapshot {
    pub xp: u32,
    pub gold: u32,
    /// (item id, quantity) in first-drop order
    pub items: Vec<(String, u32)>,
    /// MVP first
    pub awards: Vec<XpAward>,
}
