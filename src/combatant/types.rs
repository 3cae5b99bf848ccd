use crate::enemies::EnemyKind;
use crate::status::{Status, StatusKind};
use crate::core::constants::STARTING_XP_TO_NEXT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Job {
    Hero,
    Warrior,
    Mage,
    Monster(EnemyKind),
}

impl Job {
    pub fn name(&self) -> &'static str {
        match self {
            Job::Hero => "Hero",
            Job::Warrior => "Warrior",
            Job::Mage => "Mage",
            Job::Monster(kind) => kind.name(),
        }
    }
}

/// Per-battle performance counters. Zeroed whenever a new encounter starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleCounters {
    pub damage_dealt: u32,
    pub damage_taken: u32,
    pub kills: u32,
    pub statuses_inflicted: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub job: Job,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub attack: u32,
    pub magic: u32,
    pub defense: u32,
    pub speed: u32,
    pub defending: bool,
    pub statuses: Vec<Status>,
    /// Item id of the equipped weapon, if any
    pub weapon: Option<String>,
    pub counters: BattleCounters,
}

impl Combatant {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        job: Job,
        max_hp: u32,
        max_mp: u32,
        attack: u32,
        magic: u32,
        defense: u32,
        speed: u32,
    ) -> Self {
        Self {
            name: name.into(),
            job,
            level: 1,
            xp: 0,
            xp_to_next: STARTING_XP_TO_NEXT,
            hp: max_hp,
            max_hp,
            mp: max_mp,
            max_mp,
            attack,
            magic,
            defense,
            speed,
            defending: false,
            statuses: Vec::new(),
            weapon: None,
            counters: BattleCounters::default(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Subtracts `amount` HP (never below 0) and returns the new HP.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        self.hp = self.hp.saturating_sub(amount);
        debug_assert!(self.hp <= self.max_hp, "{} has HP above max", self.name);
        self.hp
    }

    /// Restores up to `amount` HP and returns how much was actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        debug_assert!(self.hp <= self.max_hp, "{} has HP above max", self.name);
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    /// Restores up to `amount` MP and returns how much was actually restored.
    pub fn restore_mp(&mut self, amount: u32) -> u32 {
        debug_assert!(self.mp <= self.max_mp, "{} has MP above max", self.name);
        let before = self.mp;
        self.mp = self.mp.saturating_add(amount).min(self.max_mp);
        self.mp - before
    }

    /// Pays `cost` MP if affordable.
    pub fn spend_mp(&mut self, cost: u32) -> bool {
        if self.mp < cost {
            return false;
        }
        self.mp -= cost;
        true
    }

    pub fn set_defending(&mut self, defending: bool) {
        self.defending = defending;
    }

    /// Current HP as a fraction of max HP (0.0 for a zero-HP blueprint).
    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.hp as f64 / self.max_hp as f64
    }

    pub fn has_status(&self, kind: StatusKind) -> bool {
        self.statuses.iter().any(|s| s.kind == kind)
    }

    pub fn status(&self, kind: StatusKind) -> Option<&Status> {
        self.statuses.iter().find(|s| s.kind == kind)
    }

    /// Restores HP/MP, clears statuses and the defend stance, zeroes the
    /// per-battle counters.
    pub fn reset_for_battle(&mut self) {
        self.hp = self.max_hp;
        self.mp = self.max_mp;
        self.defending = false;
        self.statuses.clear();
        self.counters = BattleCounters::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy() -> Combatant {
        Combatant::new("Dummy", Job::Warrior, 50, 20, 10, 5, 3, 7)
    }

    #[test]
    fn test_new_starts_full() {
        let c = dummy();
        assert_eq!(c.hp, 50);
        assert_eq!(c.mp, 20);
        assert_eq!(c.level, 1);
        assert_eq!(c.xp_to_next, 10);
        assert!(c.is_alive());
        assert!(c.statuses.is_empty());
    }

    #[test]
    fn test_apply_damage_clamps_at_zero() {
        let mut c = dummy();
        assert_eq!(c.apply_damage(20), 30);
        assert_eq!(c.apply_damage(500), 0);
        assert!(!c.is_alive());
    }

    #[test]
    fn test_heal_and_restore_clamp_to_max() {
        let mut c = dummy();
        c.hp = 45;
        c.mp = 2;
        assert_eq!(c.heal(50), 5);
        assert_eq!(c.hp, 50);
        assert_eq!(c.heal(10), 0);
        assert_eq!(c.restore_mp(30), 18);
        assert_eq!(c.mp, 20);
    }

    #[test]
    fn test_spend_mp_requires_enough() {
        let mut c = dummy();
        assert!(c.spend_mp(15));
        assert_eq!(c.mp, 5);
        assert!(!c.spend_mp(6));
        assert_eq!(c.mp, 5);
    }

    #[test]
    fn test_reset_for_battle() {
        let mut c = dummy();
        c.hp = 1;
        c.mp = 0;
        c.defending = true;
        c.statuses.push(Status::new(StatusKind::Poison, 2, 3));
        c.counters.kills = 4;
        c.counters.damage_dealt = 99;

        c.reset_for_battle();

        assert_eq!(c.hp, c.max_hp);
        assert_eq!(c.mp, c.max_mp);
        assert!(!c.defending);
        assert!(c.statuses.is_empty());
        assert_eq!(c.counters, BattleCounters::default());
    }

    #[test]
    fn test_hp_ratio() {
        let mut c = dummy();
        c.hp = 15;
        assert!((c.hp_ratio() - 0.3).abs() < 1e-9);
        c.max_hp = 0;
        c.hp = 0;
        assert_eq!(c.hp_ratio(), 0.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "HP above max")]
    fn test_overfull_hp_is_caught_in_debug_builds() {
        let mut c = dummy();
        c.hp = c.max_hp + 5;
        c.apply_damage(1);
    }
}
