use crate::combatant::{Combatant, Job};
use crate::status::StatusKind;
use serde::Serialize;

/// Who may learn a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkillUser {
    Job(Job),
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TargetMode {
    /// One enemy, hit `hits` times
    Single,
    /// Every living enemy, once each
    All,
}

/// Which base formula a skill scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DamageKind {
    Physical,
    Magic,
}

/// Bonus applied to the base damage when the target's HP ratio is at or
/// below `threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Execute {
    pub threshold: f64,
    pub mult: f64,
}

/// Status rolled once per hit (or per target for area skills).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Infliction {
    pub status: StatusKind,
    pub chance: f64,
    pub duration: u32,
    pub power: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Skill {
    pub name: &'static str,
    pub user: SkillUser,
    pub level_req: u32,
    pub mp_cost: u32,
    pub target: TargetMode,
    pub damage: DamageKind,
    /// Applied after the execute bonus; 0.0 marks a status-only skill
    pub mult: f64,
    /// Strikes per use for single-target skills
    pub hits: u32,
    /// Fraction of the total damage dealt healed back to the caster
    pub lifesteal: f64,
    pub execute: Option<Execute>,
    pub inflict: Option<Infliction>,
    pub description: &'static str,
}

impl Skill {
    pub fn usable_by(&self, job: Job) -> bool {
        match self.user {
            SkillUser::Any => true,
            SkillUser::Job(user) => user == job,
        }
    }

    pub fn is_unlocked(&self, actor: &Combatant) -> bool {
        actor.level >= self.level_req
    }

    pub fn can_afford(&self, actor: &Combatant) -> bool {
        actor.mp >= self.mp_cost
    }

    /// Deals no damage: only rolls its status, if any.
    pub fn is_status_only(&self) -> bool {
        self.mult <= 0.0
    }

    /// True when `target` is low enough to trigger the execute bonus.
    pub fn executes(&self, target: &Combatant) -> bool {
        match self.execute {
            Some(execute) if target.max_hp > 0 => target.hp_ratio() <= execute.threshold,
            _ => false,
        }
    }
}
