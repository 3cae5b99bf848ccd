use super::types::{DamageKind, Execute, Infliction, Skill, SkillUser, TargetMode};
use crate::combatant::Job;
use crate::status::StatusKind;

const fn inflict(status: StatusKind, chance: f64, duration: u32, power: u32) -> Option<Infliction> {
    Some(Infliction {
        status,
        chance,
        duration,
        power,
    })
}

/// Every learnable skill, grouped by job in unlock order.
pub const SKILLS: &[Skill] = &[
    // Hero
    Skill {
        name: "Power Slash",
        user: SkillUser::Job(Job::Hero),
        level_req: 2,
        mp_cost: 4,
        target: TargetMode::Single,
        damage: DamageKind::Physical,
        mult: 1.6,
        hits: 1,
        lifesteal: 0.0,
        execute: None,
        inflict: None,
        description: "Heavy physical strike to one foe.",
    },
    Skill {
        name: "Shield Breaker",
        user: SkillUser::Job(Job::Hero),
        level_req: 4,
        mp_cost: 5,
        target: TargetMode::Single,
        damage: DamageKind::Physical,
        mult: 1.4,
        hits: 1,
        lifesteal: 0.0,
        execute: None,
        inflict: inflict(StatusKind::Weaken, 0.7, 3, 0),
        description: "Strike that weakens the foe's attacks.",
    },
    Skill {
        name: "Shadow Step",
        user: SkillUser::Job(Job::Hero),
        level_req: 8,
        mp_cost: 6,
        target: TargetMode::Single,
        damage: DamageKind::Physical,
        mult: 1.4,
        hits: 2,
        lifesteal: 0.0,
        execute: None,
        inflict: None,
        description: "Quick precise strikes, hits twice.",
    },
    Skill {
        name: "Dragon Fang",
        user: SkillUser::Job(Job::Hero),
        level_req: 13,
        mp_cost: 9,
        target: TargetMode::Single,
        damage: DamageKind::Physical,
        mult: 2.2,
        hits: 1,
        lifesteal: 0.0,
        execute: Some(Execute {
            threshold: 0.30,
            mult: 2.0,
        }),
        inflict: None,
        description: "Ferocious finisher, stronger on weakened foes.",
    },
    // Warrior
    Skill {
        name: "Cleave",
        user: SkillUser::Job(Job::Warrior),
        level_req: 3,
        mp_cost: 4,
        target: TargetMode::All,
        damage: DamageKind::Physical,
        mult: 1.1,
        hits: 1,
        lifesteal: 0.0,
        execute: None,
        inflict: None,
        description: "Wide swing that hits all enemies.",
    },
    Skill {
        name: "Guard Stance",
        user: SkillUser::Job(Job::Warrior),
        level_req: 5,
        mp_cost: 3,
        target: TargetMode::Single,
        damage: DamageKind::Physical,
        mult: 0.0,
        hits: 0,
        lifesteal: 0.0,
        execute: None,
        inflict: None,
        description: "Focus on defense (use Defend command instead for now).",
    },
    Skill {
        name: "Blood Wave",
        user: SkillUser::Job(Job::Warrior),
        level_req: 7,
        mp_cost: 8,
        target: TargetMode::All,
        damage: DamageKind::Magic,
        mult: 1.3,
        hits: 1,
        lifesteal: 0.25,
        execute: None,
        inflict: inflict(StatusKind::Bleed, 0.9, 3, 4),
        description: "Crimson wave that bleeds all foes and restores some HP.",
    },
    Skill {
        name: "War Cry",
        user: SkillUser::Job(Job::Warrior),
        level_req: 11,
        mp_cost: 6,
        target: TargetMode::All,
        damage: DamageKind::Magic,
        mult: 0.0,
        hits: 0,
        lifesteal: 0.0,
        execute: None,
        inflict: inflict(StatusKind::Weaken, 0.8, 3, 0),
        description: "Battle roar that weakens enemies' attacks.",
    },
    // Mage
    Skill {
        name: "Soul Flame",
        user: SkillUser::Job(Job::Mage),
        level_req: 2,
        mp_cost: 5,
        target: TargetMode::Single,
        damage: DamageKind::Magic,
        mult: 1.8,
        hits: 1,
        lifesteal: 0.0,
        execute: None,
        inflict: inflict(StatusKind::Poison, 0.8, 3, 3),
        description: "Flame that burns and poisons a target.",
    },
    Skill {
        name: "Frost Lance",
        user: SkillUser::Job(Job::Mage),
        level_req: 4,
        mp_cost: 6,
        target: TargetMode::Single,
        damage: DamageKind::Magic,
        mult: 1.9,
        hits: 1,
        lifesteal: 0.0,
        execute: None,
        inflict: None,
        description: "Piercing ice strike with high damage.",
    },
    Skill {
        name: "Nightfall",
        user: SkillUser::Job(Job::Mage),
        level_req: 7,
        mp_cost: 10,
        target: TargetMode::All,
        damage: DamageKind::Magic,
        mult: 1.5,
        hits: 1,
        lifesteal: 0.0,
        execute: None,
        inflict: inflict(StatusKind::Weaken, 0.6, 3, 0),
        description: "Darkness falls, sometimes weakening all foes.",
    },
    Skill {
        name: "Crimson Eclipse",
        user: SkillUser::Job(Job::Mage),
        level_req: 12,
        mp_cost: 16,
        target: TargetMode::All,
        damage: DamageKind::Magic,
        mult: 2.1,
        hits: 1,
        lifesteal: 0.4,
        execute: None,
        inflict: inflict(StatusKind::Curse, 0.5, 3, 0),
        description: "Devastating spell that may curse and heals the caster.",
    },
];

/// Skills a job can see in its menu, locked ones included.
pub fn skills_for_job(job: Job) -> Vec<&'static Skill> {
    SKILLS.iter().filter(|skill| skill.usable_by(job)).collect()
}

pub fn find_skill(name: &str) -> Option<&'static Skill> {
    SKILLS.iter().find(|skill| skill.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::EnemyKind;

    #[test]
    fn test_each_job_has_four_skills_in_unlock_order() {
        for job in [Job::Hero, Job::Warrior, Job::Mage] {
            let skills = skills_for_job(job);
            assert_eq!(skills.len(), 4, "{job:?}");
            for pair in skills.windows(2) {
                assert!(pair[0].level_req < pair[1].level_req);
            }
        }
    }

    #[test]
    fn test_monsters_learn_nothing() {
        assert!(skills_for_job(Job::Monster(EnemyKind::Slime)).is_empty());
    }

    #[test]
    fn test_find_skill() {
        let fang = find_skill("Dragon Fang").unwrap();
        assert_eq!(fang.execute.map(|e| e.mult), Some(2.0));
        assert!(find_skill("Meteor").is_none());
    }

    #[test]
    fn test_status_only_skills() {
        assert!(find_skill("War Cry").unwrap().is_status_only());
        assert!(find_skill("Guard Stance").unwrap().is_status_only());
        assert!(!find_skill("Cleave").unwrap().is_status_only());
    }

    #[test]
    fn test_names_are_unique() {
        for (i, a) in SKILLS.iter().enumerate() {
            for b in &SKILLS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
