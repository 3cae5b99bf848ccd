//! Fixed decision policy used to play simulated battles.

use crate::battle::{BattleAction, BattleSession};
use crate::collaborators::Inventory;
use crate::combat::first_living;
use crate::combatant::Combatant;
use crate::core::constants::AUTOPILOT_HEAL_THRESHOLD;
use crate::items::POTION;
use crate::skills::{skills_for_job, Skill, TargetMode};

/// Picks the current actor's move.
///
/// 1. A Potion on the most hurt living ally below 30% HP, if one is owned.
/// 2. The unlocked, affordable damage skill with the highest total multiplier.
/// 3. A plain attack on the first living enemy.
pub fn choose_action(session: &BattleSession, inventory: &impl Inventory) -> BattleAction {
    if inventory.has_item(POTION) > 0 {
        if let Some(target) = most_hurt_ally(&session.party) {
            return BattleAction::Item {
                item_id: POTION.to_string(),
                target,
            };
        }
    }

    let target = first_living(&session.enemies).unwrap_or(0);
    let living_enemies = session.enemies.iter().filter(|e| e.is_alive()).count();

    match strongest_skill(session.actor(), living_enemies) {
        Some(skill) => BattleAction::Skill {
            name: skill.name.to_string(),
            target,
        },
        None => BattleAction::Attack { target },
    }
}

fn most_hurt_ally(party: &[Combatant]) -> Option<usize> {
    party
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_alive() && m.hp_ratio() < AUTOPILOT_HEAL_THRESHOLD)
        .min_by(|(_, a), (_, b)| a.hp_ratio().total_cmp(&b.hp_ratio()))
        .map(|(i, _)| i)
}

/// Damage multiplier summed over every strike the skill would land.
fn skill_weight(skill: &Skill, living_enemies: usize) -> f64 {
    match skill.target {
        TargetMode::Single => skill.mult * skill.hits.max(1) as f64,
        TargetMode::All => skill.mult * living_enemies as f64,
    }
}

fn strongest_skill(actor: &Combatant, living_enemies: usize) -> Option<&'static Skill> {
    skills_for_job(actor.job)
        .into_iter()
        .filter(|s| !s.is_status_only() && s.is_unlocked(actor) && s.can_afford(actor))
        .max_by(|a, b| {
            skill_weight(a, living_enemies).total_cmp(&skill_weight(b, living_enemies))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::starting_party;
    use crate::core::config::BattleConfig;
    use crate::enemies::{create_enemy, EnemyKind};
    use crate::items::Stash;

    fn session() -> BattleSession {
        let mut session = BattleSession::new(starting_party(), BattleConfig::default()).unwrap();
        session.start_with_enemies(vec![
            create_enemy(EnemyKind::Slime, 1),
            create_enemy(EnemyKind::Bat, 1),
        ]);
        session
    }

    #[test]
    fn test_level_one_hero_attacks() {
        let session = session();
        let action = choose_action(&session, &Stash::starter());
        assert_eq!(action, BattleAction::Attack { target: 0 });
    }

    #[test]
    fn test_hurt_ally_gets_a_potion() {
        let mut session = session();
        session.party[2].hp = 10;
        session.party[1].hp = 20;

        let action = choose_action(&session, &Stash::starter());
        assert_eq!(
            action,
            BattleAction::Item {
                item_id: POTION.to_string(),
                target: 2
            }
        );
    }

    #[test]
    fn test_no_potion_means_no_heal() {
        let mut session = session();
        session.party[0].hp = 5;

        let action = choose_action(&session, &Stash::new(0));
        assert_eq!(action, BattleAction::Attack { target: 0 });
    }

    #[test]
    fn test_prefers_strongest_affordable_skill() {
        let mut session = session();
        session.party[0].level = 8;

        // Shadow Step (1.4 x 2) beats Power Slash and Shield Breaker
        let action = choose_action(&session, &Stash::new(0));
        assert_eq!(
            action,
            BattleAction::Skill {
                name: "Shadow Step".to_string(),
                target: 0
            }
        );

        session.party[0].mp = 5;
        let action = choose_action(&session, &Stash::new(0));
        assert_eq!(
            action,
            BattleAction::Skill {
                name: "Power Slash".to_string(),
                target: 0
            }
        );
    }

    #[test]
    fn test_targets_first_living_enemy() {
        let mut session = session();
        session.enemies[0].unit.hp = 0;

        let action = choose_action(&session, &Stash::new(0));
        assert_eq!(action, BattleAction::Attack { target: 1 });
    }
}
