//! Spawning enemies and encounter groups.

use super::types::{Enemy, EnemyBlueprint, EnemyKind, LootDrop};
use crate::combatant::{Combatant, Job};
use crate::core::constants::{ENEMY_ATTACK_PER_LEVEL, ENEMY_HP_PER_LEVEL};
use crate::core::dice::Dice;
use crate::items::POTION;

/// Spawn table. The first entry is the fallback when nothing else qualifies.
pub const ENEMY_BLUEPRINTS: [EnemyBlueprint; 6] = [
    EnemyBlueprint { kind: EnemyKind::Slime, min_level: 1, weight: 40 },
    EnemyBlueprint { kind: EnemyKind::Bat, min_level: 2, weight: 30 },
    EnemyBlueprint { kind: EnemyKind::Cultist, min_level: 3, weight: 25 },
    EnemyBlueprint { kind: EnemyKind::Ghoul, min_level: 4, weight: 20 },
    EnemyBlueprint { kind: EnemyKind::VampireThrall, min_level: 6, weight: 15 },
    EnemyBlueprint { kind: EnemyKind::ShadowFiend, min_level: 8, weight: 10 },
];

/// Unscaled stat block: (max_hp, max_mp, attack, magic, defense, speed).
fn base_stats(kind: EnemyKind) -> (u32, u32, u32, u32, u32, u32) {
    match kind {
        EnemyKind::Slime => (35, 0, 8, 0, 2, 5),
        EnemyKind::Bat => (25, 0, 9, 0, 1, 14),
        EnemyKind::Cultist => (45, 10, 11, 0, 3, 8),
        EnemyKind::Ghoul => (60, 0, 12, 0, 3, 7),
        EnemyKind::VampireThrall => (55, 5, 14, 5, 4, 12),
        EnemyKind::ShadowFiend => (40, 15, 9, 16, 2, 13),
        EnemyKind::Unknown => (30, 0, 7, 0, 2, 5),
    }
}

/// (xp_value, gold_min, gold_max, potion drop chance)
fn bounty(kind: EnemyKind) -> (u32, u32, u32, f64) {
    match kind {
        EnemyKind::Slime => (10, 3, 6, 0.20),
        EnemyKind::Bat => (14, 5, 9, 0.10),
        EnemyKind::Cultist => (20, 8, 15, 0.25),
        EnemyKind::Ghoul => (28, 10, 20, 0.15),
        EnemyKind::VampireThrall => (35, 15, 25, 0.30),
        EnemyKind::ShadowFiend => (40, 20, 30, 0.35),
        EnemyKind::Unknown => (8, 3, 6, 0.0),
    }
}

/// Builds one enemy, scaled to the party's reference level.
///
/// Each level above 1 adds 5 max HP and 1 attack; every second level adds
/// 1 defense.
pub fn create_enemy(kind: EnemyKind, reference_level: u32) -> Enemy {
    let (max_hp, max_mp, attack, magic, defense, speed) = base_stats(kind);
    let (xp_value, gold_min, gold_max, potion_chance) = bounty(kind);

    let mut unit = Combatant::new(
        kind.name(),
        Job::Monster(kind),
        max_hp,
        max_mp,
        attack,
        magic,
        defense,
        speed,
    );

    let scale = reference_level.saturating_sub(1);
    if scale > 0 {
        unit.max_hp += ENEMY_HP_PER_LEVEL * scale;
        unit.hp = unit.max_hp;
        unit.attack += ENEMY_ATTACK_PER_LEVEL * scale;
        unit.defense += scale / 2;
    }

    let drops = if potion_chance > 0.0 {
        vec![LootDrop {
            item_id: POTION,
            chance: potion_chance,
        }]
    } else {
        Vec::new()
    };

    Enemy {
        kind,
        unit,
        xp_value,
        gold_min,
        gold_max,
        drops,
    }
}

/// Builds an enemy from its display name; unknown names spawn the fallback.
pub fn create_enemy_named(name: &str, reference_level: u32) -> Enemy {
    create_enemy(EnemyKind::from_name(name), reference_level)
}

/// Blueprints allowed at `reference_level`, never empty.
pub fn eligible_blueprints(reference_level: u32) -> Vec<&'static EnemyBlueprint> {
    let eligible: Vec<&'static EnemyBlueprint> = ENEMY_BLUEPRINTS
        .iter()
        .filter(|bp| bp.min_level <= reference_level)
        .collect();
    if eligible.is_empty() {
        vec![&ENEMY_BLUEPRINTS[0]]
    } else {
        eligible
    }
}

/// Rolls a fresh encounter of 1..=`max_group_size` enemies.
pub fn pick_enemy_group(
    reference_level: u32,
    max_group_size: usize,
    dice: &mut impl Dice,
) -> Vec<Enemy> {
    let max_group_size = max_group_size.max(1) as i32;
    let group_size = dice.roll_range(1, max_group_size) as usize;

    let candidates = eligible_blueprints(reference_level);
    let weights: Vec<u32> = candidates.iter().map(|bp| bp.weight).collect();

    (0..group_size)
        .map(|_| {
            let blueprint = candidates[dice.pick_weighted(&weights)];
            create_enemy(blueprint.kind, reference_level)
        })
        .collect()
}
