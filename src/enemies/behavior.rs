//! Enemy AI behaviour tables.
//!
//! Every enemy acts by drawing one unit roll and taking the first move whose
//! cumulative threshold is above it. Message templates use the placeholders
//! `{enemy}`, `{target}` and `{damage}`.

use super::types::EnemyKind;
use crate::status::StatusKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveDamage {
    /// Physical formula plus a flat bonus
    Physical { bonus: u32 },
    /// Magic formula
    Magic,
    /// Pure status move
    None,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveStatus {
    pub kind: StatusKind,
    /// Applied when a unit roll lands below this; 1.0 always applies
    pub chance: f64,
    pub duration: u32,
    pub power: u32,
    /// Line emitted when the status lands, `None` for silent application
    pub text: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyMove {
    /// Cumulative upper bound of the selection roll
    pub until: f64,
    pub text: &'static str,
    pub damage: MoveDamage,
    pub status: Option<MoveStatus>,
    /// Fraction of damage dealt healed back to the attacker
    pub drain: f64,
}

const fn strike(until: f64, text: &'static str) -> EnemyMove {
    EnemyMove {
        until,
        text,
        damage: MoveDamage::Physical { bonus: 0 },
        status: None,
        drain: 0.0,
    }
}

const fn afflict(
    kind: StatusKind,
    chance: f64,
    duration: u32,
    power: u32,
    text: &'static str,
) -> Option<MoveStatus> {
    Some(MoveStatus {
        kind,
        chance,
        duration,
        power,
        text: Some(text),
    })
}

const SLIME: &[EnemyMove] = &[strike(1.0, "{enemy} slaps {target} for {damage} damage!")];

const BAT: &[EnemyMove] = &[
    EnemyMove {
        status: afflict(StatusKind::Poison, 0.60, 3, 2, "{target} is afflicted with poison!"),
        ..strike(0.30, "{enemy} sinks its fangs into {target} for {damage} damage!")
    },
    strike(1.0, "{enemy} bites {target} for {damage} damage!"),
];

const CULTIST: &[EnemyMove] = &[
    EnemyMove {
        status: afflict(StatusKind::Bleed, 0.70, 3, 3, "{target} starts bleeding!"),
        ..strike(0.35, "{enemy} casts a blood hex on {target} for {damage} damage!")
    },
    // Two rounds so the bind survives the party tick at the end of this phase
    EnemyMove {
        damage: MoveDamage::None,
        status: Some(MoveStatus {
            kind: StatusKind::Stun,
            chance: 1.0,
            duration: 2,
            power: 0,
            text: None,
        }),
        ..strike(0.60, "{enemy} binds {target} in shadowy chains!")
    },
    EnemyMove {
        damage: MoveDamage::Physical { bonus: 1 },
        ..strike(1.0, "{enemy} strikes {target} for {damage} damage!")
    },
];

const GHOUL: &[EnemyMove] = &[
    EnemyMove {
        status: afflict(StatusKind::Bleed, 0.50, 3, 2, "{target} starts bleeding!"),
        ..strike(0.25, "{enemy} rakes {target} with rotten claws for {damage} damage!")
    },
    strike(1.0, "{enemy} claws {target} for {damage} damage!"),
];

const VAMPIRE_THRALL: &[EnemyMove] = &[
    EnemyMove {
        drain: 0.5,
        ..strike(0.30, "{enemy} drinks from {target} for {damage} damage!")
    },
    strike(1.0, "{enemy} slashes {target} for {damage} damage!"),
];

const SHADOW_FIEND: &[EnemyMove] = &[
    EnemyMove {
        damage: MoveDamage::Magic,
        status: afflict(StatusKind::Curse, 0.40, 2, 0, "{target} is cursed!"),
        ..strike(0.40, "{enemy} hurls a shadow bolt at {target} for {damage} damage!")
    },
    strike(1.0, "{enemy} scratches {target} for {damage} damage!"),
];

const UNKNOWN: &[EnemyMove] = &[strike(1.0, "{enemy} swings at {target} for {damage} damage!")];

pub fn behavior_table(kind: EnemyKind) -> &'static [EnemyMove] {
    match kind {
        EnemyKind::Slime => SLIME,
        EnemyKind::Bat => BAT,
        EnemyKind::Cultist => CULTIST,
        EnemyKind::Ghoul => GHOUL,
        EnemyKind::VampireThrall => VAMPIRE_THRALL,
        EnemyKind::ShadowFiend => SHADOW_FIEND,
        EnemyKind::Unknown => UNKNOWN,
    }
}

/// Move picked by a selection roll in `[0, 1)`.
pub fn choose_move(kind: EnemyKind, roll: f64) -> &'static EnemyMove {
    let table = behavior_table(kind);
    table
        .iter()
        .find(|m| roll < m.until)
        .unwrap_or(&table[table.len() - 1])
}

/// Fills a move template.
pub fn render_move_text(template: &str, enemy: &str, target: &str, damage: u32) -> String {
    template
        .replace("{enemy}", enemy)
        .replace("{target}", target)
        .replace("{damage}", &damage.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_end_at_one() {
        for kind in EnemyKind::SPAWNABLE.iter().chain([EnemyKind::Unknown].iter()) {
            let table = behavior_table(*kind);
            assert!(!table.is_empty());
            assert_eq!(table[table.len() - 1].until, 1.0, "{kind:?}");
            for pair in table.windows(2) {
                assert!(pair[0].until < pair[1].until, "{kind:?} thresholds must increase");
            }
        }
    }

    #[test]
    fn test_cultist_move_selection() {
        let hex = choose_move(EnemyKind::Cultist, 0.10);
        assert_eq!(hex.status.map(|s| s.kind), Some(StatusKind::Bleed));

        let bind = choose_move(EnemyKind::Cultist, 0.35);
        assert_eq!(bind.damage, MoveDamage::None);
        assert_eq!(bind.status.map(|s| s.kind), Some(StatusKind::Stun));

        let strike = choose_move(EnemyKind::Cultist, 0.99);
        assert_eq!(strike.damage, MoveDamage::Physical { bonus: 1 });
    }

    #[test]
    fn test_render_move_text() {
        let text = render_move_text(
            "{enemy} slaps {target} for {damage} damage!",
            "Slime",
            "Hero",
            7,
        );
        assert_eq!(text, "Slime slaps Hero for 7 damage!");
    }
}
