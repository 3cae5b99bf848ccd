//! Damage formulas.
//!
//! The pure forms take the variance roll as an argument; the `roll_*` forms
//! draw it from a [`Dice`].

use crate::combatant::Combatant;
use crate::core::constants::{
    CURSE_MAGIC_FACTOR, MAGIC_DAMAGE_FLOOR, MAGIC_ROLL_MAX, MAGIC_ROLL_MIN, PHYSICAL_DAMAGE_FLOOR,
    PHYSICAL_ROLL_MAX, PHYSICAL_ROLL_MIN, WEAKEN_MAGIC_FACTOR, WEAKEN_PHYSICAL_FACTOR,
};
use crate::core::dice::Dice;
use crate::status::StatusKind;

/// `attack + roll`, cut by Weaken, minus defense, halved against a defending
/// target, never below 1.
pub fn physical_damage(attacker: &Combatant, defender: &Combatant, roll: i32) -> u32 {
    let mut base = attacker.attack as i32 + roll;
    if attacker.has_status(StatusKind::Weaken) {
        base = (base as f64 * WEAKEN_PHYSICAL_FACTOR) as i32;
    }

    let mut mitigated = base - defender.defense as i32;
    if defender.defending {
        mitigated = mitigated.div_euclid(2);
    }

    mitigated.max(PHYSICAL_DAMAGE_FLOOR as i32) as u32
}

/// `magic + roll`, cut by Weaken and again by Curse, minus half the
/// defender's defense, never below 3. Defending does not reduce magic.
pub fn magic_damage(attacker: &Combatant, defender: &Combatant, roll: i32) -> u32 {
    let mut base = attacker.magic as i32 + roll;
    if attacker.has_status(StatusKind::Weaken) {
        base = (base as f64 * WEAKEN_MAGIC_FACTOR) as i32;
    }
    if attacker.has_status(StatusKind::Curse) {
        base = (base as f64 * CURSE_MAGIC_FACTOR) as i32;
    }

    let mitigated = base - (defender.defense / 2) as i32;
    mitigated.max(MAGIC_DAMAGE_FLOOR as i32) as u32
}

pub fn roll_physical(attacker: &Combatant, defender: &Combatant, dice: &mut impl Dice) -> u32 {
    let roll = dice.roll_range(PHYSICAL_ROLL_MIN, PHYSICAL_ROLL_MAX);
    physical_damage(attacker, defender, roll)
}

pub fn roll_magic(attacker: &Combatant, defender: &Combatant, dice: &mut impl Dice) -> u32 {
    let roll = dice.roll_range(MAGIC_ROLL_MIN, MAGIC_ROLL_MAX);
    magic_damage(attacker, defender, roll)
}
