use super::catalog::item_def;
use crate::combatant::Combatant;

/// Swaps the combatant's weapon, moving stat bonuses with it.
///
/// Non-weapon ids are ignored. Passing `None` unequips.
pub fn equip_weapon(combatant: &mut Combatant, new_weapon: Option<&str>) {
    let new_def = match new_weapon {
        Some(id) => match item_def(id) {
            Some(def) if def.is_weapon() => Some(def),
            _ => return,
        },
        None => None,
    };

    if combatant.weapon.as_deref() == new_weapon {
        return;
    }

    if let Some(old_def) = combatant.weapon.as_deref().and_then(item_def) {
        let (attack, magic) = old_def.weapon_bonus();
        combatant.attack = combatant.attack.saturating_sub(attack);
        combatant.magic = combatant.magic.saturating_sub(magic);
    }

    if let Some(def) = new_def {
        let (attack, magic) = def.weapon_bonus();
        combatant.attack += attack;
        combatant.magic += magic;
    }

    combatant.weapon = new_def.map(|def| def.id.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::Job;

    fn mage() -> Combatant {
        Combatant::new("Mage", Job::Mage, 70, 40, 8, 14, 3, 11)
    }

    #[test]
    fn test_equip_adds_bonus() {
        let mut m = mage();
        equip_weapon(&mut m, Some("Silver Staff"));
        assert_eq!(m.weapon.as_deref(), Some("Silver Staff"));
        assert_eq!((m.attack, m.magic), (12, 19));
    }

    #[test]
    fn test_swap_removes_old_bonus() {
        let mut m = mage();
        equip_weapon(&mut m, Some("Silver Staff"));
        equip_weapon(&mut m, Some("Mystic Staff"));
        assert_eq!((m.attack, m.magic), (17, 24));

        equip_weapon(&mut m, None);
        assert_eq!((m.attack, m.magic), (8, 14));
        assert!(m.weapon.is_none());
    }

    #[test]
    fn test_reequip_same_weapon_is_noop() {
        let mut m = mage();
        equip_weapon(&mut m, Some("Silver Staff"));
        equip_weapon(&mut m, Some("Silver Staff"));
        assert_eq!((m.attack, m.magic), (12, 19));
    }

    #[test]
    fn test_non_weapon_ignored() {
        let mut m = mage();
        equip_weapon(&mut m, Some("Silver Staff"));
        equip_weapon(&mut m, Some("Potion"));
        equip_weapon(&mut m, Some("Nonexistent"));
        assert_eq!(m.weapon.as_deref(), Some("Silver Staff"));
        assert_eq!((m.attack, m.magic), (12, 19));
    }
}
