//! The player party and its command menu.

use super::types::{Combatant, Job};
use crate::items::equip_weapon;
use serde::{Deserialize, Serialize};

/// Top-level battle commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Attack,
    Magic,
    Skill,
    Item,
    Defend,
    Run,
}

const FIGHTER_COMMANDS: [Command; 6] = [
    Command::Attack,
    Command::Magic,
    Command::Skill,
    Command::Item,
    Command::Defend,
    Command::Run,
];

const CASTER_COMMANDS: [Command; 6] = [
    Command::Magic,
    Command::Attack,
    Command::Skill,
    Command::Item,
    Command::Defend,
    Command::Run,
];

/// Command list for `actor`. Casters (the Mage, or anyone whose magic
/// exceeds their attack) get Magic on top.
pub fn command_options(actor: &Combatant) -> [Command; 6] {
    if actor.job == Job::Mage || actor.magic > actor.attack {
        CASTER_COMMANDS
    } else {
        FIGHTER_COMMANDS
    }
}

/// Hero, Warrior and Mage at level 1 with their starting weapons equipped.
pub fn starting_party() -> Vec<Combatant> {
    let mut hero = Combatant::new("Hero", Job::Hero, 100, 30, 12, 8, 5, 10);
    let mut warrior = Combatant::new("Warrior", Job::Warrior, 80, 20, 15, 6, 4, 9);
    let mut mage = Combatant::new("Mage", Job::Mage, 70, 40, 8, 14, 3, 11);

    equip_weapon(&mut hero, Some("Bronze Sword"));
    equip_weapon(&mut warrior, Some("Bronze Axe"));
    equip_weapon(&mut mage, Some("Wooden Staff"));

    vec![hero, warrior, mage]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_party() {
        let party = starting_party();
        let names: Vec<&str> = party.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Hero", "Warrior", "Mage"]);

        let hero = &party[0];
        assert_eq!((hero.attack, hero.defense, hero.max_hp), (12, 5, 100));
        assert_eq!(hero.weapon.as_deref(), Some("Bronze Sword"));
        assert!(party.iter().all(|m| m.level == 1 && m.xp_to_next == 10));

        // Wooden Staff adds 2 magic
        assert_eq!(party[2].magic, 16);
    }

    #[test]
    fn test_command_order() {
        let party = starting_party();
        assert_eq!(command_options(&party[0])[0], Command::Attack);
        assert_eq!(command_options(&party[1])[0], Command::Attack);
        assert_eq!(command_options(&party[2])[0], Command::Magic);

        let mut bookish_hero = party[0].clone();
        bookish_hero.magic = 20;
        assert_eq!(command_options(&bookish_hero)[..2], [Command::Magic, Command::Attack]);
    }
}
