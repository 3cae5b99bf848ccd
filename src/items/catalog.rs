use super::types::{ItemDef, ItemKind};
use crate::combatant::Job;

pub const POTION: &str = "Potion";
pub const HI_POTION: &str = "Hi-Potion";
pub const ETHER: &str = "Ether";

const fn weapon(
    id: &'static str,
    job: Job,
    attack_bonus: u32,
    magic_bonus: u32,
    price: u32,
    description: &'static str,
) -> ItemDef {
    ItemDef {
        id,
        name: id,
        kind: ItemKind::Weapon {
            job,
            attack_bonus,
            magic_bonus,
        },
        price,
        description,
    }
}

pub const ITEMS: &[ItemDef] = &[
    ItemDef {
        id: POTION,
        name: "Potion",
        kind: ItemKind::Consumable {
            hp_restore: 50,
            mp_restore: 0,
        },
        price: 30,
        description: "Restores 50 HP.",
    },
    ItemDef {
        id: HI_POTION,
        name: "Hi-Potion",
        kind: ItemKind::Consumable {
            hp_restore: 100,
            mp_restore: 0,
        },
        price: 90,
        description: "Restores 100 HP.",
    },
    ItemDef {
        id: ETHER,
        name: "Ether",
        kind: ItemKind::Consumable {
            hp_restore: 0,
            mp_restore: 30,
        },
        price: 60,
        description: "Restores 30 MP.",
    },
    weapon("Bronze Sword", Job::Hero, 0, 0, 0, "A basic bronze blade for beginners."),
    weapon("Iron Sword", Job::Hero, 5, 0, 150, "A sturdy iron sword with decent edge."),
    weapon("Steel Sword", Job::Hero, 10, 0, 400, "Forged from fine steel, sharp and deadly."),
    weapon("Bronze Axe", Job::Warrior, 0, 0, 0, "A crude bronze axe for training."),
    weapon("Iron Axe", Job::Warrior, 6, 0, 160, "A heavy iron axe that cleaves through foes."),
    weapon("Steel Axe", Job::Warrior, 12, 0, 450, "Massive steel axe with devastating power."),
    weapon("Wooden Staff", Job::Mage, 0, 2, 0, "A simple wooden staff for novice mages."),
    weapon("Silver Staff", Job::Mage, 4, 5, 140, "Silver-tipped staff that channels magic well."),
    weapon("Mystic Staff", Job::Mage, 9, 10, 380, "An ancient staff pulsing with arcane power."),
];

pub fn item_def(id: &str) -> Option<&'static ItemDef> {
    ITEMS.iter().find(|item| item.id == id)
}

/// Display name for an item id; unknown ids are shown as-is.
pub fn item_name(id: &str) -> &str {
    item_def(id).map_or(id, |item| item.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_ids_unique() {
        for (i, a) in ITEMS.iter().enumerate() {
            for b in &ITEMS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_lookup() {
        let potion = item_def(POTION).unwrap();
        assert!(potion.is_consumable());
        assert_eq!(
            potion.kind,
            ItemKind::Consumable {
                hp_restore: 50,
                mp_restore: 0
            }
        );
        assert_eq!(item_def("Wooden Staff").unwrap().weapon_bonus(), (0, 2));
        assert!(item_def("Excalibur").is_none());
        assert_eq!(item_name("Excalibur"), "Excalibur");
    }
}
