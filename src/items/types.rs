use crate::combatant::Job;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Usable in battle on a living ally
    Consumable { hp_restore: u32, mp_restore: u32 },
    /// Equippable; adds its bonuses to the wielder's stats
    Weapon {
        job: Job,
        attack_bonus: u32,
        magic_bonus: u32,
    },
}

/// Static description of an item. Inventories refer to items by `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemDef {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: ItemKind,
    pub price: u32,
    pub description: &'static str,
}

impl ItemDef {
    pub fn is_consumable(&self) -> bool {
        matches!(self.kind, ItemKind::Consumable { .. })
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon { .. })
    }

    /// (attack, magic) bonus granted while equipped. Zero for non-weapons.
    pub fn weapon_bonus(&self) -> (u32, u32) {
        match self.kind {
            ItemKind::Weapon {
                attack_bonus,
                magic_bonus,
                ..
            } => (attack_bonus, magic_bonus),
            ItemKind::Consumable { .. } => (0, 0),
        }
    }
}
