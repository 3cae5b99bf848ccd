use super::catalog::{item_def, item_name};
use crate::collaborators::Inventory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The party's shared items and gold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stash {
    pub gold: u32,
    pub items: BTreeMap<String, u32>,
}

impl Stash {
    pub fn new(gold: u32) -> Self {
        Self {
            gold,
            items: BTreeMap::new(),
        }
    }

    /// Three Potions and 100 gold.
    pub fn starter() -> Self {
        let mut stash = Self::new(100);
        stash.add_item(super::catalog::POTION, 3);
        stash
    }

    pub fn with_item(mut self, id: &str, qty: u32) -> Self {
        self.add_item(id, qty);
        self
    }

    /// Owned consumables usable in battle, sorted by display name.
    pub fn battle_items(&self) -> Vec<(&str, u32)> {
        let mut items: Vec<(&str, u32)> = self
            .items
            .iter()
            .filter(|(id, &qty)| qty > 0 && item_def(id.as_str()).is_some_and(|def| def.is_consumable()))
            .map(|(id, &qty)| (id.as_str(), qty))
            .collect();
        items.sort_by_key(|(id, _)| item_name(id).to_string());
        items
    }
}

impl Inventory for Stash {
    fn has_item(&self, id: &str) -> u32 {
        self.items.get(id).copied().unwrap_or(0)
    }

    fn consume_item(&mut self, id: &str, qty: u32) -> bool {
        let current = self.has_item(id);
        if current < qty {
            return false;
        }
        if current == qty {
            self.items.remove(id);
        } else {
            self.items.insert(id.to_string(), current - qty);
        }
        true
    }

    fn add_item(&mut self, id: &str, qty: u32) {
        if qty == 0 {
            return;
        }
        *self.items.entry(id.to_string()).or_insert(0) += qty;
    }

    fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ETHER, HI_POTION, POTION};

    #[test]
    fn test_consume_requires_enough() {
        let mut stash = Stash::new(0).with_item(POTION, 2);
        assert!(stash.consume_item(POTION, 1));
        assert_eq!(stash.has_item(POTION), 1);
        assert!(!stash.consume_item(POTION, 2));
        assert!(stash.consume_item(POTION, 1));
        assert_eq!(stash.has_item(POTION), 0);
        assert!(!stash.items.contains_key(POTION));
    }

    #[test]
    fn test_battle_items_only_lists_owned_consumables() {
        let stash = Stash::new(0)
            .with_item(POTION, 2)
            .with_item(ETHER, 1)
            .with_item("Iron Sword", 1)
            .with_item(HI_POTION, 0);

        assert_eq!(stash.battle_items(), vec![(ETHER, 1), (POTION, 2)]);
    }

    #[test]
    fn test_gold() {
        let mut stash = Stash::starter();
        assert_eq!(stash.gold, 100);
        assert_eq!(stash.has_item(POTION), 3);
        stash.add_gold(25);
        assert_eq!(stash.gold, 125);
    }
}
