//! Gold, item and XP payouts for a defeated group.

use super::types::Enemy;
use crate::core::dice::Dice;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupRewards {
    pub xp: u32,
    pub gold: u32,
    /// Item ids in drop order; repeats mean multiple units
    pub items: Vec<&'static str>,
}

/// Rolls one enemy's gold within its range.
pub fn roll_gold(enemy: &Enemy, dice: &mut impl Dice) -> u32 {
    let gold_max = enemy.gold_max.max(enemy.gold_min);
    dice.roll_range(enemy.gold_min as i32, gold_max as i32).max(0) as u32
}

/// Each loot entry is rolled independently against its drop chance.
pub fn roll_drops(enemy: &Enemy, dice: &mut impl Dice) -> Vec<&'static str> {
    enemy
        .drops
        .iter()
        .filter(|drop| dice.roll_unit() <= drop.chance)
        .map(|drop| drop.item_id)
        .collect()
}

/// Sums XP, rolls gold and loot for every enemy in the group.
pub fn grant_rewards_for_group(group: &[Enemy], dice: &mut impl Dice) -> GroupRewards {
    let mut rewards = GroupRewards::default();
    for enemy in group {
        rewards.xp += enemy.xp_value;
        rewards.gold += roll_gold(enemy, dice);
        rewards.items.extend(roll_drops(enemy, dice));
    }
    rewards
}

/// Collapses a drop list into `(item, count)` pairs in first-drop order.
pub fn count_items(items: &[&'static str]) -> Vec<(String, u32)> {
    let mut counts: Vec<(String, u32)> = Vec::new();
    for &item in items {
        match counts.iter_mut().find(|(id, _)| id == item) {
            Some((_, qty)) => *qty += 1,
            None => counts.push((item.to_string(), 1)),
        }
    }
    counts
}
