//! Experience and level-ups.

use super::types::{Combatant, Job};
use crate::core::constants::{HERO_LEVEL_GROWTH, XP_TO_NEXT_INCREMENT};

impl Combatant {
    /// Adds `amount` XP and resolves every level-up it pays for.
    ///
    /// Each level costs the current `xp_to_next`, after which the threshold
    /// grows by a fixed increment. Heroes also gain stats. Any level-up fully
    /// restores HP and MP. Returns true if at least one level was gained.
    pub fn grant_xp(&mut self, amount: u32) -> bool {
        self.xp = self.xp.saturating_add(amount);
        if self.xp_to_next == 0 {
            self.xp_to_next = XP_TO_NEXT_INCREMENT;
        }

        let mut leveled_up = false;
        while self.xp >= self.xp_to_next {
            self.xp -= self.xp_to_next;
            self.level += 1;
            self.xp_to_next += XP_TO_NEXT_INCREMENT;

            if self.job == Job::Hero {
                let (hp, mp, attack, magic, defense) = HERO_LEVEL_GROWTH;
                self.max_hp += hp;
                self.max_mp += mp;
                self.attack += attack;
                self.magic += magic;
                self.defense += defense;
            }

            self.hp = self.max_hp;
            self.mp = self.max_mp;
            leveled_up = true;
        }

        leveled_up
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> Combatant {
        Combatant::new("Hero", Job::Hero, 100, 30, 12, 8, 5, 10)
    }

    fn mage() -> Combatant {
        Combatant::new("Mage", Job::Mage, 70, 40, 8, 14, 3, 11)
    }

    #[test]
    fn test_grant_xp_below_threshold() {
        let mut h = hero();
        assert!(!h.grant_xp(9));
        assert_eq!(h.level, 1);
        assert_eq!(h.xp, 9);
        assert_eq!(h.xp_to_next, 10);
    }

    #[test]
    fn test_hero_level_up_grows_stats_and_restores() {
        let mut h = hero();
        h.hp = 10;
        h.mp = 0;

        assert!(h.grant_xp(12));

        assert_eq!(h.level, 2);
        assert_eq!(h.xp, 2);
        assert_eq!(h.xp_to_next, 20);
        assert_eq!(h.max_hp, 110);
        assert_eq!(h.max_mp, 33);
        assert_eq!(h.attack, 16);
        assert_eq!(h.magic, 11);
        assert_eq!(h.defense, 7);
        assert_eq!(h.hp, 110);
        assert_eq!(h.mp, 33);
    }

    #[test]
    fn test_non_hero_levels_without_stat_growth() {
        let mut m = mage();
        m.hp = 5;
        assert!(m.grant_xp(10));
        assert_eq!(m.level, 2);
        assert_eq!(m.max_hp, 70);
        assert_eq!(m.magic, 14);
        assert_eq!(m.hp, 70, "level-up still restores HP");
    }

    #[test]
    fn test_multiple_levels_in_one_grant() {
        let mut m = mage();
        // 10 + 20 + 30 = 60 buys three levels
        assert!(m.grant_xp(65));
        assert_eq!(m.level, 4);
        assert_eq!(m.xp, 5);
        assert_eq!(m.xp_to_next, 40);
    }

    #[test]
    fn test_split_grants_match_single_grant() {
        for total in [0u32, 1, 9, 10, 59, 60, 61, 250, 1000, 5432] {
            let mut once = hero();
            once.grant_xp(total);

            let mut split = hero();
            let mut remaining = total;
            let mut step = 1;
            while remaining > 0 {
                let chunk = step.min(remaining);
                split.grant_xp(chunk);
                remaining -= chunk;
                step = step * 2 + 1;
            }

            assert_eq!(
                (once.level, once.xp, once.xp_to_next),
                (split.level, split.xp, split.xp_to_next),
                "total {total}"
            );
            assert!(once.xp < once.xp_to_next);
        }
    }
}
