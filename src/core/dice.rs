//! Random source used by every battle rule.
//!
//! Rules never touch a concrete generator. They ask a [`Dice`] for the few
//! kinds of rolls the game needs, which lets a seeded `ChaCha8Rng` drive
//! simulations and a [`FixedDice`] script exact scenarios in tests.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use std::collections::VecDeque;

/// The rolls a battle can ask for.
pub trait Dice {
    /// Integer in `[low, high]` inclusive. Returns `low` when the range is empty.
    fn roll_range(&mut self, low: i32, high: i32) -> i32;

    /// Float in `[0, 1)`.
    fn roll_unit(&mut self) -> f64;

    /// Uniform index into a slice of `len` elements (`len` must be > 0).
    fn pick_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.roll_range(0, len as i32 - 1) as usize
    }

    /// Index chosen proportionally to `weights`. Falls back to 0 when every
    /// weight is zero or the slice is empty.
    fn pick_weighted(&mut self, weights: &[u32]) -> usize;
}

impl<R: Rng + ?Sized> Dice for R {
    fn roll_range(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.gen_range(low..=high)
    }

    fn roll_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn pick_weighted(&mut self, weights: &[u32]) -> usize {
        match WeightedIndex::new(weights) {
            Ok(dist) => dist.sample(self),
            Err(_) => 0,
        }
    }
}

/// Scripted dice: queued rolls are consumed in order, then the fallbacks
/// repeat forever.
#[derive(Debug, Clone, Default)]
pub struct FixedDice {
    ranges: VecDeque<i32>,
    units: VecDeque<f64>,
    fallback_range: i32,
    fallback_unit: f64,
}

impl FixedDice {
    /// Every range roll is 0 (clamped) and every unit roll is 0.0.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ranges(mut self, rolls: impl IntoIterator<Item = i32>) -> Self {
        self.ranges.extend(rolls);
        self
    }

    pub fn with_units(mut self, rolls: impl IntoIterator<Item = f64>) -> Self {
        self.units.extend(rolls);
        self
    }

    pub fn fallback_range(mut self, roll: i32) -> Self {
        self.fallback_range = roll;
        self
    }

    pub fn fallback_unit(mut self, roll: f64) -> Self {
        self.fallback_unit = roll;
        self
    }

    /// Rolls still queued (range, unit).
    pub fn remaining(&self) -> (usize, usize) {
        (self.ranges.len(), self.units.len())
    }
}

impl Dice for FixedDice {
    fn roll_range(&mut self, low: i32, high: i32) -> i32 {
        let roll = self.ranges.pop_front().unwrap_or(self.fallback_range);
        if high <= low {
            return low;
        }
        roll.clamp(low, high)
    }

    fn roll_unit(&mut self) -> f64 {
        self.units.pop_front().unwrap_or(self.fallback_unit)
    }

    fn pick_weighted(&mut self, weights: &[u32]) -> usize {
        let total: u64 = weights.iter().map(|&w| w as u64).sum();
        if total == 0 {
            return 0;
        }
        let target = self.roll_unit() * total as f64;
        let mut cumulative = 0.0;
        for (i, &w) in weights.iter().enumerate() {
            cumulative += w as f64;
            if target < cumulative {
                return i;
            }
        }
        weights.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_rng_roll_range_stays_inclusive() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen_low = false;
        let mut seen_high = false;
        for _ in 0..500 {
            let roll = rng.roll_range(-2, 2);
            assert!((-2..=2).contains(&roll));
            seen_low |= roll == -2;
            seen_high |= roll == 2;
        }
        assert!(seen_low && seen_high, "both bounds should appear in 500 rolls");
    }

    #[test]
    fn test_rng_pick_weighted_skips_zero_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            assert_eq!(rng.pick_weighted(&[0, 5, 0]), 1);
        }
        assert_eq!(rng.pick_weighted(&[0, 0]), 0);
    }

    #[test]
    fn test_fixed_dice_consumes_queue_then_falls_back() {
        let mut dice = FixedDice::new()
            .with_ranges([2, -5])
            .with_units([0.9])
            .fallback_unit(0.25);

        assert_eq!(dice.roll_range(-2, 2), 2);
        assert_eq!(dice.roll_range(-2, 2), -2, "queued roll is clamped");
        assert_eq!(dice.roll_range(-2, 2), 0);
        assert_eq!(dice.roll_unit(), 0.9);
        assert_eq!(dice.roll_unit(), 0.25);
        assert_eq!(dice.remaining(), (0, 0));
    }

    #[test]
    fn test_fixed_dice_weighted_pick_follows_unit_roll() {
        let mut dice = FixedDice::new().with_units([0.0, 0.5, 0.99]);
        assert_eq!(dice.pick_weighted(&[40, 30, 30]), 0);
        assert_eq!(dice.pick_weighted(&[40, 30, 30]), 1);
        assert_eq!(dice.pick_weighted(&[40, 30, 30]), 2);
    }

    #[test]
    fn test_pick_index_single_element() {
        let mut dice = FixedDice::new().fallback_range(5);
        assert_eq!(dice.pick_index(1), 0);
        assert_eq!(dice.pick_index(3), 2);
    }
}
