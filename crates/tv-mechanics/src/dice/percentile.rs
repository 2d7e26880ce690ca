//! Percentile rolls with bonus and penalty dice.
//!
//! A d100 is composed of a ones digit and a tens digit, each 0-9, with
//! `00` read as 100. Every unit of bias draws one more tens digit. Bonus
//! dice (positive bias) keep whichever tens digit gives the lowest result,
//! penalty dice (negative bias) keep the highest. The ones digit is drawn
//! once and never rerolled.

use serde::{Deserialize, Serialize};

use super::DiceSource;

/// The outcome of a percentile roll with bonus/penalty dice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiasedRoll {
    /// The final percentile result (1-100).
    pub total: u32,
    /// The fixed ones digit (0-9).
    pub ones: u32,
    /// Every tens digit drawn, base digit first (0-9 each).
    pub tens: Vec<u32>,
    /// The signed bias the roll was made with.
    pub bias: i32,
}

impl BiasedRoll {
    /// The result followed by every tens digit drawn.
    ///
    /// Always `|bias| + 2` entries long.
    pub fn dice(&self) -> Vec<u32> {
        std::iter::once(self.total)
            .chain(self.tens.iter().copied())
            .collect()
    }

    /// The tens digits drawn for the bonus/penalty dice only.
    pub fn extra_tens(&self) -> &[u32] {
        self.tens.get(1..).unwrap_or(&[])
    }
}

/// Combine a tens digit and a ones digit into a percentile value.
pub fn compose_percentile(tens: u32, ones: u32) -> u32 {
    match (tens % 10) * 10 + ones % 10 {
        0 => 100,
        value => value,
    }
}

/// Roll a d100 with `bias` bonus (positive) or penalty (negative) dice.
///
/// A candidate tens digit replaces the working one only when it is
/// strictly better; ties keep the working digit.
pub fn roll_with_bias(source: &mut dyn DiceSource, bias: i32) -> BiasedRoll {
    let ones = digit(source);
    let base = digit(source);

    let mut tens = Vec::with_capacity(bias.unsigned_abs() as usize + 1);
    tens.push(base);
    let mut working = base;

    for _ in 0..bias.unsigned_abs() {
        let candidate = digit(source);
        tens.push(candidate);

        let current = compose_percentile(working, ones);
        let next = compose_percentile(candidate, ones);
        let better = if bias > 0 { next < current } else { next > current };
        if better {
            working = candidate;
        }
    }

    BiasedRoll {
        total: compose_percentile(working, ones),
        ones,
        tens,
        bias,
    }
}

fn digit(source: &mut dyn DiceSource) -> u32 {
    source.roll(10) - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{RngDice, ScriptedDice};
    use proptest::prelude::*;

    #[test]
    fn double_zero_is_one_hundred() {
        assert_eq!(compose_percentile(0, 0), 100);
        assert_eq!(compose_percentile(0, 7), 7);
        assert_eq!(compose_percentile(9, 9), 99);
    }

    #[test]
    fn bonus_dice_keep_lowest_tens() {
        // ones 5, base tens 7, candidates 2 and 4
        let mut dice = ScriptedDice::new().face(6).tens(7).tens(2).tens(4);
        let roll = roll_with_bias(&mut dice, 2);
        assert_eq!(roll.total, 25);
        assert_eq!(roll.dice(), vec![25, 7, 2, 4]);
        assert_eq!(roll.extra_tens(), &[2, 4]);
    }

    #[test]
    fn penalty_dice_keep_highest_tens() {
        let mut dice = ScriptedDice::new().face(4).tens(1).tens(6);
        let roll = roll_with_bias(&mut dice, -1);
        assert_eq!(roll.total, 63);
        assert_eq!(roll.dice().len(), 3);
    }

    #[test]
    fn zero_tens_counts_as_high_when_ones_is_zero() {
        // 00 composes to 100, so a bonus die must not pick it over 30
        let mut dice = ScriptedDice::new().face(1).tens(3).tens(0);
        let roll = roll_with_bias(&mut dice, 1);
        assert_eq!(roll.total, 30);

        // and a penalty die must pick it
        let mut dice = ScriptedDice::new().face(1).tens(3).tens(0);
        let roll = roll_with_bias(&mut dice, -1);
        assert_eq!(roll.total, 100);
    }

    #[test]
    fn ties_keep_the_working_digit() {
        let mut dice = ScriptedDice::new().face(3).tens(4).tens(4);
        let roll = roll_with_bias(&mut dice, 1);
        assert_eq!(roll.total, 42);
        assert_eq!(roll.tens, vec![4, 4]);
    }

    #[test]
    fn unbiased_roll_has_two_entries() {
        let mut dice = ScriptedDice::new().percentile(57);
        let roll = roll_with_bias(&mut dice, 0);
        assert_eq!(roll.dice(), vec![57, 5]);
    }

    proptest! {
        #[test]
        fn entry_count_matches_bias(seed in any::<u64>(), bias in -10i32..=10) {
            let mut dice = RngDice::seeded(seed);
            let roll = roll_with_bias(&mut dice, bias);
            prop_assert_eq!(roll.dice().len(), bias.unsigned_abs() as usize + 2);
            prop_assert!((1..=100).contains(&roll.total));
        }

        #[test]
        fn result_uses_a_drawn_tens_digit(seed in any::<u64>(), bias in -5i32..=5) {
            let mut dice = RngDice::seeded(seed);
            let roll = roll_with_bias(&mut dice, bias);
            let composed: Vec<u32> = roll
                .tens
                .iter()
                .map(|t| compose_percentile(*t, roll.ones))
                .collect();
            prop_assert!(composed.contains(&roll.total));
            if bias > 0 {
                prop_assert_eq!(Some(&roll.total), composed.iter().min());
            } else if bias < 0 {
                prop_assert_eq!(Some(&roll.total), composed.iter().max());
            } else {
                prop_assert_eq!(roll.total, composed[0]);
            }
        }
    }
}
