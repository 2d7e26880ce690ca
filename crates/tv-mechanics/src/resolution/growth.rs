//! Skill improvement checks.
//!
//! An improvement check succeeds when the roll is above the current skill
//! value, or above 95 for skills that are already very high. A success
//! adds 1d10 to the skill.

use serde::{Deserialize, Serialize};

use crate::dice::DiceSource;

/// Rolls above this always improve the skill.
pub const GROWTH_ALWAYS_ABOVE: u32 = 95;
/// Die rolled for the improvement amount.
pub const GROWTH_DIE: u32 = 10;

/// The result of an improvement check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthCheck {
    /// The d100 roll.
    pub roll: u32,
    /// The skill value before the check.
    pub current: i64,
    /// The 1d10 gain, present only on success.
    pub gain: Option<u32>,
}

impl GrowthCheck {
    /// Returns true if `roll` improves a skill at `current`.
    pub fn succeeds(roll: u32, current: i64) -> bool {
        roll > GROWTH_ALWAYS_ABOVE || i64::from(roll) > current
    }

    /// Resolve an improvement check for an already rolled d100, drawing
    /// the gain from `source` on success.
    pub fn resolve(roll: u32, current: i64, source: &mut dyn DiceSource) -> Self {
        let gain = Self::succeeds(roll, current).then(|| source.roll(GROWTH_DIE));
        Self {
            roll,
            current,
            gain,
        }
    }

    /// Returns true if the skill improved.
    pub fn is_success(&self) -> bool {
        self.gain.is_some()
    }

    /// The skill value after the check.
    pub fn new_value(&self) -> i64 {
        self.current + self.gain.map(i64::from).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    #[test]
    fn roll_above_current_succeeds() {
        assert!(GrowthCheck::succeeds(61, 60));
        assert!(!GrowthCheck::succeeds(60, 60));
        assert!(!GrowthCheck::succeeds(20, 60));
    }

    #[test]
    fn high_roll_always_succeeds() {
        assert!(GrowthCheck::succeeds(96, 99));
        assert!(GrowthCheck::succeeds(97, 120));
        assert!(!GrowthCheck::succeeds(95, 99));
    }

    #[test]
    fn success_draws_gain() {
        let mut dice = ScriptedDice::new().face(7);
        let check = GrowthCheck::resolve(97, 60, &mut dice);
        assert_eq!(check.gain, Some(7));
        assert_eq!(check.new_value(), 67);
    }

    #[test]
    fn failure_draws_nothing() {
        let mut dice = ScriptedDice::new().face(7);
        let check = GrowthCheck::resolve(30, 60, &mut dice);
        assert!(!check.is_success());
        assert_eq!(check.new_value(), 60);
    }
}
