//! Dice sources, percentile rolls and dice notation.
//!
//! Every roll in the engine goes through a [`DiceSource`], so the random
//! source can be swapped for a seeded RNG or a scripted sequence in tests.

pub mod expr;
pub mod percentile;

pub use expr::{DiceExpr, DiceRoll, parse_dice_expression};
pub use percentile::{BiasedRoll, compose_percentile, roll_with_bias};

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{MechError, MechResult};

/// A source of die faces.
pub trait DiceSource: Send + Sync {
    /// Roll one die with `sides` faces, returning a value in `1..=sides`.
    ///
    /// Callers guarantee `sides >= 1`.
    fn roll(&mut self, sides: u32) -> u32;
}

/// A dice source backed by a standard RNG.
#[derive(Debug, Clone)]
pub struct RngDice {
    rng: StdRng,
}

impl RngDice {
    /// A deterministic source for reproducible sessions.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Build a source from an optional seed.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl DiceSource for RngDice {
    fn roll(&mut self, sides: u32) -> u32 {
        self.rng.random_range(1..=sides.max(1))
    }
}

/// A dice source that replays a fixed sequence of faces.
///
/// Faces are clamped into `1..=sides` of the die being rolled. Once the
/// script runs out it starts over from the beginning; an empty script
/// always rolls 1.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    script: Vec<u32>,
    queue: VecDeque<u32>,
}

impl ScriptedDice {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw die face.
    pub fn face(mut self, value: u32) -> Self {
        self.script.push(value);
        self.queue.push_back(value);
        self
    }

    /// Append the two d10 faces that make up a percentile result.
    ///
    /// The ones digit is drawn first, then the tens digit; `100` is
    /// encoded as the `00` pair.
    pub fn percentile(self, value: u32) -> Self {
        let value = value.clamp(1, 100) % 100;
        self.face(value % 10 + 1).face(value / 10 + 1)
    }

    /// Append a bare tens-digit candidate (0-9) for bonus/penalty dice.
    pub fn tens(self, digit: u32) -> Self {
        self.face(digit % 10 + 1)
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self, sides: u32) -> u32 {
        if self.queue.is_empty() {
            self.queue.extend(self.script.iter().copied());
        }
        self.queue.pop_front().unwrap_or(1).clamp(1, sides.max(1))
    }
}

/// Roll a single die with `sides` faces.
pub fn roll_die(source: &mut dyn DiceSource, sides: u32) -> MechResult<u32> {
    if sides == 0 {
        return Err(MechError::InvalidDieSize(sides));
    }
    Ok(source.roll(sides))
}

/// Roll an unbiased d100.
pub fn roll_d100(source: &mut dyn DiceSource) -> u32 {
    roll_with_bias(source, 0).total
}
