//! Dice mechanics for Tavern.
//!
//! Provides an injectable dice source, the percentile roller with
//! bonus/penalty bias, simple dice notation, the six-tier check
//! classifier (plus the growth and sanity variants), and the small
//! arithmetic language used by derived attribute formulas.

pub mod dice;
pub mod error;
pub mod expr;
pub mod resolution;

pub use dice::{BiasedRoll, DiceExpr, DiceRoll, DiceSource, RngDice, ScriptedDice};
pub use error::{MechError, MechResult};
pub use expr::Expr;
pub use resolution::{CheckTier, GrowthCheck, SanityTier};
