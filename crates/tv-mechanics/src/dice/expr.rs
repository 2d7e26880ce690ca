//! Simple dice notation: `2`, `d6`, `1d6`, `1d4+1`, `-2`, `2d6-1d4`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::DiceSource;
use crate::error::{MechError, MechResult};

/// Largest number of dice a single term may roll.
pub const MAX_DICE: u32 = 100;
/// Largest die a term may name.
pub const MAX_SIDES: u32 = 1000;
/// Largest magnitude of a flat term.
pub const MAX_FLAT: i64 = 100_000;

/// One signed term of a dice expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    /// `count` dice with `sides` faces.
    Dice {
        /// Number of dice.
        count: u32,
        /// Faces per die.
        sides: u32,
        /// `true` when the term is subtracted.
        negative: bool,
    },
    /// A flat (already signed) modifier.
    Flat(i64),
}

impl Term {
    fn min(self) -> i64 {
        match self {
            Self::Dice {
                count, negative, ..
            } if !negative => i64::from(count),
            Self::Dice { count, sides, .. } => -(i64::from(count) * i64::from(sides)),
            Self::Flat(n) => n,
        }
    }

    fn max(self) -> i64 {
        match self {
            Self::Dice {
                count,
                sides,
                negative,
            } if !negative => i64::from(count) * i64::from(sides),
            Self::Dice { count, .. } => -i64::from(count),
            Self::Flat(n) => n,
        }
    }
}

/// A parsed dice expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpr {
    /// The terms in source order.
    pub terms: Vec<Term>,
    source: String,
}

/// The result of rolling a dice expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    /// The rolled total.
    pub value: i64,
    /// Individual die faces, in roll order.
    pub faces: Vec<u32>,
    /// Smallest possible total.
    pub min: i64,
    /// Largest possible total.
    pub max: i64,
}

impl DiceExpr {
    /// Parse dice notation. Whitespace is ignored and `d` is
    /// case-insensitive; a bare `d` means `d100`.
    pub fn parse(input: &str) -> MechResult<Self> {
        let source: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        if source.is_empty() {
            return Err(MechError::InvalidDice(input.to_string()));
        }

        let mut terms = Vec::new();
        let mut current = String::new();
        let mut negative = false;

        for (i, ch) in source.char_indices() {
            match ch {
                '+' | '-' => {
                    if current.is_empty() && i != 0 {
                        return Err(MechError::InvalidDice(input.to_string()));
                    }
                    if !current.is_empty() {
                        terms.push(parse_term(&current, negative, input)?);
                        current.clear();
                    }
                    negative = ch == '-';
                }
                _ => current.push(ch),
            }
        }
        if current.is_empty() {
            return Err(MechError::InvalidDice(input.to_string()));
        }
        terms.push(parse_term(&current, negative, input)?);

        Ok(Self { terms, source })
    }

    /// Smallest possible total.
    pub fn min(&self) -> i64 {
        self.terms.iter().fold(0, |acc, t| acc.saturating_add(t.min()))
    }

    /// Largest possible total.
    pub fn max(&self) -> i64 {
        self.terms.iter().fold(0, |acc, t| acc.saturating_add(t.max()))
    }

    /// Returns true if the expression contains no dice.
    pub fn is_flat(&self) -> bool {
        self.terms.iter().all(|t| matches!(t, Term::Flat(_)))
    }

    /// Roll every term and sum the result.
    pub fn roll(&self, source: &mut dyn DiceSource) -> DiceRoll {
        let mut value = 0i64;
        let mut faces = Vec::new();
        for term in &self.terms {
            match *term {
                Term::Dice {
                    count,
                    sides,
                    negative,
                } => {
                    let mut subtotal = 0i64;
                    for _ in 0..count {
                        let face = source.roll(sides);
                        faces.push(face);
                        subtotal += i64::from(face);
                    }
                    let signed = if negative { -subtotal } else { subtotal };
                    value = value.saturating_add(signed);
                }
                Term::Flat(n) => value = value.saturating_add(n),
            }
        }
        DiceRoll {
            value,
            faces,
            min: self.min(),
            max: self.max(),
        }
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// Parse and roll `expr` in one step.
pub fn parse_dice_expression(expr: &str, source: &mut dyn DiceSource) -> MechResult<DiceRoll> {
    Ok(DiceExpr::parse(expr)?.roll(source))
}

fn parse_term(text: &str, negative: bool, input: &str) -> MechResult<Term> {
    let invalid = || MechError::InvalidDice(input.to_string());

    let Some((count, sides)) = text.split_once('d') else {
        let n: i64 = text.parse().map_err(|_| invalid())?;
        if n > MAX_FLAT {
            return Err(invalid());
        }
        return Ok(Term::Flat(if negative { -n } else { n }));
    };

    let count: u32 = if count.is_empty() {
        1
    } else {
        count.parse().map_err(|_| invalid())?
    };
    let sides: u32 = if sides.is_empty() {
        100
    } else {
        sides.parse().map_err(|_| invalid())?
    };

    if count == 0 || count > MAX_DICE || sides == 0 || sides > MAX_SIDES {
        return Err(invalid());
    }

    Ok(Term::Dice {
        count,
        sides,
        negative,
    })
}
