//! Derived-value formulas.
//!
//! A derived value is never stored on the sheet; it is computed from
//! other attributes when read. Formulas are plain data so a ruleset's
//! table can be inspected, cloned and compared.

use serde::{Deserialize, Serialize};
use tv_mechanics::expr::floor_div;
use tv_mechanics::{Expr, MechResult};

/// The value a formula produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum DependentValue {
    /// A plain number.
    Number(i64),
    /// A dice expression such as `1d4` or `-1`.
    Dice(String),
}

impl DependentValue {
    /// The numeric value, if this is a number.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Dice(_) => None,
        }
    }
}

impl std::fmt::Display for DependentValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Dice(expr) => write!(f, "{expr}"),
        }
    }
}

/// One band of a banded formula: inputs below `below` yield `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Band {
    /// Exclusive upper bound of the band.
    pub below: i64,
    /// Result for inputs in the band.
    pub value: DependentValue,
}

/// How a banded formula continues past its last band.
///
/// The result count is `floor((input - start) / step) + offset`, either
/// as a number or as that many dice with `die` faces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overflow {
    /// Input value where the progression starts.
    pub start: i64,
    /// Input width of each further step.
    pub step: i64,
    /// Count at `start`.
    pub offset: i64,
    /// Die size when the result is dice.
    pub die: Option<u32>,
}

/// A derived-value formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    /// An arithmetic expression over attributes.
    Arithmetic(Expr),
    /// An expression whose result is looked up in a band table.
    Banded {
        /// The input expression.
        input: Expr,
        /// Bands in ascending order of `below`.
        bands: Vec<Band>,
        /// Progression past the last band.
        overflow: Overflow,
    },
}

impl Formula {
    /// Parse an arithmetic formula.
    pub fn arithmetic(source: &str) -> MechResult<Self> {
        Ok(Self::Arithmetic(Expr::parse(source)?))
    }

    /// Parse a banded formula. Bands are sorted by their bound.
    pub fn banded(source: &str, mut bands: Vec<Band>, overflow: Overflow) -> MechResult<Self> {
        bands.sort_by_key(|band| band.below);
        Ok(Self::Banded {
            input: Expr::parse(source)?,
            bands,
            overflow,
        })
    }

    /// Every attribute name the formula reads.
    pub fn references(&self) -> Vec<&str> {
        match self {
            Self::Arithmetic(expr) => expr.references(),
            Self::Banded { input, .. } => input.references(),
        }
    }

    /// Evaluate the formula with `lookup` supplying attribute values.
    pub fn evaluate(&self, lookup: &dyn Fn(&str) -> Option<i64>) -> MechResult<DependentValue> {
        match self {
            Self::Arithmetic(expr) => Ok(DependentValue::Number(expr.evaluate(lookup)?)),
            Self::Banded {
                input,
                bands,
                overflow,
            } => {
                let value = input.evaluate(lookup)?;
                if let Some(band) = bands.iter().find(|band| value < band.below) {
                    return Ok(band.value.clone());
                }
                let count = floor_div(value - overflow.start, overflow.step)? + overflow.offset;
                Ok(match overflow.die {
                    Some(die) => DependentValue::Dice(format!("{count}d{die}")),
                    None => DependentValue::Number(count),
                })
            }
        }
    }
}
