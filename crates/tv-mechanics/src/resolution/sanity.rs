//! Sanity checks.
//!
//! Sanity checks only distinguish four tiers. Each tier takes its loss
//! from a different place: a critical loses the least the success
//! expression allows, a fumble loses the most the failure expression
//! allows, and the plain tiers roll their expression.

use serde::{Deserialize, Serialize};

use super::{CRITICAL_MAX, FUMBLE_MIN};
use crate::dice::{DiceExpr, DiceSource};

/// Outcome tiers of a sanity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SanityTier {
    /// Roll of 1-5.
    Critical,
    /// Roll of 96-100.
    Fumble,
    /// Roll at or below current sanity.
    Success,
    /// Roll above current sanity.
    Failure,
}

/// The loss picked for a sanity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanityLoss {
    /// Sanity points lost, never negative.
    pub amount: i64,
    /// `true` when the amount came from rolling the expression.
    pub rolled: bool,
}

impl SanityTier {
    /// Classify `roll` against the current sanity value.
    pub fn classify(roll: u32, sanity: i64) -> Self {
        if roll <= CRITICAL_MAX {
            Self::Critical
        } else if roll >= FUMBLE_MIN {
            Self::Fumble
        } else if i64::from(roll) <= sanity {
            Self::Success
        } else {
            Self::Failure
        }
    }

    /// Returns true for the tiers that use the success expression.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Critical | Self::Success)
    }

    /// Pick the loss for this tier from the success/failure expressions.
    pub fn loss(
        self,
        on_success: &DiceExpr,
        on_failure: &DiceExpr,
        source: &mut dyn DiceSource,
    ) -> SanityLoss {
        let (amount, rolled) = match self {
            Self::Critical => (on_success.min(), false),
            Self::Fumble => (on_failure.max(), false),
            Self::Success => (on_success.roll(source).value, true),
            Self::Failure => (on_failure.roll(source).value, true),
        };
        SanityLoss {
            amount: amount.max(0),
            rolled,
        }
    }

    /// The table-talk name of the tier.
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "大成功",
            Self::Fumble => "大失败",
            Self::Success => "成功",
            Self::Failure => "失败",
        }
    }
}

impl std::fmt::Display for SanityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
