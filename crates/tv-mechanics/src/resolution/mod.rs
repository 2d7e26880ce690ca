//! Percentile check resolution.
//!
//! A check compares a d100 roll against a target value and lands in one
//! of six tiers. The success bands are nested: every extreme success is
//! also a hard success, and every hard success is also a regular one.
//!
//! - **Critical**: roll of 1-5, regardless of the target
//! - **Fumble**: roll of 96-100
//! - **Failure**: roll above the target
//! - **Extreme**: roll at or below a fifth of the target
//! - **Hard**: roll at or below half of the target
//! - **Regular**: any other roll at or below the target
//!
//! Growth checks and sanity checks use coarser variants, see [`growth`]
//! and [`sanity`].

pub mod growth;
pub mod sanity;

pub use growth::GrowthCheck;
pub use sanity::SanityTier;

use serde::{Deserialize, Serialize};

/// Highest roll that is always a critical success.
pub const CRITICAL_MAX: u32 = 5;
/// Lowest roll that is always a fumble.
pub const FUMBLE_MIN: u32 = 96;

/// The six outcome tiers of a percentile check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckTier {
    /// Roll of 1-5.
    Critical,
    /// Roll at or below a fifth of the target.
    Extreme,
    /// Roll at or below half of the target.
    Hard,
    /// Roll at or below the target.
    Regular,
    /// Roll above the target.
    Failure,
    /// Roll of 96-100.
    Fumble,
}

impl CheckTier {
    /// Classify `roll` against `target`.
    pub fn classify(roll: u32, target: i64) -> Self {
        let roll_value = i64::from(roll);
        if roll <= CRITICAL_MAX {
            Self::Critical
        } else if roll >= FUMBLE_MIN {
            Self::Fumble
        } else if roll_value > target {
            Self::Failure
        } else if roll_value <= target.div_euclid(5) {
            Self::Extreme
        } else if roll_value <= target.div_euclid(2) {
            Self::Hard
        } else {
            Self::Regular
        }
    }

    /// Returns true for every tier that counts as a success.
    pub fn is_success(self) -> bool {
        matches!(
            self,
            Self::Critical | Self::Extreme | Self::Hard | Self::Regular
        )
    }

    /// The table-talk name of the tier.
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "大成功",
            Self::Extreme => "极难成功",
            Self::Hard => "困难成功",
            Self::Regular => "成功",
            Self::Failure => "失败",
            Self::Fumble => "大失败",
        }
    }
}

impl std::fmt::Display for CheckTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
