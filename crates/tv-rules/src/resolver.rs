//! Attribute resolution.
//!
//! A raw attribute name typed by a user is first translated through the
//! namespace's alias table, then looked up on the sheet. Values stored on
//! the sheet win; derived values are only computed when nothing is
//! stored under the canonical name.

use serde::{Deserialize, Serialize};
use tv_mechanics::{Expr, MechResult};

use crate::ability::{RoleAbility, Section, parse_number};
use crate::error::RuleResult;
use crate::formula::DependentValue;
use crate::namespace::RuleNamespace;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueSource {
    /// Stored in a section of the sheet.
    Stored(Section),
    /// Computed by a formula.
    Derived,
}

/// A resolved attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeValue {
    /// Canonical attribute name.
    pub canonical: String,
    /// The value.
    pub value: DependentValue,
    /// Where it came from.
    pub source: ValueSource,
}

impl AttributeValue {
    /// The value as a number, if it is one.
    pub fn number(&self) -> Option<i64> {
        self.value.as_number()
    }
}

impl RuleNamespace {
    /// Resolve a raw attribute name against `ability`.
    pub fn resolve_attribute(
        &self,
        raw: &str,
        ability: &RoleAbility,
    ) -> RuleResult<Option<AttributeValue>> {
        let canonical = self.resolve_alias(raw);
        if let Some((section, stored)) = ability.find(&canonical) {
            let value = match parse_number(stored) {
                Some(n) => DependentValue::Number(n),
                None => DependentValue::Dice(stored.to_string()),
            };
            return Ok(Some(AttributeValue {
                canonical,
                value,
                source: ValueSource::Stored(section),
            }));
        }
        Ok(self
            .resolve_dependent(&canonical, ability)?
            .map(|value| AttributeValue {
                canonical,
                value,
                source: ValueSource::Derived,
            }))
    }

    /// Resolve a raw attribute name to a number.
    pub fn attribute_number(&self, raw: &str, ability: &RoleAbility) -> RuleResult<Option<i64>> {
        Ok(self
            .resolve_attribute(raw, ability)?
            .and_then(|attr| attr.number()))
    }
}

/// Evaluate an arithmetic expression whose names are read from `ability`
/// with the usual skill, basic, ability search order.
pub fn calculate_expression(expr: &str, ability: &RoleAbility) -> MechResult<i64> {
    let lookup = |name: &str| ability.get_number(name);
    Expr::parse(expr)?.evaluate(&lookup)
}
