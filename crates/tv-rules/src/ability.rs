//! Character ability sheets.
//!
//! A sheet has three independent sections keyed by canonical attribute
//! names. Values are stored as strings, the way the surrounding platform
//! persists them; numeric helpers parse on read and clamp on write.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One of the three sections of a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Raw characteristics (STR, CON, ...).
    Basic,
    /// Derived or capped values (HP, MP, sanity, ...).
    Ability,
    /// Learned skills.
    Skill,
}

impl Section {
    /// Lookup order used by [`RoleAbility::get_value`].
    pub const SEARCH_ORDER: [Section; 3] = [Section::Skill, Section::Basic, Section::Ability];
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Ability => write!(f, "ability"),
            Self::Skill => write!(f, "skill"),
        }
    }
}

/// A character's ability sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAbility {
    /// Raw characteristics.
    #[serde(default)]
    pub basic: BTreeMap<String, String>,
    /// Derived or capped values.
    #[serde(default)]
    pub ability: BTreeMap<String, String>,
    /// Learned skills.
    #[serde(default)]
    pub skill: BTreeMap<String, String>,
}

impl RoleAbility {
    /// Create an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow one section.
    pub fn section(&self, section: Section) -> &BTreeMap<String, String> {
        match section {
            Section::Basic => &self.basic,
            Section::Ability => &self.ability,
            Section::Skill => &self.skill,
        }
    }

    /// Mutably borrow one section.
    pub fn section_mut(&mut self, section: Section) -> &mut BTreeMap<String, String> {
        match section {
            Section::Basic => &mut self.basic,
            Section::Ability => &mut self.ability,
            Section::Skill => &mut self.skill,
        }
    }

    /// Find a value and the section it lives in, searching skill, basic,
    /// then ability.
    pub fn find(&self, name: &str) -> Option<(Section, &str)> {
        Section::SEARCH_ORDER.iter().find_map(|section| {
            self.section(*section)
                .get(name)
                .map(|value| (*section, value.as_str()))
        })
    }

    /// The first stored value for `name`, searching skill, basic, then
    /// ability.
    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.find(name).map(|(_, value)| value)
    }

    /// [`get_value`](Self::get_value) parsed as a number.
    pub fn get_number(&self, name: &str) -> Option<i64> {
        self.get_value(name).and_then(parse_number)
    }

    /// Write `value` into `section`, creating the key if absent.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>, section: Section) {
        self.section_mut(section)
            .insert(name.to_string(), value.into());
    }

    /// Write a number into `section`, clamped to zero or above. Returns
    /// the stored value.
    pub fn set_number(&mut self, name: &str, value: i64, section: Section) -> i64 {
        let clamped = value.max(0);
        self.set_value(name, clamped.to_string(), section);
        clamped
    }

    /// Returns true if no section holds any value.
    pub fn is_empty(&self) -> bool {
        self.basic.is_empty() && self.ability.is_empty() && self.skill.is_empty()
    }
}

/// Parse a stored value as an integer. Decimal values are floored.
pub fn parse_number(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(n) = value.parse::<i64>() {
        return Some(n);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f.floor() as i64)
}
