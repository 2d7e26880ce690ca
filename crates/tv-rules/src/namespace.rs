//! Rule namespaces.
//!
//! A namespace is built once at startup: aliases and formulas first, then
//! commands. Registration rejects anything that would make lookups
//! ambiguous, so a built namespace always resolves a name the same way.

use std::collections::HashMap;
use std::sync::Arc;

use tv_mechanics::MechError;

use crate::ability::RoleAbility;
use crate::command::CommandExecutor;
use crate::error::{RuleError, RuleResult};
use crate::formula::{DependentValue, Formula};

/// One ruleset's alias table, derived-value formulas and commands.
pub struct RuleNamespace {
    id: u32,
    key: String,
    aliases: Vec<String>,
    description: String,
    alias_map: HashMap<String, String>,
    formulas: HashMap<String, Formula>,
    commands: Vec<Arc<dyn CommandExecutor>>,
    command_index: HashMap<String, usize>,
}

impl std::fmt::Debug for RuleNamespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleNamespace")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("aliases", &self.alias_map.len())
            .field("formulas", &self.formulas.len())
            .field(
                "commands",
                &self
                    .commands
                    .iter()
                    .map(|c| c.info().name.as_str())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl RuleNamespace {
    /// Create an empty namespace.
    pub fn new(id: u32, key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            key: key.into(),
            aliases: Vec::new(),
            description: description.into(),
            alias_map: HashMap::new(),
            formulas: HashMap::new(),
            commands: Vec::new(),
            command_index: HashMap::new(),
        }
    }

    /// Set the namespace's own alternative keys.
    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    /// Numeric id.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Short key, e.g. `coc7`.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Alternative keys.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Map `alias` to `canonical`.
    ///
    /// The alias key is stored lowercased. Registering the same pair
    /// twice is a no-op; anything that would change an existing mapping,
    /// or make `resolve_alias` non-idempotent, is rejected.
    pub fn add_alias(&mut self, alias: &str, canonical: &str) -> RuleResult<()> {
        let key = alias.to_lowercase();
        if let Some(existing) = self.alias_map.get(&key) {
            if existing == canonical {
                return Ok(());
            }
            return Err(RuleError::DuplicateAlias {
                alias: alias.to_string(),
                existing: existing.clone(),
            });
        }

        let conflict = |alias: &str| RuleError::AliasConflict {
            alias: alias.to_string(),
            canonical: canonical.to_string(),
        };
        // The target must resolve to itself.
        if self
            .alias_map
            .get(&canonical.to_lowercase())
            .is_some_and(|target| target != canonical)
        {
            return Err(conflict(alias));
        }
        // No existing target may start resolving somewhere else.
        if self
            .alias_map
            .values()
            .any(|target| target.to_lowercase() == key && target != canonical)
        {
            return Err(conflict(alias));
        }

        self.alias_map.insert(key, canonical.to_string());
        Ok(())
    }

    /// Map every `(alias, canonical)` pair.
    pub fn add_aliases(&mut self, pairs: &[(&str, &str)]) -> RuleResult<()> {
        for (alias, canonical) in pairs {
            self.add_alias(alias, canonical)?;
        }
        Ok(())
    }

    /// Register the formula for derived value `name`.
    ///
    /// Formulas may only read canonical names.
    pub fn add_formula(&mut self, name: &str, formula: Formula) -> RuleResult<()> {
        if self.formulas.contains_key(name) {
            return Err(RuleError::DuplicateFormula(name.to_string()));
        }
        if let Some(reference) = formula
            .references()
            .into_iter()
            .find(|r| self.resolve_alias(r) != *r)
        {
            return Err(RuleError::NonCanonicalReference {
                name: name.to_string(),
                reference: reference.to_string(),
            });
        }
        self.formulas.insert(name.to_string(), formula);
        Ok(())
    }

    /// Register a command under its name and every alias.
    pub fn register(&mut self, command: Arc<dyn CommandExecutor>) -> RuleResult<()> {
        let names: Vec<String> = command.info().names().map(str::to_lowercase).collect();
        for (i, name) in names.iter().enumerate() {
            if self.command_index.contains_key(name) || names[..i].contains(name) {
                return Err(RuleError::DuplicateCommand(name.clone()));
            }
        }
        let slot = self.commands.len();
        self.commands.push(command);
        for name in names {
            self.command_index.insert(name, slot);
        }
        Ok(())
    }

    /// Translate a raw attribute name to its canonical form.
    ///
    /// Unknown names come back unchanged.
    pub fn resolve_alias(&self, raw: &str) -> String {
        self.alias_map
            .get(&raw.to_lowercase())
            .cloned()
            .unwrap_or_else(|| raw.to_string())
    }

    /// The formula for a derived value, if there is one.
    pub fn formula(&self, canonical: &str) -> Option<&Formula> {
        self.formulas.get(canonical)
    }

    /// Evaluate the derived value `canonical` against `ability`.
    ///
    /// Returns `Ok(None)` when there is no formula or an input the
    /// formula reads is missing from the sheet.
    pub fn resolve_dependent(
        &self,
        canonical: &str,
        ability: &RoleAbility,
    ) -> RuleResult<Option<DependentValue>> {
        let Some(formula) = self.formulas.get(canonical) else {
            return Ok(None);
        };
        let lookup = |name: &str| ability.get_number(name);
        match formula.evaluate(&lookup) {
            Ok(value) => Ok(Some(value)),
            Err(MechError::UnknownReference(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// The command registered under `name` (case-insensitive).
    pub fn command(&self, name: &str) -> Option<&Arc<dyn CommandExecutor>> {
        self.command_index
            .get(&name.to_lowercase())
            .and_then(|slot| self.commands.get(*slot))
    }

    /// Every command in registration order.
    pub fn commands(&self) -> &[Arc<dyn CommandExecutor>] {
        &self.commands
    }

    /// Every registered command name and alias, lowercased.
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.command_index.keys().map(String::as_str)
    }
}
