//! Call of Cthulhu 7th edition for Tavern.
//!
//! Builds the `coc7` [`RuleNamespace`]: the Chinese/English attribute
//! alias table, the derived-value formulas and the dice commands
//! (`rc`, `rcb`, `rcp`, `rh`, `rch`, `en`, `sc`, `st`, `ti`, `li`).

pub mod aliases;
pub mod commands;
pub mod formulas;
pub mod madness;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use tv_rules::{Dispatcher, EngineConfig, RuleNamespace, RuleResult};

/// Namespace id of the ruleset.
pub const NAMESPACE_ID: u32 = 1;
/// Namespace key of the ruleset.
pub const NAMESPACE_KEY: &str = "coc7";

/// Canonical name of current sanity, read from the `ability` section.
pub const SANITY: &str = "理智";

/// Build the complete `coc7` namespace.
pub fn namespace() -> RuleResult<RuleNamespace> {
    let mut ns = RuleNamespace::new(NAMESPACE_ID, NAMESPACE_KEY, "克苏鲁的呼唤 第七版")
        .with_aliases(&["coc", "cthulhu"]);
    ns.add_aliases(aliases::ALIASES)?;
    formulas::register(&mut ns)?;
    for command in commands::all() {
        ns.register(command)?;
    }
    Ok(ns)
}

/// A dispatcher over the `coc7` namespace.
pub fn dispatcher(config: EngineConfig) -> RuleResult<Dispatcher> {
    Ok(Dispatcher::new(Arc::new(namespace()?), config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_builds() {
        let ns = namespace().unwrap();
        assert_eq!(ns.key(), "coc7");
        for name in ["rc", "ra", "rcb", "rab", "rcp", "rap", "rh", "r", "rch", "rah", "en", "sc", "st", "ti", "li"] {
            assert!(ns.command(name).is_some(), "missing command {name}");
        }
        assert_eq!(ns.commands().len(), 10);
    }

    #[test]
    fn common_aliases() {
        let ns = namespace().unwrap();
        assert_eq!(ns.resolve_alias("STR"), "力量");
        assert_eq!(ns.resolve_alias("san"), "理智");
        assert_eq!(ns.resolve_alias("db"), "伤害加值");
        assert_eq!(ns.resolve_alias("侦查"), "侦查");
    }
}
