//! Rule namespaces and command dispatch for Tavern.
//!
//! A [`RuleNamespace`] owns one ruleset's alias table, derived-value
//! formulas and commands. The [`Dispatcher`] turns a chat line into a
//! command invocation, and commands talk to the outside world only
//! through the [`Platform`] trait.

pub mod ability;
pub mod command;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod formula;
pub mod namespace;
pub mod platform;
pub mod resolver;
pub mod tokenizer;

pub use ability::{RoleAbility, Section};
pub use command::{CommandContext, CommandExecutor, CommandInfo};
pub use config::EngineConfig;
pub use dispatcher::Dispatcher;
pub use error::{RuleError, RuleResult};
pub use formula::{DependentValue, Formula};
pub use namespace::RuleNamespace;
pub use platform::{Emission, MemoryPlatform, MentionedRole, Platform, PlatformError, RoleId};
pub use resolver::{AttributeValue, ValueSource};
pub use tokenizer::{Token, Tokens};
