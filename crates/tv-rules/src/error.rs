//! Error types for rule namespaces and command handling.

use tv_mechanics::MechError;

use crate::platform::PlatformError;

/// Errors raised while building namespaces or running commands.
///
/// [`RuleError::UserInput`] and [`RuleError::State`] are shown to the
/// user and end the command without side effects. Everything else is
/// unexpected and propagates to the caller.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// The command arguments could not be understood.
    #[error("{0}")]
    UserInput(String),

    /// The character sheet is missing or lacks a required entry.
    #[error("{0}")]
    State(String),

    /// An alias key was registered twice with different targets.
    #[error("alias `{alias}` already maps to `{existing}`")]
    DuplicateAlias {
        /// The alias being registered.
        alias: String,
        /// Its current target.
        existing: String,
    },

    /// Registering an alias would make alias resolution non-idempotent.
    #[error("alias `{alias}` -> `{canonical}` conflicts with an existing canonical name")]
    AliasConflict {
        /// The alias being registered.
        alias: String,
        /// The canonical name it points to.
        canonical: String,
    },

    /// A formula was registered twice for the same name.
    #[error("formula for `{0}` already registered")]
    DuplicateFormula(String),

    /// A formula refers to an alias instead of a canonical name.
    #[error("formula for `{name}` refers to non-canonical name `{reference}`")]
    NonCanonicalReference {
        /// The formula being registered.
        name: String,
        /// The offending reference.
        reference: String,
    },

    /// A command name or alias is already taken in the namespace.
    #[error("command `{0}` already registered")]
    DuplicateCommand(String),

    /// A mechanics operation failed outside of user input.
    #[error(transparent)]
    Mechanics(#[from] MechError),

    /// The platform failed to read, write or deliver a message.
    #[error(transparent)]
    Platform(#[from] PlatformError),
}

impl RuleError {
    /// A user-input error with the given message.
    pub fn input(message: impl Into<String>) -> Self {
        Self::UserInput(message.into())
    }

    /// A missing-state error with the given message.
    pub fn state(message: impl Into<String>) -> Self {
        Self::State(message.into())
    }

    /// Returns true if the error is reported back to the user instead of
    /// propagating.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::UserInput(_) | Self::State(_))
    }
}

/// Convenience result type for rule operations.
pub type RuleResult<T> = Result<T, RuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_kinds() {
        assert!(RuleError::input("bad").is_user_facing());
        assert!(RuleError::state("missing").is_user_facing());
        assert!(!RuleError::from(PlatformError::new("down")).is_user_facing());
        assert!(!RuleError::from(MechError::DivisionByZero).is_user_facing());
    }

    #[test]
    fn messages_pass_through() {
        assert_eq!(RuleError::input("未知属性：x").to_string(), "未知属性：x");
        assert_eq!(
            RuleError::DuplicateCommand("rc".to_string()).to_string(),
            "command `rc` already registered"
        );
    }
}
