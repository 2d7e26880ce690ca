//! Command executors and the per-invocation context they run in.

use async_trait::async_trait;
use tv_mechanics::{BiasedRoll, DiceSource};

use crate::ability::RoleAbility;
use crate::config::EngineConfig;
use crate::error::{RuleError, RuleResult};
use crate::namespace::RuleNamespace;
use crate::platform::{MentionedRole, Platform};
use crate::tokenizer::Tokens;

/// Static description of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    /// Primary name, typed after the prefix.
    pub name: String,
    /// Alternative names.
    pub aliases: Vec<String>,
    /// One-line description.
    pub description: String,
    /// Example invocations.
    pub examples: Vec<String>,
    /// Usage text.
    pub usage: String,
    /// Whether errors are reported privately instead of in the room.
    pub private: bool,
}

impl CommandInfo {
    /// Describe a command with no aliases, examples or usage text.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            description: description.into(),
            examples: Vec::new(),
            usage: String::new(),
            private: false,
        }
    }

    /// Set the aliases.
    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    /// Set the usage text.
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Set the examples.
    pub fn with_examples(mut self, examples: &[&str]) -> Self {
        self.examples = examples.iter().map(|e| e.to_string()).collect();
        self
    }

    /// Report errors privately.
    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }

    /// The primary name followed by every alias.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// A command registered in a [`RuleNamespace`].
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// The command's description.
    fn info(&self) -> &CommandInfo;

    /// Run the command.
    ///
    /// Returns `Ok(true)` when the command completed. User-input and
    /// missing-state errors are returned as [`RuleError::UserInput`] or
    /// [`RuleError::State`] and reported by the dispatcher; handlers must
    /// not write the sheet before such an error is raised.
    async fn execute(&self, ctx: &mut CommandContext<'_>) -> RuleResult<bool>;
}

/// Everything one command invocation can see.
pub struct CommandContext<'a> {
    /// Lowercased whitespace-separated arguments.
    pub args: Vec<String>,
    /// The argument text as typed.
    pub raw_args: String,
    /// Characters the command targets; the first is the actor.
    pub mentioned: &'a [MentionedRole],
    /// The surrounding application.
    pub platform: &'a dyn Platform,
    /// The active ruleset.
    pub namespace: &'a RuleNamespace,
    /// The dice source for this invocation.
    pub dice: &'a mut dyn DiceSource,
    /// Engine settings.
    pub config: &'a EngineConfig,
}

impl<'a> CommandContext<'a> {
    /// Build a context from the argument text that follows the command
    /// name.
    pub fn new(
        raw_args: &str,
        mentioned: &'a [MentionedRole],
        platform: &'a dyn Platform,
        namespace: &'a RuleNamespace,
        dice: &'a mut dyn DiceSource,
        config: &'a EngineConfig,
    ) -> Self {
        let raw_args = raw_args.trim().to_string();
        let args = raw_args
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        Self {
            args,
            raw_args,
            mentioned,
            platform,
            namespace,
            dice,
            config,
        }
    }

    /// Tokenize the arguments.
    pub fn tokens(&self) -> Tokens {
        Tokens::parse(&self.args)
    }

    /// The character the command acts on.
    pub fn target(&self) -> RuleResult<&MentionedRole> {
        self.mentioned
            .first()
            .ok_or_else(|| RuleError::state("没有指定角色"))
    }

    /// The display name of the acting character, or a generic one.
    pub fn actor_name(&self) -> &str {
        self.mentioned
            .first()
            .map(|role| role.name.as_str())
            .unwrap_or("调查员")
    }

    /// Load the target's sheet. A missing sheet is a state error.
    pub async fn load(&self) -> RuleResult<RoleAbility> {
        let target = self.target()?;
        self.platform
            .role_ability(target.id)
            .await?
            .ok_or_else(|| RuleError::state(format!("{} 还没有角色卡", target.name)))
    }

    /// Load the target's sheet, starting from an empty one if it has none.
    pub async fn load_or_default(&self) -> RuleResult<RoleAbility> {
        let target = self.target()?;
        Ok(self
            .platform
            .role_ability(target.id)
            .await?
            .unwrap_or_default())
    }

    /// Write the target's sheet back.
    pub async fn save(&self, ability: RoleAbility) -> RuleResult<()> {
        let target = self.target()?;
        tracing::debug!(role = %target.id, "writing ability sheet");
        self.platform.set_role_ability(target.id, ability).await?;
        Ok(())
    }

    /// Send a public reply.
    pub async fn reply(&self, text: &str) -> RuleResult<()> {
        self.platform.reply(text).await?;
        Ok(())
    }

    /// Send a private toast.
    pub async fn toast(&self, text: &str) -> RuleResult<()> {
        self.platform.toast(text).await?;
        Ok(())
    }

    /// Roll a percentile check with `bias` bonus (positive) or penalty
    /// (negative) dice, rejecting counts above the configured cap.
    pub fn roll_check(&mut self, bias: i32) -> RuleResult<BiasedRoll> {
        if bias.unsigned_abs() > self.config.max_bias {
            return Err(RuleError::input(format!(
                "奖惩骰数量不能超过 {}",
                self.config.max_bias
            )));
        }
        Ok(tv_mechanics::dice::roll_with_bias(&mut *self.dice, bias))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MemoryPlatform, RoleId};
    use tv_mechanics::ScriptedDice;

    #[test]
    fn info_builder() {
        let info = CommandInfo::new("rc", "技能检定")
            .with_aliases(&["ra"])
            .with_usage(".rc <技能> [修正]")
            .with_examples(&[".rc 侦查"])
            .private();
        assert_eq!(info.names().collect::<Vec<_>>(), vec!["rc", "ra"]);
        assert!(info.private);
        assert_eq!(info.examples.len(), 1);
    }

    #[tokio::test]
    async fn context_lowercases_args_and_loads_sheet() {
        let platform = MemoryPlatform::new();
        let namespace = RuleNamespace::new(1, "test", "test rules");
        let mut dice = ScriptedDice::new();
        let config = EngineConfig::default();
        let mentioned = [MentionedRole::new(7, "阿明")];
        let ctx = CommandContext::new(
            "  STR 50 ",
            &mentioned,
            &platform,
            &namespace,
            &mut dice,
            &config,
        );
        assert_eq!(ctx.args, vec!["str", "50"]);
        assert_eq!(ctx.raw_args, "STR 50");
        assert_eq!(ctx.target().unwrap().id, RoleId(7));

        let err = ctx.load().await.unwrap_err();
        assert!(matches!(err, RuleError::State(_)));
        assert!(ctx.load_or_default().await.unwrap().is_empty());
    }

    #[test]
    fn bias_cap_is_user_input() {
        let platform = MemoryPlatform::new();
        let namespace = RuleNamespace::new(1, "test", "test rules");
        let mut dice = ScriptedDice::new();
        let config = EngineConfig::default().with_max_bias(2);
        let mut ctx = CommandContext::new("", &[], &platform, &namespace, &mut dice, &config);
        assert!(ctx.roll_check(2).is_ok());
        assert!(matches!(ctx.roll_check(-3), Err(RuleError::UserInput(_))));
        assert!(ctx.target().is_err());
        assert_eq!(ctx.actor_name(), "调查员");
    }
}
