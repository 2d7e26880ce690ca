//! `.en` skill improvement.

use async_trait::async_trait;
use tv_mechanics::GrowthCheck;
use tv_mechanics::dice::roll_d100;
use tv_rules::ability::parse_number;
use tv_rules::{CommandContext, CommandExecutor, CommandInfo, RuleError, RuleResult};

/// Roll to improve a stored skill, adding 1D10 on success.
pub struct GrowthCommand {
    info: CommandInfo,
}

impl GrowthCommand {
    /// Create the command.
    pub fn new() -> Self {
        Self {
            info: CommandInfo::new("en", "技能成长检定")
                .with_usage(".en <技能>")
                .with_examples(&[".en 侦查", ".en 图书馆"]),
        }
    }
}

impl Default for GrowthCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandExecutor for GrowthCommand {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    async fn execute(&self, ctx: &mut CommandContext<'_>) -> RuleResult<bool> {
        let tokens = ctx.tokens();
        let name = tokens
            .names()
            .next()
            .ok_or_else(|| RuleError::input("请指定要成长的技能"))?;
        let canonical = ctx.namespace.resolve_alias(name);

        let mut ability = ctx.load().await?;
        let (section, current) = ability
            .find(&canonical)
            .and_then(|(section, value)| parse_number(value).map(|n| (section, n)))
            .ok_or_else(|| RuleError::input(format!("角色卡上没有 {canonical} 的数值")))?;

        let roll = roll_d100(&mut *ctx.dice);
        let growth = GrowthCheck::resolve(roll, current, &mut *ctx.dice);
        let actor = ctx.actor_name().to_string();

        let text = match growth.gain {
            Some(gain) => {
                let new = ability.set_number(&canonical, growth.new_value(), section);
                ctx.save(ability).await?;
                tracing::debug!(skill = %canonical, current, new, "skill improved");
                format!(
                    "{actor} 的 {canonical} 成长检定：D100={roll}/{current} 成功\n{canonical} 增加 1D10={gain}：{current} → {new}"
                )
            }
            None => format!("{actor} 的 {canonical} 成长检定：D100={roll}/{current} 失败，没有变化"),
        };
        ctx.reply(&text).await?;
        Ok(true)
    }
}
