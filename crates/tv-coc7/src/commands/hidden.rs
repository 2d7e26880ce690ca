//! `.rh` / `.r` hidden rolls.

use async_trait::async_trait;
use tv_mechanics::DiceExpr;
use tv_rules::{CommandContext, CommandExecutor, CommandInfo, RuleError, RuleResult};

/// Expression rolled when none is given.
const DEFAULT_EXPR: &str = "d100";

/// Roll arbitrary dice and show the result only to the caller.
pub struct HiddenRollCommand {
    info: CommandInfo,
}

impl HiddenRollCommand {
    /// Create the command.
    pub fn new() -> Self {
        Self {
            info: CommandInfo::new("rh", "暗骰，结果只有自己可见")
                .with_aliases(&["r"])
                .with_usage(".rh [骰子表达式] [原因]")
                .with_examples(&[".rh", ".rh 1d6", ".rh 2d6+3 偷袭伤害"])
                .private(),
        }
    }
}

impl Default for HiddenRollCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandExecutor for HiddenRollCommand {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    async fn execute(&self, ctx: &mut CommandContext<'_>) -> RuleResult<bool> {
        let source = ctx.args.first().map_or(DEFAULT_EXPR, String::as_str);
        let expr = DiceExpr::parse(source)
            .map_err(|_| RuleError::input(format!("无法解析骰子表达式：{source}")))?;
        let reason = ctx.args.get(1..).unwrap_or_default().join(" ");

        let roll = expr.roll(&mut *ctx.dice);
        let actor = ctx.actor_name();
        let faces = match roll.faces.as_slice() {
            [] | [_] => String::new(),
            faces => {
                let parts: Vec<String> = faces.iter().map(u32::to_string).collect();
                format!("[{}]=", parts.join("+"))
            }
        };
        let reason = if reason.is_empty() {
            String::new()
        } else {
            format!("（{reason}）")
        };
        let text = format!("{actor} 暗骰{reason}：{expr}={faces}{}", roll.value);
        let notice = format!("{actor} {}", ctx.config.hidden_notice);

        ctx.toast(&text).await?;
        ctx.reply(&notice).await?;
        Ok(true)
    }
}
