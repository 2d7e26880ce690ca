//! `.sc` sanity checks.

use async_trait::async_trait;
use tv_mechanics::dice::roll_d100;
use tv_mechanics::resolution::sanity::SanityLoss;
use tv_mechanics::{DiceExpr, SanityTier};
use tv_rules::ability::parse_number;
use tv_rules::{CommandContext, CommandExecutor, CommandInfo, RuleError, RuleResult, Section};

use crate::SANITY;

/// A single loss this large may trigger temporary insanity.
pub const TEMPORARY_INSANITY_LOSS: i64 = 5;

/// Roll against current sanity and apply the loss.
pub struct SanityCommand {
    info: CommandInfo,
}

impl SanityCommand {
    /// Create the command.
    pub fn new() -> Self {
        Self {
            info: CommandInfo::new("sc", "理智检定")
                .with_usage(".sc <成功损失>/<失败损失>")
                .with_examples(&[".sc 0/1", ".sc 1/1d6", ".sc 1d3/1d10"]),
        }
    }
}

impl Default for SanityCommand {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a `success/failure` loss pair.
pub fn parse_losses(text: &str) -> RuleResult<(DiceExpr, DiceExpr)> {
    let invalid = || {
        RuleError::input(format!("无法解析理智损失：{text}，格式为 成功损失/失败损失"))
    };
    let (success, failure) = text.split_once('/').ok_or_else(invalid)?;
    let success = DiceExpr::parse(success).map_err(|_| invalid())?;
    let failure = DiceExpr::parse(failure).map_err(|_| invalid())?;
    Ok((success, failure))
}

fn describe_loss(
    tier: SanityTier,
    loss: &SanityLoss,
    success: &DiceExpr,
    failure: &DiceExpr,
) -> String {
    match tier {
        SanityTier::Critical => format!("{}（最小值）", loss.amount),
        SanityTier::Fumble => format!("{}（最大值）", loss.amount),
        SanityTier::Success if !success.is_flat() => format!("{success}={}", loss.amount),
        SanityTier::Failure if !failure.is_flat() => format!("{failure}={}", loss.amount),
        _ => loss.amount.to_string(),
    }
}

#[async_trait]
impl CommandExecutor for SanityCommand {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    async fn execute(&self, ctx: &mut CommandContext<'_>) -> RuleResult<bool> {
        let text: String = ctx.args.concat();
        if text.is_empty() {
            return Err(RuleError::input("请给出理智损失，例如 .sc 1/1d6"));
        }
        let (success, failure) = parse_losses(&text)?;

        let mut ability = ctx.load().await?;
        let current = ability
            .section(Section::Ability)
            .get(SANITY)
            .map(String::as_str)
            .and_then(parse_number)
            .ok_or_else(|| RuleError::state("角色卡中没有理智值"))?;

        let roll = roll_d100(&mut *ctx.dice);
        let tier = SanityTier::classify(roll, current);
        let loss = tier.loss(&success, &failure, &mut *ctx.dice);
        let new = ability.set_number(SANITY, current - loss.amount, Section::Ability);
        ctx.save(ability).await?;
        tracing::debug!(current, loss = loss.amount, new, "sanity updated");

        let actor = ctx.actor_name();
        let mut reply = format!(
            "{actor} 的理智检定：D100={roll}/{current} {tier}\n理智减少 {}：{current} → {new}",
            describe_loss(tier, &loss, &success, &failure)
        );
        if loss.amount >= TEMPORARY_INSANITY_LOSS {
            reply.push_str("\n单次损失 5 点以上理智，请进行智力检定，成功则陷入临时性疯狂");
        }
        if new == 0 {
            reply.push_str("\n理智归零，陷入永久性疯狂");
        }
        ctx.reply(&reply).await?;
        Ok(true)
    }
}
