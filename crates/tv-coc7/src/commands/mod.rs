//! Command handlers.
//!
//! Every handler follows the same sequence: parse the arguments, load and
//! validate what it needs, roll, classify, write the sheet back if the
//! outcome changes it, and only then reply.

pub mod bias;
pub mod check;
pub mod growth;
pub mod hidden;
pub mod madness;
pub mod sanity;
pub mod set;

use std::sync::Arc;

use tv_mechanics::{BiasedRoll, CheckTier};
use tv_rules::tokenizer::split_trailing_number;
use tv_rules::{CommandContext, CommandExecutor, RuleError, RuleResult};

use crate::madness::MadnessKind;

/// Every command of the ruleset, in help order.
pub fn all() -> Vec<Arc<dyn CommandExecutor>> {
    vec![
        Arc::new(check::CheckCommand::public()),
        Arc::new(bias::BiasCheckCommand::bonus()),
        Arc::new(bias::BiasCheckCommand::penalty()),
        Arc::new(hidden::HiddenRollCommand::new()),
        Arc::new(check::CheckCommand::hidden()),
        Arc::new(growth::GrowthCommand::new()),
        Arc::new(sanity::SanityCommand::new()),
        Arc::new(set::SetCommand::new()),
        Arc::new(madness::MadnessCommand::new(MadnessKind::RealTime)),
        Arc::new(madness::MadnessCommand::new(MadnessKind::Summary)),
    ]
}

/// What a percentile check is made against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckRequest {
    /// The attribute or skill name as typed.
    pub name: Option<String>,
    /// A value typed by the user, overriding the sheet.
    pub manual: Option<i64>,
    /// Sum of every signed modifier.
    pub modifier: i64,
    /// Bonus (positive) or penalty (negative) dice.
    pub bias: i32,
    /// Send the details privately.
    pub hidden: bool,
}

impl CheckRequest {
    /// Take `raw` as the check's name, splitting off a glued value
    /// (`侦查50`). Only the first name counts.
    fn set_name(&mut self, raw: &str) {
        if self.name.is_some() {
            return;
        }
        match split_trailing_number(raw) {
            Some((name, value)) => {
                self.name = Some(name);
                self.manual.get_or_insert(value);
            }
            None => self.name = Some(raw.to_string()),
        }
    }
}

/// Copy key for a check tier.
pub fn tier_key(tier: CheckTier) -> &'static str {
    match tier {
        CheckTier::Critical => "check.critical",
        CheckTier::Extreme => "check.extreme",
        CheckTier::Hard => "check.hard",
        CheckTier::Regular => "check.regular",
        CheckTier::Failure => "check.failure",
        CheckTier::Fumble => "check.fumble",
    }
}

/// Describe the bonus or penalty dice of a roll, or nothing.
pub fn bias_note(roll: &BiasedRoll) -> String {
    if roll.bias == 0 {
        return String::new();
    }
    let kind = if roll.bias > 0 { "奖励骰" } else { "惩罚骰" };
    let digits: Vec<String> = roll.tens.iter().map(|d| (d * 10).to_string()).collect();
    format!("（{kind}：十位 [{}]）", digits.join(", "))
}

/// The value a check is made against and how to name it.
async fn check_value(ctx: &CommandContext<'_>, request: &CheckRequest) -> RuleResult<(String, i64)> {
    match (&request.name, request.manual) {
        (name, Some(value)) => {
            let label = name
                .as_deref()
                .map(|n| ctx.namespace.resolve_alias(n))
                .unwrap_or_else(|| "技能".to_string());
            Ok((label, value))
        }
        (Some(name), None) => {
            let ability = ctx.load().await?;
            let canonical = ctx.namespace.resolve_alias(name);
            let value = ctx
                .namespace
                .attribute_number(name, &ability)?
                .ok_or_else(|| RuleError::input(format!("未知属性：{canonical}")))?;
            Ok((canonical, value))
        }
        (None, None) => Err(RuleError::input("请指定要检定的属性或技能")),
    }
}

/// Roll and report a percentile check.
pub async fn run_check(ctx: &mut CommandContext<'_>, request: CheckRequest) -> RuleResult<bool> {
    let (label, value) = check_value(ctx, &request).await?;
    let target = value.saturating_add(request.modifier);
    let roll = ctx.roll_check(request.bias)?;
    let tier = CheckTier::classify(roll.total, target);
    ctx.platform.set_copywriting_key(tier_key(tier));

    let shown = match request.modifier {
        0 => label,
        m => format!("{label}({m:+})"),
    };
    let actor = ctx.actor_name();
    let text = format!(
        "{actor} 进行 {shown} 检定：D100={}/{target}{} {tier}",
        roll.total,
        bias_note(&roll)
    );

    if request.hidden {
        let notice = format!("{actor} {}", ctx.config.hidden_notice);
        ctx.toast(&text).await?;
        ctx.reply(&notice).await?;
    } else {
        ctx.reply(&text).await?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tv_mechanics::ScriptedDice;
    use tv_mechanics::dice::roll_with_bias;

    #[test]
    fn names_split_off_glued_values() {
        let mut request = CheckRequest::default();
        request.set_name("侦查50");
        request.set_name("聆听");
        assert_eq!(request.name.as_deref(), Some("侦查"));
        assert_eq!(request.manual, Some(50));
    }

    #[test]
    fn bias_notes() {
        let mut dice = ScriptedDice::new().face(5).tens(6).tens(2);
        let roll = roll_with_bias(&mut dice, 1);
        assert_eq!(bias_note(&roll), "（奖励骰：十位 [60, 20]）");

        let mut dice = ScriptedDice::new().percentile(42);
        assert_eq!(bias_note(&roll_with_bias(&mut dice, 0)), "");
    }

    #[test]
    fn tier_keys_are_distinct() {
        let tiers = [
            CheckTier::Critical,
            CheckTier::Extreme,
            CheckTier::Hard,
            CheckTier::Regular,
            CheckTier::Failure,
            CheckTier::Fumble,
        ];
        let keys: std::collections::HashSet<_> = tiers.into_iter().map(tier_key).collect();
        assert_eq!(keys.len(), 6);
    }
}
