//! `.rcb` / `.rab` bonus-die checks and `.rcp` / `.rap` penalty-die checks.
//!
//! The number of extra dice is typed as a trailing integer after the
//! skill name instead of `b`/`p` markers.

use async_trait::async_trait;
use tv_rules::tokenizer::Token;
use tv_rules::{CommandContext, CommandExecutor, CommandInfo, RuleResult, Tokens};

use super::{CheckRequest, run_check};

/// A check with a fixed direction of bias.
pub struct BiasCheckCommand {
    info: CommandInfo,
    sign: i32,
}

impl BiasCheckCommand {
    /// `.rcb`: bonus dice.
    pub fn bonus() -> Self {
        Self {
            info: CommandInfo::new("rcb", "带奖励骰的技能检定")
                .with_aliases(&["rab"])
                .with_usage(".rcb <技能/属性> [数值] [奖励骰数量]")
                .with_examples(&[".rcb 侦查", ".rcb 力量+10 2", ".rcb 侦查 60 2"]),
            sign: 1,
        }
    }

    /// `.rcp`: penalty dice.
    pub fn penalty() -> Self {
        Self {
            info: CommandInfo::new("rcp", "带惩罚骰的技能检定")
                .with_aliases(&["rap"])
                .with_usage(".rcp <技能/属性> [数值] [惩罚骰数量]")
                .with_examples(&[".rcp 射击", ".rcp 闪避 2"]),
            sign: -1,
        }
    }
}

/// Read a bonus/penalty check.
///
/// An unsigned number before any name is the skill value. After a name,
/// a single number is the dice count; with two or more, the first is the
/// skill value and the last the dice count. The count defaults to one.
pub fn parse_bias_check(tokens: &Tokens, sign: i32) -> CheckRequest {
    let mut request = CheckRequest {
        modifier: tokens.modifier(),
        ..CheckRequest::default()
    };
    let mut trailing = Vec::new();
    for token in &tokens.items {
        match token {
            Token::Name(name) => request.set_name(name),
            Token::Unsigned(value) => {
                let value = value.trunc() as i64;
                if request.name.is_none() && request.manual.is_none() {
                    request.manual = Some(value);
                } else {
                    trailing.push(value);
                }
            }
            _ => {}
        }
    }
    let count = match trailing.as_slice() {
        [] => 1,
        [count] => *count,
        [value, .., count] => {
            request.manual = Some(*value);
            *count
        }
    };
    request.bias = sign.saturating_mul(i32::try_from(count).unwrap_or(i32::MAX));
    request
}

#[async_trait]
impl CommandExecutor for BiasCheckCommand {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    async fn execute(&self, ctx: &mut CommandContext<'_>) -> RuleResult<bool> {
        let request = parse_bias_check(&ctx.tokens(), self.sign);
        run_check(ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Table;
    use tv_mechanics::ScriptedDice;
    use tv_rules::Section;

    fn parse(args: &[&str], sign: i32) -> CheckRequest {
        parse_bias_check(&Tokens::parse(args), sign)
    }

    #[test]
    fn trailing_integer_is_the_count() {
        let request = parse(&["力量+10", "2"], 1);
        assert_eq!(request.name.as_deref(), Some("力量"));
        assert_eq!(request.modifier, 10);
        assert_eq!(request.bias, 2);
        assert_eq!(request.manual, None);
    }

    #[test]
    fn leading_integer_is_the_value() {
        let request = parse(&["50"], -1);
        assert_eq!(request.manual, Some(50));
        assert_eq!(request.bias, -1);

        let request = parse(&["50", "3"], -1);
        assert_eq!(request.manual, Some(50));
        assert_eq!(request.bias, -3);
    }

    #[test]
    fn value_and_count_after_name() {
        let request = parse(&["侦查", "60", "2"], 1);
        assert_eq!(request.manual, Some(60));
        assert_eq!(request.bias, 2);
    }

    #[test]
    fn default_count_is_one() {
        assert_eq!(parse(&["侦查"], 1).bias, 1);
        assert_eq!(parse(&["侦查"], -1).bias, -1);
    }

    #[tokio::test]
    async fn bonus_check_with_delta_and_count() {
        let table = Table::with_sheet(&[("力量", "70", Section::Basic)]);
        // ones 3, base tens 9, candidates 4 then 6 -> 43
        let dice = ScriptedDice::new().face(4).tens(9).tens(4).tens(6);
        assert!(table.run(".rcb 力量+10 2", dice).await.unwrap());
        assert_eq!(
            table.last_reply(),
            "阿明 进行 力量(+10) 检定：D100=43/80（奖励骰：十位 [90, 40, 60]） 成功"
        );
    }

    #[tokio::test]
    async fn manual_value_overrides_stored() {
        let table = Table::with_sheet(&[("侦查", "20", Section::Skill)]);
        let dice = ScriptedDice::new().face(1).tens(5).tens(3);
        table.run(".rcb 侦查 80 1", dice).await.unwrap();
        assert!(table.last_reply().contains("D100=30/80"));
    }

    #[tokio::test]
    async fn penalty_keeps_highest() {
        let table = Table::with_sheet(&[("闪避", "50", Section::Skill)]);
        let dice = ScriptedDice::new().face(3).tens(2).tens(8);
        table.run(".rap 闪避", dice).await.unwrap();
        assert_eq!(
            table.last_reply(),
            "阿明 进行 闪避 检定：D100=82/50（惩罚骰：十位 [20, 80]） 失败"
        );
    }
}
