//! `.rc` / `.ra` skill checks and `.rch` / `.rah` hidden checks.

use async_trait::async_trait;
use tv_rules::tokenizer::Token;
use tv_rules::{CommandContext, CommandExecutor, CommandInfo, RuleResult, Tokens};

use super::{CheckRequest, run_check};

/// Argument that routes a check's details privately.
const HIDDEN_FLAG: &str = "h";

/// A percentile check against an attribute, a skill or a typed value.
pub struct CheckCommand {
    info: CommandInfo,
    always_hidden: bool,
}

impl CheckCommand {
    /// `.rc`: public unless the `h` flag is given.
    pub fn public() -> Self {
        Self {
            info: CommandInfo::new("rc", "技能检定")
                .with_aliases(&["ra"])
                .with_usage(".rc <技能/属性> [数值] [±修正] [b|p] [h]")
                .with_examples(&[".rc 侦查", ".rc 侦查 50", ".rc 力量+10 2b", ".rc 聆听 h"]),
            always_hidden: false,
        }
    }

    /// `.rch`: always private.
    pub fn hidden() -> Self {
        Self {
            info: CommandInfo::new("rch", "暗中进行的技能检定")
                .with_aliases(&["rah"])
                .with_usage(".rch <技能/属性> [数值] [±修正] [b|p]")
                .with_examples(&[".rch 侦查", ".rch 心理学 -20"])
                .private(),
            always_hidden: true,
        }
    }
}

/// Read a check from tokenized arguments.
///
/// The first name is the skill, the first unsigned number overrides its
/// value, and every delta or signed number adds to the modifier.
pub fn parse_check(tokens: &Tokens) -> CheckRequest {
    let mut request = CheckRequest {
        modifier: tokens.modifier(),
        bias: tokens.bias,
        ..CheckRequest::default()
    };
    for token in &tokens.items {
        match token {
            Token::Name(name) if name == HIDDEN_FLAG => request.hidden = true,
            Token::Name(name) => request.set_name(name),
            Token::Unsigned(value) if request.manual.is_none() => {
                request.manual = Some(value.trunc() as i64);
            }
            _ => {}
        }
    }
    request
}

#[async_trait]
impl CommandExecutor for CheckCommand {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    async fn execute(&self, ctx: &mut CommandContext<'_>) -> RuleResult<bool> {
        let mut request = parse_check(&ctx.tokens());
        request.hidden |= self.always_hidden;
        run_check(ctx, request).await
    }
}
