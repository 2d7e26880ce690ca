//! `.ti` / `.li` bouts of madness.

use async_trait::async_trait;
use tv_rules::{CommandContext, CommandExecutor, CommandInfo, RuleResult};

use crate::madness::{MadnessKind, roll_bout};

/// Draw a bout of madness from one of the tables.
pub struct MadnessCommand {
    info: CommandInfo,
    kind: MadnessKind,
}

impl MadnessCommand {
    /// `.ti` for [`MadnessKind::RealTime`], `.li` for
    /// [`MadnessKind::Summary`].
    pub fn new(kind: MadnessKind) -> Self {
        let info = match kind {
            MadnessKind::RealTime => CommandInfo::new("ti", "临时疯狂：即时症状")
                .with_usage(".ti")
                .with_examples(&[".ti"]),
            MadnessKind::Summary => CommandInfo::new("li", "不定性疯狂：总结症状")
                .with_usage(".li")
                .with_examples(&[".li"]),
        };
        Self { info, kind }
    }
}

#[async_trait]
impl CommandExecutor for MadnessCommand {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    async fn execute(&self, ctx: &mut CommandContext<'_>) -> RuleResult<bool> {
        let bout = roll_bout(self.kind, &mut *ctx.dice);
        let text = format!("{} {bout}", ctx.actor_name());
        ctx.reply(&text).await?;
        Ok(true)
    }
}
