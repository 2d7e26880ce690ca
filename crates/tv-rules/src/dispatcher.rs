//! Command dispatch.
//!
//! A chat line is a command when it starts with one of the configured
//! prefixes. The command name is matched against every registered name
//! and alias, longest first, so `.rcb` is never read as `.rc b` and
//! arguments may follow the name without a space (`.st力量70`).

use std::fmt::Write as _;
use std::sync::Arc;

use tv_mechanics::DiceSource;

use crate::command::{CommandContext, CommandExecutor};
use crate::config::EngineConfig;
use crate::error::RuleResult;
use crate::namespace::RuleNamespace;
use crate::platform::{MentionedRole, Platform};

const HELP: &str = "help";

/// Routes chat lines to the commands of one namespace.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    namespace: Arc<RuleNamespace>,
    config: EngineConfig,
}

impl Dispatcher {
    /// Create a dispatcher over `namespace`.
    pub fn new(namespace: Arc<RuleNamespace>, config: EngineConfig) -> Self {
        Self { namespace, config }
    }

    /// The active namespace.
    pub fn namespace(&self) -> &RuleNamespace {
        &self.namespace
    }

    /// The engine settings.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The line without its command prefix, or `None` if it has none.
    pub fn strip_prefix<'l>(&self, line: &'l str) -> Option<&'l str> {
        let line = line.trim_start();
        let first = line.chars().next()?;
        self.config
            .prefixes
            .contains(&first)
            .then(|| &line[first.len_utf8()..])
    }

    /// Split a prefix-less line into the command it names and the
    /// argument text, picking the longest matching name.
    pub fn split_command<'l>(
        &self,
        body: &'l str,
    ) -> Option<(&Arc<dyn CommandExecutor>, &'l str)> {
        let body = body.trim_start();
        let (name, rest) = self
            .namespace
            .command_names()
            .filter_map(|name| strip_name(body, name).map(|rest| (name, rest)))
            .max_by_key(|(name, _)| name.len())?;
        Some((self.namespace.command(name)?, rest))
    }

    /// Help text for one command, or an overview of all of them.
    pub fn help(&self, topic: Option<&str>) -> Option<String> {
        let mut out = String::new();
        match topic {
            Some(topic) => {
                let info = self.namespace.command(topic)?.info();
                let _ = writeln!(out, "{}：{}", info.name, info.description);
                if !info.aliases.is_empty() {
                    let _ = writeln!(out, "别名：{}", info.aliases.join(", "));
                }
                if !info.usage.is_empty() {
                    let _ = writeln!(out, "用法：{}", info.usage);
                }
                for example in &info.examples {
                    let _ = writeln!(out, "示例：{example}");
                }
            }
            None => {
                let _ = writeln!(out, "{}", self.namespace.description());
                for command in self.namespace.commands() {
                    let info = command.info();
                    let _ = write!(out, "  .{}", info.name);
                    if !info.aliases.is_empty() {
                        let _ = write!(out, " ({})", info.aliases.join(", "));
                    }
                    let _ = writeln!(out, "  {}", info.description);
                }
            }
        }
        Some(out.trim_end().to_string())
    }

    /// Run one chat line.
    ///
    /// Returns `Ok(false)` for lines that are not commands and for
    /// commands that ended with a user-facing error, which is reported
    /// through the platform. Anything else propagates.
    pub async fn dispatch(
        &self,
        line: &str,
        mentioned: &[MentionedRole],
        platform: &dyn Platform,
        dice: &mut dyn DiceSource,
    ) -> RuleResult<bool> {
        let Some(body) = self.strip_prefix(line) else {
            return Ok(false);
        };

        if let Some(rest) = strip_name(body.trim_start(), HELP)
            .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
        {
            let rest = rest.trim();
            let topic = (!rest.is_empty()).then_some(rest);
            let text = self
                .help(topic)
                .unwrap_or_else(|| format!("没有名为 {rest} 的指令"));
            platform.reply(&text).await?;
            return Ok(true);
        }

        let Some((command, args)) = self.split_command(body) else {
            tracing::debug!(line, "unknown command");
            return Ok(false);
        };
        let info = command.info();
        tracing::debug!(command = %info.name, args, "dispatching");

        let mut ctx = CommandContext::new(
            args,
            mentioned,
            platform,
            &self.namespace,
            dice,
            &self.config,
        );
        match command.execute(&mut ctx).await {
            Ok(done) => {
                tracing::debug!(command = %info.name, done, "command finished");
                Ok(done)
            }
            Err(err) if err.is_user_facing() => {
                tracing::debug!(command = %info.name, error = %err, "command rejected");
                let text = err.to_string();
                if info.private {
                    platform.toast(&text).await?;
                } else {
                    platform.reply(&text).await?;
                }
                Ok(false)
            }
            Err(err) => {
                tracing::error!(command = %info.name, error = %err, "command failed");
                Err(err)
            }
        }
    }
}

/// `body` without a leading `name`, compared ASCII case-insensitively.
fn strip_name<'l>(body: &'l str, name: &str) -> Option<&'l str> {
    body.get(..name.len())
        .filter(|head| head.eq_ignore_ascii_case(name))
        .map(|_| &body[name.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandInfo;
    use crate::error::RuleError;
    use crate::platform::{Emission, MemoryPlatform};
    use async_trait::async_trait;
    use tv_mechanics::ScriptedDice;

    /// Echoes its arguments, or fails on request.
    struct Echo(CommandInfo);

    #[async_trait]
    impl CommandExecutor for Echo {
        fn info(&self) -> &CommandInfo {
            &self.0
        }

        async fn execute(&self, ctx: &mut CommandContext<'_>) -> RuleResult<bool> {
            match ctx.args.first().map(String::as_str) {
                Some("bad") => Err(RuleError::input("看不懂")),
                Some("boom") => Err(RuleError::from(crate::platform::PlatformError::new("down"))),
                _ => {
                    let text = format!("{}:{}", self.0.name, ctx.args.join(","));
                    ctx.reply(&text).await?;
                    Ok(true)
                }
            }
        }
    }

    fn dispatcher() -> Dispatcher {
        let mut ns = RuleNamespace::new(1, "test", "测试规则");
        for (name, aliases, private) in [
            ("rc", &["ra"][..], false),
            ("rcb", &["rab"][..], false),
            ("st", &[][..], false),
            ("rh", &["r"][..], true),
        ] {
            let mut info = CommandInfo::new(name, format!("{name} 指令"))
                .with_aliases(aliases)
                .with_usage(format!(".{name} ..."));
            if private {
                info = info.private();
            }
            ns.register(Arc::new(Echo(info))).unwrap();
        }
        Dispatcher::new(Arc::new(ns), EngineConfig::default())
    }

    async fn run(dispatcher: &Dispatcher, line: &str) -> (RuleResult<bool>, MemoryPlatform) {
        let platform = MemoryPlatform::new();
        let mut dice = ScriptedDice::new();
        let result = dispatcher
            .dispatch(line, &[MentionedRole::new(1, "阿明")], &platform, &mut dice)
            .await;
        (result, platform)
    }

    #[test]
    fn prefixes() {
        let d = dispatcher();
        assert_eq!(d.strip_prefix(".rc"), Some("rc"));
        assert_eq!(d.strip_prefix("。rc"), Some("rc"));
        assert_eq!(d.strip_prefix("/rc"), Some("rc"));
        assert_eq!(d.strip_prefix("rc"), None);
        assert_eq!(d.strip_prefix(""), None);
    }

    #[test]
    fn longest_name_wins() {
        let d = dispatcher();
        let (cmd, rest) = d.split_command("rcb 力量").unwrap();
        assert_eq!(cmd.info().name, "rcb");
        assert_eq!(rest, " 力量");
        let (cmd, _) = d.split_command("RC 侦查").unwrap();
        assert_eq!(cmd.info().name, "rc");
        let (cmd, rest) = d.split_command("st力量70").unwrap();
        assert_eq!(cmd.info().name, "st");
        assert_eq!(rest, "力量70");
        let (cmd, rest) = d.split_command("r 1d6").unwrap();
        assert_eq!(cmd.info().name, "rh");
        assert_eq!(rest, " 1d6");
        assert!(d.split_command("xyz").is_none());
    }

    #[tokio::test]
    async fn dispatches_with_args() {
        let d = dispatcher();
        let (result, platform) = run(&d, ".ra 侦查 50").await;
        assert!(result.unwrap());
        assert_eq!(platform.replies(), vec!["rc:侦查,50"]);
    }

    #[tokio::test]
    async fn non_commands_are_ignored() {
        let d = dispatcher();
        let (result, platform) = run(&d, "hello").await;
        assert!(!result.unwrap());
        let (result, _) = run(&d, ".zz").await;
        assert!(!result.unwrap());
        assert!(platform.emissions().is_empty());
    }

    #[tokio::test]
    async fn user_errors_are_reported() {
        let d = dispatcher();
        let (result, platform) = run(&d, ".rc bad").await;
        assert!(!result.unwrap());
        assert_eq!(platform.emissions(), vec![Emission::Reply("看不懂".to_string())]);

        let (result, platform) = run(&d, ".rh bad").await;
        assert!(!result.unwrap());
        assert_eq!(platform.emissions(), vec![Emission::Toast("看不懂".to_string())]);
    }

    #[tokio::test]
    async fn unexpected_errors_propagate() {
        let d = dispatcher();
        let (result, platform) = run(&d, ".rc boom").await;
        assert!(matches!(result, Err(RuleError::Platform(_))));
        assert!(platform.emissions().is_empty());
    }

    #[tokio::test]
    async fn help_lists_commands() {
        let d = dispatcher();
        let (result, platform) = run(&d, ".help").await;
        assert!(result.unwrap());
        let text = &platform.replies()[0];
        assert!(text.contains(".rcb (rab)"));
        assert!(text.contains("测试规则"));

        let (_, platform) = run(&d, ".help ra").await;
        assert!(platform.replies()[0].contains("用法：.rc ..."));

        let (_, platform) = run(&d, ".help nope").await;
        assert_eq!(platform.replies(), vec!["没有名为 nope 的指令"]);
    }

    #[tokio::test]
    async fn help_needs_a_word_boundary() {
        let d = dispatcher();
        let (result, platform) = run(&d, ".helpst").await;
        assert!(!result.unwrap());
        assert!(platform.emissions().is_empty());

        let (result, platform) = run(&d, ".HELP  st").await;
        assert!(result.unwrap());
        assert!(platform.replies()[0].starts_with("st：st 指令"));
    }
}
