//! `.st` attribute setting and `.st show`.
//!
//! The arguments are joined and scanned for repeated `<name><op><digits>`
//! groups, so `.st 力量70 敏捷60`, `.st力量70敏捷60` and `.st 力量+10`
//! all work. Every written value goes to the `skill` section.

use std::fmt;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Serialize;
use tv_rules::{
    CommandContext, CommandExecutor, CommandInfo, RoleAbility, RuleError, RuleNamespace,
    RuleResult, Section,
};

static ASSIGNMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\p{L}+)([+-]?)(\d+)").expect("valid regex"));

/// Sub-command that reads instead of writing.
const SHOW: &str = "show";

/// How an assignment changes the stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SetOp {
    /// Replace the value.
    Assign,
    /// Add to the value.
    Add,
    /// Subtract from the value.
    Sub,
}

impl fmt::Display for SetOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assign => write!(f, "="),
            Self::Add => write!(f, "+"),
            Self::Sub => write!(f, "-"),
        }
    }
}

/// One parsed `<name><op><digits>` group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Attribute name as typed.
    pub name: String,
    /// The operation.
    pub op: SetOp,
    /// The operand.
    pub value: i64,
}

/// The recorded effect of one assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetChange {
    /// Canonical attribute name.
    pub name: String,
    /// Value before, zero if unset.
    pub old: i64,
    /// The operation.
    pub op: SetOp,
    /// The operand.
    pub value: i64,
    /// Value after, clamped to zero or above.
    pub new: i64,
}

impl fmt::Display for SetChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}：{} {}{} → {}",
            self.name, self.old, self.op, self.value, self.new
        )
    }
}

/// Scan `text` for assignments. Text outside of a group is an error.
pub fn parse_assignments(text: &str) -> RuleResult<Vec<Assignment>> {
    let text: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let mut assignments = Vec::new();
    let mut end = 0;
    for caps in ASSIGNMENT_RE.captures_iter(&text) {
        let (Some(whole), Some(name), Some(op), Some(digits)) =
            (caps.get(0), caps.get(1), caps.get(2), caps.get(3))
        else {
            continue;
        };
        if whole.start() != end {
            break;
        }
        end = whole.end();
        let value = digits
            .as_str()
            .parse::<i64>()
            .map_err(|_| RuleError::input(format!("数值过大：{}", digits.as_str())))?;
        let op = match op.as_str() {
            "+" => SetOp::Add,
            "-" => SetOp::Sub,
            _ => SetOp::Assign,
        };
        assignments.push(Assignment {
            name: name.as_str().to_string(),
            op,
            value,
        });
    }
    if assignments.is_empty() || end != text.len() {
        return Err(RuleError::input(format!(
            "无法解析属性：{text}，格式为 名称数值，如 力量70 或 力量+10"
        )));
    }
    Ok(assignments)
}

/// Apply assignments to `ability`, writing every result into `skill`.
pub fn apply(
    namespace: &RuleNamespace,
    ability: &mut RoleAbility,
    assignments: &[Assignment],
) -> Vec<SetChange> {
    assignments
        .iter()
        .map(|assignment| {
            let name = namespace.resolve_alias(&assignment.name);
            let old = ability.get_number(&name).unwrap_or(0);
            let raw = match assignment.op {
                SetOp::Assign => assignment.value,
                SetOp::Add => old.saturating_add(assignment.value),
                SetOp::Sub => old.saturating_sub(assignment.value),
            };
            let new = ability.set_number(&name, raw, Section::Skill);
            SetChange {
                name,
                old,
                op: assignment.op,
                value: assignment.value,
                new,
            }
        })
        .collect()
}

/// Render the sheet, or only the named attributes.
fn show(namespace: &RuleNamespace, ability: &RoleAbility, names: &[String]) -> RuleResult<String> {
    if names.is_empty() {
        let sections = [
            (Section::Basic, "属性"),
            (Section::Ability, "状态"),
            (Section::Skill, "技能"),
        ];
        let lines: Vec<String> = sections
            .into_iter()
            .filter(|(section, _)| !ability.section(*section).is_empty())
            .map(|(section, label)| {
                let entries: Vec<String> = ability
                    .section(section)
                    .iter()
                    .map(|(name, value)| format!("{name}{value}"))
                    .collect();
                format!("{label}：{}", entries.join(" "))
            })
            .collect();
        if lines.is_empty() {
            return Ok("角色卡是空的".to_string());
        }
        return Ok(lines.join("\n"));
    }

    let mut lines = Vec::with_capacity(names.len());
    for raw in names {
        let line = match namespace.resolve_attribute(raw, ability)? {
            Some(attr) => format!("{}：{}", attr.canonical, attr.value),
            None => format!("{}：未设置", namespace.resolve_alias(raw)),
        };
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

/// Set attributes on the sheet.
pub struct SetCommand {
    info: CommandInfo,
}

impl SetCommand {
    /// Create the command.
    pub fn new() -> Self {
        Self {
            info: CommandInfo::new("st", "设置或查看角色属性")
                .with_usage(".st <名称><数值>... | .st <名称>+<数值> | .st show [名称...]")
                .with_examples(&[
                    ".st 力量70 敏捷60 侦查45",
                    ".st 侦查+5",
                    ".st show",
                    ".st show 力量",
                ]),
        }
    }
}

impl Default for SetCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandExecutor for SetCommand {
    fn info(&self) -> &CommandInfo {
        &self.info
    }

    async fn execute(&self, ctx: &mut CommandContext<'_>) -> RuleResult<bool> {
        if ctx.args.first().is_some_and(|arg| arg == SHOW) {
            let ability = ctx.load().await?;
            let body = show(ctx.namespace, &ability, &ctx.args[1..])?;
            let text = format!("{} 的角色卡\n{body}", ctx.actor_name());
            ctx.reply(&text).await?;
            return Ok(true);
        }

        if ctx.args.is_empty() {
            return Err(RuleError::input("请给出要设置的属性，例如 .st 力量70"));
        }
        let assignments = parse_assignments(&ctx.args.concat())?;

        let mut ability = ctx.load_or_default().await?;
        let changes = apply(ctx.namespace, &mut ability, &assignments);
        ctx.save(ability).await?;
        for change in &changes {
            tracing::debug!(attribute = %change.name, old = change.old, new = change.new, "attribute set");
        }

        let lines: Vec<String> = changes.iter().map(ToString::to_string).collect();
        let text = format!("{} 的属性已更新\n{}", ctx.actor_name(), lines.join("\n"));
        ctx.reply(&text).await?;
        Ok(true)
    }
}
