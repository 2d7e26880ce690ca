//! Test table: one investigator, an in-memory platform and a dispatcher.

use tv_mechanics::ScriptedDice;
use tv_rules::{
    Dispatcher, EngineConfig, MemoryPlatform, MentionedRole, RoleAbility, RoleId, RuleResult,
    Section,
};

pub(crate) const ROLE: i64 = 1;

pub(crate) struct Table {
    pub platform: MemoryPlatform,
    pub dispatcher: Dispatcher,
    pub role: MentionedRole,
}

impl Table {
    /// A table whose investigator has no sheet.
    pub fn empty() -> Self {
        Self {
            platform: MemoryPlatform::new(),
            dispatcher: crate::dispatcher(EngineConfig::default()).unwrap(),
            role: MentionedRole::new(ROLE, "阿明"),
        }
    }

    /// A table whose investigator has the given values.
    pub fn with_sheet(values: &[(&str, &str, Section)]) -> Self {
        let mut ability = RoleAbility::new();
        for (name, value, section) in values {
            ability.set_value(name, *value, *section);
        }
        let table = Self::empty();
        Self {
            platform: table.platform.with_role(RoleId(ROLE), ability),
            ..table
        }
    }

    pub async fn run(&self, line: &str, mut dice: ScriptedDice) -> RuleResult<bool> {
        self.dispatcher
            .dispatch(line, std::slice::from_ref(&self.role), &self.platform, &mut dice)
            .await
    }

    pub fn sheet(&self) -> RoleAbility {
        self.platform.sheet(RoleId(ROLE)).unwrap_or_default()
    }

    pub fn replies(&self) -> Vec<String> {
        self.platform.replies()
    }

    pub fn toasts(&self) -> Vec<String> {
        self.platform.toasts()
    }

    pub fn last_reply(&self) -> String {
        self.replies().pop().unwrap_or_default()
    }
}
