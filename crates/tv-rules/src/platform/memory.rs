//! In-memory platform for tests and the local CLI.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{Platform, PlatformError, RoleId};
use crate::ability::RoleAbility;

/// A message produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// Public reply.
    Reply(String),
    /// Private toast.
    Toast(String),
}

impl Emission {
    /// The message text.
    pub fn text(&self) -> &str {
        match self {
            Self::Reply(text) | Self::Toast(text) => text,
        }
    }
}

/// A platform that keeps sheets and messages in memory.
#[derive(Debug, Default)]
pub struct MemoryPlatform {
    sheets: Mutex<HashMap<RoleId, RoleAbility>>,
    emissions: Mutex<Vec<Emission>>,
    copy_keys: Mutex<Vec<String>>,
    writes: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryPlatform {
    /// Create an empty platform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a sheet for `role` without counting it as a write.
    pub fn with_role(self, role: RoleId, ability: RoleAbility) -> Self {
        if let Ok(mut sheets) = self.sheets.lock() {
            sheets.insert(role, ability);
        }
        self
    }

    /// Make every subsequent call fail.
    pub fn fail_calls(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// A copy of the current sheet for `role`.
    pub fn sheet(&self, role: RoleId) -> Option<RoleAbility> {
        self.sheets
            .lock()
            .ok()
            .and_then(|sheets| sheets.get(&role).cloned())
    }

    /// Every message emitted so far, in order.
    pub fn emissions(&self) -> Vec<Emission> {
        self.emissions
            .lock()
            .map(|e| e.clone())
            .unwrap_or_default()
    }

    /// Drain the emitted messages.
    pub fn take_emissions(&self) -> Vec<Emission> {
        self.emissions
            .lock()
            .map(|mut e| std::mem::take(&mut *e))
            .unwrap_or_default()
    }

    /// Public replies so far.
    pub fn replies(&self) -> Vec<String> {
        self.emissions()
            .into_iter()
            .filter_map(|e| match e {
                Emission::Reply(text) => Some(text),
                Emission::Toast(_) => None,
            })
            .collect()
    }

    /// Private toasts so far.
    pub fn toasts(&self) -> Vec<String> {
        self.emissions()
            .into_iter()
            .filter_map(|e| match e {
                Emission::Toast(text) => Some(text),
                Emission::Reply(_) => None,
            })
            .collect()
    }

    /// Copywriting keys requested so far.
    pub fn copy_keys(&self) -> Vec<String> {
        self.copy_keys
            .lock()
            .map(|k| k.clone())
            .unwrap_or_default()
    }

    /// Number of sheet writes performed through the platform.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), PlatformError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(PlatformError::new("platform unavailable"))
        } else {
            Ok(())
        }
    }

    fn emit(&self, emission: Emission) -> Result<(), PlatformError> {
        self.check()?;
        lock(&self.emissions)?.push(emission);
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, PlatformError> {
    mutex
        .lock()
        .map_err(|_| PlatformError::new("platform state poisoned"))
}

#[async_trait]
impl Platform for MemoryPlatform {
    async fn role_ability(&self, role: RoleId) -> Result<Option<RoleAbility>, PlatformError> {
        self.check()?;
        Ok(lock(&self.sheets)?.get(&role).cloned())
    }

    async fn set_role_ability(
        &self,
        role: RoleId,
        ability: RoleAbility,
    ) -> Result<(), PlatformError> {
        self.check()?;
        lock(&self.sheets)?.insert(role, ability);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn reply(&self, text: &str) -> Result<(), PlatformError> {
        self.emit(Emission::Reply(text.to_string()))
    }

    async fn toast(&self, text: &str) -> Result<(), PlatformError> {
        self.emit(Emission::Toast(text.to_string()))
    }

    fn set_copywriting_key(&self, key: &str) {
        if let Ok(mut keys) = self.copy_keys.lock() {
            keys.push(key.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::Section;

    #[tokio::test]
    async fn read_write_roundtrip() {
        let platform = MemoryPlatform::new();
        let role = RoleId(1);
        assert_eq!(platform.role_ability(role).await.unwrap(), None);

        let mut ability = RoleAbility::new();
        ability.set_value("力量", "70", Section::Basic);
        platform.set_role_ability(role, ability.clone()).await.unwrap();

        assert_eq!(platform.role_ability(role).await.unwrap(), Some(ability));
        assert_eq!(platform.write_count(), 1);
    }

    #[tokio::test]
    async fn emissions_keep_order() {
        let platform = MemoryPlatform::new();
        platform.reply("a").await.unwrap();
        platform.toast("b").await.unwrap();
        platform.reply("c").await.unwrap();
        assert_eq!(platform.replies(), vec!["a", "c"]);
        assert_eq!(platform.toasts(), vec!["b"]);
        assert_eq!(platform.take_emissions().len(), 3);
        assert!(platform.emissions().is_empty());
    }

    #[tokio::test]
    async fn failing_platform_errors() {
        let platform = MemoryPlatform::new();
        platform.fail_calls(true);
        assert!(platform.reply("x").await.is_err());
        assert!(platform.role_ability(RoleId(1)).await.is_err());
    }

    #[test]
    fn copy_keys_are_recorded() {
        let platform = MemoryPlatform::new();
        platform.set_copywriting_key("check.success");
        assert_eq!(platform.copy_keys(), vec!["check.success"]);
    }
}
