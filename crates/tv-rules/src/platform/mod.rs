//! The platform boundary.
//!
//! Commands never touch storage or the chat transport directly. Every
//! read, write and message goes through a [`Platform`] supplied by the
//! caller, so the surrounding application decides where sheets live and
//! how replies are delivered.

mod memory;

pub use memory::{Emission, MemoryPlatform};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ability::RoleAbility;

/// Identifier of a character in the surrounding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoleId(pub i64);

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A character a command targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionedRole {
    /// The character's id.
    pub id: RoleId,
    /// The character's display name.
    pub name: String,
}

impl MentionedRole {
    /// Create a mention.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: RoleId(id),
            name: name.into(),
        }
    }
}

/// A failure inside the platform.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("platform call failed: {message}")]
pub struct PlatformError {
    /// What went wrong.
    pub message: String,
}

impl PlatformError {
    /// Create an error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Everything a command may ask of the surrounding application.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Load a character's sheet, or `None` if the character has none.
    async fn role_ability(&self, role: RoleId) -> Result<Option<RoleAbility>, PlatformError>;

    /// Replace a character's sheet.
    async fn set_role_ability(&self, role: RoleId, ability: RoleAbility)
    -> Result<(), PlatformError>;

    /// Send a message everyone in the room can see.
    async fn reply(&self, text: &str) -> Result<(), PlatformError>;

    /// Send a message only the caller can see.
    async fn toast(&self, text: &str) -> Result<(), PlatformError>;

    /// Pick the copy variant for the next message. Purely cosmetic.
    fn set_copywriting_key(&self, _key: &str) {}
}
