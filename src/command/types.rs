use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::ActionType;

/// Normalize a phrase or trigger for matching: trimmed and lowercased, so
/// matching is case- and surrounding-whitespace-insensitive.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// A stored user-defined trigger→action mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEntry {
    pub id: Uuid,
    /// Stored normalized (see [`normalize`]); non-empty, enforced at
    /// creation by the command store.
    pub trigger_phrase: String,
    pub action_type: ActionType,
    /// Free text; semantics depend on `action_type` (URL, tab name,
    /// script body, ...).
    pub action_target: String,
    pub description: String,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl CommandEntry {
    pub fn new(draft: CommandDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            trigger_phrase: normalize(&draft.trigger_phrase),
            action_type: draft.action_type,
            action_target: draft.action_target,
            description: draft.description,
            enabled: draft.enabled,
            created_at: Utc::now(),
        }
    }
}

/// Fields for creating a new [`CommandEntry`].
#[derive(Debug, Clone)]
pub struct CommandDraft {
    pub trigger_phrase: String,
    pub action_type: ActionType,
    pub action_target: String,
    pub description: String,
    pub enabled: bool,
}

/// Partial update of a [`CommandEntry`]. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct CommandPatch {
    pub trigger_phrase: Option<String>,
    pub action_type: Option<ActionType>,
    pub action_target: Option<String>,
    pub description: Option<String>,
    pub enabled: Option<bool>,
}

impl CommandPatch {
    pub fn is_empty(&self) -> bool {
        self.trigger_phrase.is_none()
            && self.action_type.is_none()
            && self.action_target.is_none()
            && self.description.is_none()
            && self.enabled.is_none()
    }
}
